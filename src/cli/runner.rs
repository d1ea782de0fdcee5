use std::io::{self, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use niresample::api::resample_file_with_options;
use niresample::OutputOptions;

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run one resample and write the confirmation line to `out`.
pub fn run_with_output<W: Write>(
    args: CliArgs,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging()?;
    }

    let params = args.params();
    let options = OutputOptions {
        sidecar: args.sidecar,
    };

    info!("Processing: {:?} -> {:?}", args.image_path, args.output_path);

    let report =
        resample_file_with_options(&args.image_path, &args.output_path, &params, &options)
            .map_err(|source| AppError::Resample {
                input: args.image_path.display().to_string(),
                source,
            })?;

    info!(
        "Finished in {:.2?}: {:?} @ {:?} -> {:?} @ {:?}",
        report.elapsed,
        report.input_size,
        report.input_spacing,
        report.output_size,
        report.output_spacing
    );
    writeln!(out, "{}", report.confirmation())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ndarray::Array3;
    use niresample::{Geometry, Image, PixelType, read_image, write_image};
    use std::path::Path;
    use tempfile::tempdir;

    fn args(input: &Path, output: &Path, extra: &[&str]) -> CliArgs {
        let mut argv = vec![
            "niresample".to_string(),
            input.display().to_string(),
            output.display().to_string(),
        ];
        for opt in [
            "--spacing_x", "2.0", "--spacing_y", "2.0", "--spacing_z", "1.0",
            "--size_x", "3", "--size_y", "3", "--size_z", "2",
        ] {
            argv.push(opt.to_string());
        }
        argv.extend(extra.iter().map(|s| s.to_string()));
        CliArgs::try_parse_from(argv).unwrap()
    }

    fn write_label_map(path: &Path) {
        let data = Array3::from_shape_fn((6, 6, 2), |(x, _, _)| if x < 3 { 1.0 } else { 2.0 });
        let image = Image::new(data, Geometry::with_spacing([1.0, 1.0, 1.0]), PixelType::U8);
        write_image(&image, path).unwrap();
    }

    #[test]
    fn test_run_writes_output_and_confirms() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("seg.nii.gz");
        let output = dir.path().join("resampled").join("seg_2mm.nii.gz");
        write_label_map(&input);

        let mut stdout = Vec::new();
        run_with_output(args(&input, &output, &["--is_label"]), &mut stdout).unwrap();

        assert!(output.exists());
        let line = String::from_utf8(stdout).unwrap();
        assert_eq!(
            line,
            format!("seg.nii.gz resampled and saved to {}\n", output.display())
        );

        let result = read_image(&output).unwrap();
        assert_eq!(result.size(), [3, 3, 2]);
        for &v in result.data().iter() {
            assert!(v == 1.0 || v == 2.0, "unexpected label {v}");
        }
    }

    #[test]
    fn test_run_sidecar_flag_writes_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("seg.nii");
        let output = dir.path().join("seg_out.nii");
        write_label_map(&input);

        run_with_output(args(&input, &output, &["--sidecar"]), &mut Vec::new()).unwrap();
        assert!(dir.path().join("seg_out.json").exists());
    }

    #[test]
    fn test_run_missing_input_names_the_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("missing.nii.gz");
        let output = dir.path().join("out.nii.gz");

        let mut stdout = Vec::new();
        let err = run_with_output(args(&input, &output, &[]), &mut stdout).unwrap_err();

        assert!(err.downcast_ref::<AppError>().is_some());
        assert!(err.to_string().contains(&input.display().to_string()), "{err}");
        assert!(stdout.is_empty());
        assert!(!output.exists());
    }
}
