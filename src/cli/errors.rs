use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to resample {input}: {source}")]
    Resample {
        input: String,
        #[source]
        source: niresample::Error,
    },

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
