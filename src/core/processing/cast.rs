use crate::types::PixelType;

/// Bring a computed value into the representable range of `pixel_type`.
///
/// Values are clamped to the type's range; integer types are additionally
/// rounded to the nearest integer (halves away from zero).
#[inline]
pub fn cast_with_bounds(value: f64, pixel_type: PixelType) -> f64 {
    let (min, max) = pixel_type.range();
    let clamped = value.clamp(min, max);
    if pixel_type.is_integer() {
        clamped.round()
    } else {
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_types_clamp_negative_fill_to_zero() {
        assert_eq!(cast_with_bounds(-1024.0, PixelType::U8), 0.0);
        assert_eq!(cast_with_bounds(-1024.0, PixelType::U16), 0.0);
    }

    #[test]
    fn signed_types_keep_air_value() {
        assert_eq!(cast_with_bounds(-1024.0, PixelType::I16), -1024.0);
        assert_eq!(cast_with_bounds(-1024.0, PixelType::F32), -1024.0);
    }

    #[test]
    fn integers_round_and_saturate() {
        assert_eq!(cast_with_bounds(12.6, PixelType::I16), 13.0);
        assert_eq!(cast_with_bounds(-12.5, PixelType::I16), -13.0);
        assert_eq!(cast_with_bounds(300.0, PixelType::U8), 255.0);
        assert_eq!(cast_with_bounds(40000.0, PixelType::I16), 32767.0);
    }

    #[test]
    fn floats_pass_through() {
        assert_eq!(cast_with_bounds(0.125, PixelType::F64), 0.125);
    }
}
