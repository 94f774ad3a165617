//! Decode decimation factor calculation.
//!
//! Decoding a multi-megapixel photo just to fill a list row wastes memory.
//! The decoder instead keeps every Nth sample per axis; these helpers compute
//! N and the resulting output dimensions.

/// Integer decimation factor for decoding `source_height` pixels into a slot
/// `target_height` pixels tall.
///
/// Never upsamples: sources at or below the target decode at full resolution.
/// Above it, the real ratio rounds half-up, clamped to at least 1, so a
/// source a little over twice the target still quarters its memory use.
#[must_use]
pub fn sample_factor(source_height: u32, target_height: u32) -> u32 {
    if source_height <= target_height {
        return 1;
    }

    let doubled = u64::from(source_height) * 2 + u64::from(target_height);
    let rounded = doubled / (u64::from(target_height) * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX).max(1)
}

/// Output dimensions after decimating by `factor`, at minimum one pixel per
/// axis.
#[must_use]
pub fn scaled_dimensions(width: u32, height: u32, factor: u32) -> (u32, u32) {
    let factor = factor.max(1);
    ((width / factor).max(1), (height / factor).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1000, 300, 3 ; "rounds_one_third_down")]
    #[test_case(100, 300, 1 ; "never_upsamples")]
    #[test_case(300, 300, 1 ; "equal_heights_decode_full")]
    #[test_case(1500, 1000, 2 ; "half_rounds_up")]
    #[test_case(1499, 1000, 1 ; "just_under_half_rounds_down")]
    #[test_case(2500, 1000, 3 ; "half_rounds_up_again")]
    #[test_case(301, 300, 1 ; "barely_larger_still_one")]
    #[test_case(4000, 480, 8 ; "typical_photo_into_list_row")]
    fn test_sample_factor(source: u32, target: u32, expected: u32) {
        assert_eq!(sample_factor(source, target), expected);
    }

    #[test]
    fn test_sample_factor_is_never_zero() {
        for source in [1, 2, 10, 999, 1000, 1001, u32::MAX] {
            assert!(sample_factor(source, 1000) >= 1);
        }
    }

    #[test]
    fn test_scaled_dimensions_divides_both_axes() {
        assert_eq!(scaled_dimensions(4000, 3000, 3), (1333, 1000));
        assert_eq!(scaled_dimensions(1920, 1080, 1), (1920, 1080));
    }

    #[test]
    fn test_scaled_dimensions_never_reaches_zero() {
        assert_eq!(scaled_dimensions(2, 2, 10), (1, 1));
    }
}
