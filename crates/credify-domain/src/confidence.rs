//! Confidence module
//!
//! The service reports confidence as a percentage in [0, 100]. The client
//! does not validate that contract; it only makes sure rendering stays sane
//! when the value is off.

/// Lower bound of the percentage scale
pub const MIN_CONFIDENCE: f64 = 0.0;

/// Upper bound of the percentage scale
pub const MAX_CONFIDENCE: f64 = 100.0;

/// Four-step scale used to color a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceTier {
    /// 80 and above
    High,

    /// 60 up to 80
    Moderate,

    /// 40 up to 60
    Low,

    /// Below 40 (and NaN)
    VeryLow,
}

impl ConfidenceTier {
    /// Classify a confidence percentage
    ///
    /// # Examples
    ///
    /// ```
    /// use credify_domain::ConfidenceTier;
    ///
    /// assert_eq!(ConfidenceTier::of(92.0), ConfidenceTier::High);
    /// assert_eq!(ConfidenceTier::of(39.9), ConfidenceTier::VeryLow);
    /// ```
    pub fn of(confidence: f64) -> Self {
        if confidence >= 80.0 {
            ConfidenceTier::High
        } else if confidence >= 60.0 {
            ConfidenceTier::Moderate
        } else if confidence >= 40.0 {
            ConfidenceTier::Low
        } else {
            ConfidenceTier::VeryLow
        }
    }
}

/// Whether a value lies on the percentage scale
pub fn in_range(confidence: f64) -> bool {
    (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&confidence)
}

/// Fraction of a bar the value fills, in [0.0, 1.0]
///
/// Out-of-range values are clamped here only; the value itself is left
/// untouched everywhere else. NaN fills nothing.
pub fn fill_ratio(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) / MAX_CONFIDENCE
}

/// Number of filled cells for a bar `width` cells wide
pub fn filled_cells(confidence: f64, width: usize) -> usize {
    let cells = (fill_ratio(confidence) * width as f64).round() as usize;
    cells.min(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ConfidenceTier::of(100.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::of(80.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::of(79.99), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::of(60.0), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::of(40.0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::of(0.0), ConfidenceTier::VeryLow);
        assert_eq!(ConfidenceTier::of(f64::NAN), ConfidenceTier::VeryLow);
    }

    #[test]
    fn test_empty_and_full() {
        assert_eq!(filled_cells(0.0, 20), 0);
        assert_eq!(filled_cells(100.0, 20), 20);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(filled_cells(-15.0, 20), 0);
        assert_eq!(filled_cells(140.0, 20), 20);
        assert_eq!(filled_cells(f64::NAN, 20), 0);
        assert_eq!(filled_cells(f64::INFINITY, 20), 20);
        assert!(!in_range(-0.5));
        assert!(!in_range(100.5));
        assert!(in_range(0.0));
        assert!(in_range(100.0));
    }

    proptest! {
        #[test]
        fn prop_fill_equals_value(value in 0u32..=100) {
            prop_assert_eq!(filled_cells(f64::from(value), 100), value as usize);
        }

        #[test]
        fn prop_fill_never_exceeds_width(value in proptest::num::f64::ANY, width in 0usize..200) {
            prop_assert!(filled_cells(value, width) <= width);
        }
    }
}
