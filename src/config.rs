//! Panel configuration.
//!
//! # Example
//!
//! ```
//! use zenmasonry::MasonryConfig;
//!
//! let config = MasonryConfig::new(100.0, 3).spacing(10.0, 5.0);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.horizontal_item_spacing, 10.0);
//! ```

use crate::error::LayoutError;

/// Largest column count the panel lays out. Higher counts are clamped.
pub const MAX_COLUMNS: usize = 1024;

/// Masonry panel settings.
///
/// `maximum_column_width` doubles as the breakpoint interval: one more column
/// appears every `maximum_column_width` units of available width, up to
/// `maximum_column_count`. Columns never grow wider than the maximum; extra
/// width is left empty on the trailing edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MasonryConfig {
    /// Upper bound for a column's width; also the breakpoint interval.
    pub maximum_column_width: f64,
    /// Upper bound for the number of columns.
    pub maximum_column_count: usize,
    /// Gutter between columns. Also applied on both outside edges.
    pub horizontal_item_spacing: f64,
    /// Gap above every item in a column, including the first.
    pub vertical_item_spacing: f64,
    /// Snap column widths down and offsets/heights to whole layout units.
    pub use_layout_rounding: bool,
}

impl Default for MasonryConfig {
    fn default() -> Self {
        Self {
            maximum_column_width: 250.0,
            maximum_column_count: 4,
            horizontal_item_spacing: 8.0,
            vertical_item_spacing: 8.0,
            use_layout_rounding: false,
        }
    }
}

impl MasonryConfig {
    /// Config with the given column limits and no spacing.
    pub fn new(maximum_column_width: f64, maximum_column_count: usize) -> Self {
        Self {
            maximum_column_width,
            maximum_column_count,
            horizontal_item_spacing: 0.0,
            vertical_item_spacing: 0.0,
            use_layout_rounding: false,
        }
    }

    /// Set the gutter between (and outside) columns.
    pub fn horizontal_spacing(mut self, spacing: f64) -> Self {
        self.horizontal_item_spacing = spacing;
        self
    }

    /// Set the gap above each item.
    pub fn vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_item_spacing = spacing;
        self
    }

    /// Set both spacings at once.
    pub fn spacing(self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_spacing(horizontal).vertical_spacing(vertical)
    }

    /// Enable or disable layout rounding.
    pub fn layout_rounding(mut self, enabled: bool) -> Self {
        self.use_layout_rounding = enabled;
        self
    }

    /// Check that every setting is usable as given.
    ///
    /// Reports the first problem found. Layout itself never requires this to
    /// pass; see [`sanitized`](Self::sanitized) for what happens otherwise.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.maximum_column_count == 0 {
            return Err(LayoutError::InvalidColumnCount);
        }
        if self.maximum_column_count > MAX_COLUMNS {
            return Err(LayoutError::TooManyColumns {
                count: self.maximum_column_count,
                max: MAX_COLUMNS,
            });
        }
        if !is_positive_finite(self.maximum_column_width) {
            return Err(LayoutError::InvalidColumnWidth(self.maximum_column_width));
        }
        if !is_spacing(self.horizontal_item_spacing) || !is_spacing(self.vertical_item_spacing) {
            return Err(LayoutError::InvalidSpacing {
                horizontal: self.horizontal_item_spacing,
                vertical: self.vertical_item_spacing,
            });
        }
        Ok(())
    }

    /// Copy with invalid settings clamped.
    ///
    /// A zero column count or a non-positive / non-finite column width
    /// becomes `1`, and counts above [`MAX_COLUMNS`] become `MAX_COLUMNS`.
    /// Negative or non-finite spacing becomes `0`. Valid settings pass
    /// through untouched.
    pub fn sanitized(&self) -> Self {
        Self {
            maximum_column_width: if is_positive_finite(self.maximum_column_width) {
                self.maximum_column_width
            } else {
                1.0
            },
            maximum_column_count: self.maximum_column_count.clamp(1, MAX_COLUMNS),
            horizontal_item_spacing: sanitize_spacing(self.horizontal_item_spacing),
            vertical_item_spacing: sanitize_spacing(self.vertical_item_spacing),
            use_layout_rounding: self.use_layout_rounding,
        }
    }
}

fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn is_spacing(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn sanitize_spacing(v: f64) -> f64 {
    if is_spacing(v) { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let c = MasonryConfig::new(120.0, 5)
            .spacing(4.0, 6.0)
            .layout_rounding(true);
        assert_eq!(c.maximum_column_width, 120.0);
        assert_eq!(c.maximum_column_count, 5);
        assert_eq!(c.horizontal_item_spacing, 4.0);
        assert_eq!(c.vertical_item_spacing, 6.0);
        assert!(c.use_layout_rounding);
    }

    #[test]
    fn default_is_valid() {
        assert_eq!(MasonryConfig::default().validate(), Ok(()));
        assert_eq!(MasonryConfig::default().sanitized(), MasonryConfig::default());
    }

    #[test]
    fn validate_reports_zero_count() {
        assert_eq!(
            MasonryConfig::new(100.0, 0).validate(),
            Err(LayoutError::InvalidColumnCount)
        );
    }

    #[test]
    fn validate_reports_bad_width() {
        for w in [0.0, -5.0, f64::INFINITY] {
            assert_eq!(
                MasonryConfig::new(w, 2).validate(),
                Err(LayoutError::InvalidColumnWidth(w)),
                "width {w}"
            );
        }
        assert!(matches!(
            MasonryConfig::new(f64::NAN, 2).validate(),
            Err(LayoutError::InvalidColumnWidth(_))
        ));
    }

    #[test]
    fn validate_reports_bad_spacing() {
        assert_eq!(
            MasonryConfig::new(100.0, 2).spacing(-1.0, 0.0).validate(),
            Err(LayoutError::InvalidSpacing {
                horizontal: -1.0,
                vertical: 0.0
            })
        );
        assert!(
            MasonryConfig::new(100.0, 2)
                .vertical_spacing(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn huge_column_count_is_reported_and_clamped() {
        let c = MasonryConfig::new(100.0, usize::MAX);
        assert_eq!(
            c.validate(),
            Err(LayoutError::TooManyColumns {
                count: usize::MAX,
                max: MAX_COLUMNS
            })
        );
        assert_eq!(c.sanitized().maximum_column_count, MAX_COLUMNS);
        assert_eq!(MasonryConfig::new(100.0, MAX_COLUMNS).validate(), Ok(()));
    }

    #[test]
    fn sanitized_clamps_to_one() {
        let c = MasonryConfig::new(-3.0, 0).spacing(-2.0, f64::INFINITY).sanitized();
        assert_eq!(c.maximum_column_width, 1.0);
        assert_eq!(c.maximum_column_count, 1);
        assert_eq!(c.horizontal_item_spacing, 0.0);
        assert_eq!(c.vertical_item_spacing, 0.0);
        assert_eq!(c.validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let c: MasonryConfig =
            serde_json::from_str(r#"{"maximum_column_width": 180.0, "maximum_column_count": 2}"#)
                .unwrap();
        assert_eq!(c.maximum_column_width, 180.0);
        assert_eq!(c.maximum_column_count, 2);
        assert_eq!(
            c.horizontal_item_spacing,
            MasonryConfig::default().horizontal_item_spacing
        );
        assert!(!c.use_layout_rounding);
    }
}
