//! Layout problems.
//!
//! Layout passes never fail: the panel clamps and logs instead. These values
//! surface through the strict entry points ([`MasonryConfig::validate`],
//! [`ColumnGeometry::try_resolve`]) for hosts that want to reject bad input
//! up front.
//!
//! [`MasonryConfig::validate`]: crate::MasonryConfig::validate
//! [`ColumnGeometry::try_resolve`]: crate::ColumnGeometry::try_resolve

use thiserror::Error;

/// A configuration or sizing problem detected during layout.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    /// `maximum_column_count` is zero.
    #[error("maximum column count must be at least 1")]
    InvalidColumnCount,
    /// `maximum_column_count` is above [`MAX_COLUMNS`](crate::config::MAX_COLUMNS).
    #[error("maximum column count {count} exceeds the limit of {max}")]
    TooManyColumns { count: usize, max: usize },
    /// `maximum_column_width` is zero, negative or not finite.
    #[error("maximum column width must be positive and finite, got {0}")]
    InvalidColumnWidth(f64),
    /// An item spacing is negative or not finite.
    #[error("item spacing must be non-negative and finite, got horizontal {horizontal}, vertical {vertical}")]
    InvalidSpacing { horizontal: f64, vertical: f64 },
    /// Gutters alone take more room than is available.
    #[error("gutters need {gutters} but only {available} is available")]
    DegenerateWidth { available: f64, gutters: f64 },
}
