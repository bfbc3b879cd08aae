//! Column geometry and per-pass column bookkeeping.
//!
//! Three pieces, used in this order by every pass:
//!
//! - [`Breakpoints`] turns an available width into a column count.
//! - [`ColumnGeometry`] turns a column count into a column width and offsets.
//! - [`ColumnState`] tracks running heights and the shortest column while
//!   items are placed.

use alloc::vec::Vec;

use num_traits::Float;

use crate::config::{MAX_COLUMNS, MasonryConfig};
use crate::error::LayoutError;

/// Widths at which the column count steps up.
///
/// `breakpoint[i] = i * maximum_column_width` for `i` in
/// `0..maximum_column_count`. Built from a sanitized config, so the sequence
/// is never empty and strictly increasing from `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints {
    breaks: Vec<f64>,
}

impl Breakpoints {
    /// Compute breakpoints for a config. Invalid settings are clamped first.
    pub fn new(config: &MasonryConfig) -> Self {
        let config = config.sanitized();
        let breaks = (0..config.maximum_column_count)
            .map(|i| i as f64 * config.maximum_column_width)
            .collect();
        Self { breaks }
    }

    /// The breakpoint widths, ascending.
    pub fn as_slice(&self) -> &[f64] {
        &self.breaks
    }

    /// Highest column count these breakpoints produce.
    pub fn maximum_column_count(&self) -> usize {
        self.breaks.len()
    }

    /// Number of columns for an available width.
    ///
    /// The first breakpoint strictly above the width wins; past the last one
    /// the count is capped at the maximum. Always in `1..=maximum`.
    pub fn column_count(&self, available_width: f64) -> usize {
        let max = self.maximum_column_count();
        self.breaks
            .iter()
            .position(|&b| available_width < b)
            .unwrap_or(max)
            .clamp(1, max)
    }
}

/// Resolved column width and x-offsets for one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnGeometry {
    /// Width shared by every column.
    pub column_width: f64,
    /// Left edge of each column.
    pub offsets: Vec<f64>,
    /// Gutter width used to compute the offsets.
    pub spacing: f64,
}

impl ColumnGeometry {
    /// Split `available_width` into `column_count` columns with gutters.
    ///
    /// Gutters sit before the first column, between columns and after the
    /// last. The remainder is shared evenly but capped at the configured
    /// maximum width. When the gutters alone exceed the available width the
    /// column width is clamped to `0`.
    pub fn resolve(column_count: usize, available_width: f64, config: &MasonryConfig) -> Self {
        match Self::try_resolve(column_count, available_width, config) {
            Ok(geometry) => geometry,
            Err(err) => {
                tracing::warn!(%err, column_count, available_width, "clamping column width to zero");
                Self::with_width(column_count.clamp(1, MAX_COLUMNS), 0.0, config)
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but reports
    /// [`LayoutError::DegenerateWidth`] instead of clamping.
    pub fn try_resolve(
        column_count: usize,
        available_width: f64,
        config: &MasonryConfig,
    ) -> Result<Self, LayoutError> {
        let config = config.sanitized();
        let count = column_count.clamp(1, MAX_COLUMNS);
        let gutters = (count + 1) as f64 * config.horizontal_item_spacing;
        let raw = (available_width - gutters) / count as f64;
        if raw < 0.0 {
            return Err(LayoutError::DegenerateWidth {
                available: available_width,
                gutters,
            });
        }
        let mut column_width = raw.min(config.maximum_column_width);
        if config.use_layout_rounding {
            column_width = Float::floor(column_width);
        }
        Ok(Self::with_width(count, column_width, &config))
    }

    fn with_width(column_count: usize, column_width: f64, config: &MasonryConfig) -> Self {
        let spacing = config.sanitized().horizontal_item_spacing;
        let offsets = (0..column_count)
            .map(|i| {
                let x = spacing * (i + 1) as f64 + column_width * i as f64;
                if config.use_layout_rounding {
                    Float::round(x)
                } else {
                    x
                }
            })
            .collect();
        Self {
            column_width,
            offsets,
            spacing,
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.offsets.len()
    }

    /// Width actually covered by columns and gutters.
    ///
    /// Equals the available width unless the columns hit their maximum width.
    pub fn content_width(&self) -> f64 {
        let n = self.column_count() as f64;
        n * self.column_width + (n + 1.0) * self.spacing
    }
}

/// Running column heights for one pass.
///
/// Every column starts at the vertical spacing. Each added item grows its
/// column by `height + vertical spacing`, after which the shortest column is
/// rescanned (lowest index wins ties) and the tallest height is updated.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnState {
    heights: Vec<f64>,
    vertical_spacing: f64,
    shortest: usize,
    tallest: f64,
}

impl ColumnState {
    /// Fresh state for `column_count` columns, clamped to `1..=MAX_COLUMNS`.
    pub fn new(column_count: usize, vertical_spacing: f64) -> Self {
        Self {
            heights: alloc::vec![vertical_spacing; column_count.clamp(1, MAX_COLUMNS)],
            vertical_spacing,
            shortest: 0,
            tallest: 0.0,
        }
    }

    /// Current height of every column.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Column that receives the next item.
    pub fn shortest_column(&self) -> usize {
        self.shortest
    }

    /// Height of the tallest column written so far; `0` before any item.
    pub fn tallest(&self) -> f64 {
        self.tallest
    }

    /// Grow `column` by an item of `height` and return its new height.
    ///
    /// # Panics
    ///
    /// If `column` is out of range.
    pub fn add_height(&mut self, column: usize, height: f64) -> f64 {
        let grown = self.heights[column] + height + self.vertical_spacing;
        self.heights[column] = grown;
        if grown > self.tallest {
            self.tallest = grown;
        }

        let mut lowest = self.heights[0];
        self.shortest = 0;
        for (i, &h) in self.heights.iter().enumerate().skip(1) {
            if h < lowest {
                lowest = h;
                self.shortest = i;
            }
        }
        grown
    }
}
