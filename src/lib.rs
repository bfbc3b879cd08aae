//! Masonry ("waterfall") multi-column panel layout.
//!
//! Pure geometry, no rendering. A host UI framework hands the panel its
//! children and an available size; the panel picks a column count from the
//! width, then drops each child into the currently shortest column.
//!
//! # Modules
//!
//! - [`config`]: Panel settings, validation and the clamp policy
//! - [`columns`]: Breakpoints, column width/offsets, per-pass column heights
//! - [`panel`]: Host traits and the two-phase measure/arrange engine
//! - [`geometry`]: Size, point and rect types
//! - `svg`: Placement visualization (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod columns;
pub mod config;
pub mod error;
pub mod geometry;
pub mod panel;

#[cfg(feature = "svg")]
pub mod svg;

pub use columns::{Breakpoints, ColumnGeometry, ColumnState};
pub use config::{MAX_COLUMNS, MasonryConfig};
pub use error::LayoutError;
pub use geometry::{Point, Rect, Size};
pub use panel::{Children, Element, MasonryPanel, Panel, Placement, Tile};
