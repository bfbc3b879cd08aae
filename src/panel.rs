//! The masonry panel and the host-facing layout traits.
//!
//! A host drives layout in two phases. [`Panel::measure`] asks every child
//! for its size at the column width and reports how tall the panel wants to
//! be. [`Panel::arrange`] then places every child, using the sizes from the
//! measure phase, and reports the final size back unchanged.
//!
//! # Example
//!
//! ```
//! use zenmasonry::{MasonryConfig, MasonryPanel, Panel, Size, Tile};
//!
//! let panel = MasonryPanel::new(MasonryConfig::new(100.0, 2).spacing(0.0, 5.0));
//! let mut tiles = vec![
//!     Tile::fixed(50.0),
//!     Tile::fixed(30.0),
//!     Tile::fixed(20.0),
//!     Tile::fixed(40.0),
//! ];
//!
//! let desired = panel.measure(&mut tiles, Size::new(200.0, f64::INFINITY));
//! assert_eq!(desired, Size::new(200.0, 105.0));
//!
//! panel.arrange(&mut tiles, desired);
//! let placed = tiles[3].placed().unwrap();
//! assert_eq!((placed.x, placed.y), (0.0, 60.0));
//! ```

use alloc::vec::Vec;

use num_traits::Float;

use crate::columns::{Breakpoints, ColumnGeometry, ColumnState};
use crate::config::MasonryConfig;
use crate::geometry::{Point, Rect, Size};

/// A single child the panel can lay out.
pub trait Element {
    /// Measure against `constraint` and remember the result as the desired size.
    fn measure(&mut self, constraint: Size) -> Size;
    /// Size recorded by the last [`measure`](Self::measure).
    fn desired_size(&self) -> Size;
    /// Accept the final placement rectangle.
    fn arrange(&mut self, rect: Rect);
}

/// An ordered, host-owned child collection.
///
/// The panel only reads the count and calls the per-child primitives; it
/// never adds or removes children.
pub trait Children {
    /// Number of children.
    fn len(&self) -> usize;

    /// Whether there are no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Measure child `index` against `constraint`.
    fn measure(&mut self, index: usize, constraint: Size) -> Size;

    /// Desired size of child `index` from its last measure.
    fn desired_size(&self, index: usize) -> Size;

    /// Place child `index` at `rect`.
    fn arrange(&mut self, index: usize, rect: Rect);
}

impl<E: Element> Children for [E] {
    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    fn measure(&mut self, index: usize, constraint: Size) -> Size {
        self[index].measure(constraint)
    }

    fn desired_size(&self, index: usize) -> Size {
        self[index].desired_size()
    }

    fn arrange(&mut self, index: usize, rect: Rect) {
        self[index].arrange(rect);
    }
}

impl<E: Element> Children for Vec<E> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn measure(&mut self, index: usize, constraint: Size) -> Size {
        self[index].measure(constraint)
    }

    fn desired_size(&self, index: usize) -> Size {
        self[index].desired_size()
    }

    fn arrange(&mut self, index: usize, rect: Rect) {
        self[index].arrange(rect);
    }
}

/// Two-phase layout contract between a host framework and a panel.
pub trait Panel {
    /// Measure every child and return the panel's desired size.
    fn measure<C: Children + ?Sized>(&self, children: &mut C, available: Size) -> Size;

    /// Place every child and return the size actually used.
    fn arrange<C: Children + ?Sized>(&self, children: &mut C, final_size: Size) -> Size;
}

/// Result of a host-free layout pass over pre-measured sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Column width and offsets used for the pass.
    pub geometry: ColumnGeometry,
    /// Placement rectangle per item, in input order.
    pub rects: Vec<Rect>,
    /// Column each item went into, in input order.
    pub columns: Vec<usize>,
    /// Final height of every column.
    pub column_heights: Vec<f64>,
    /// Width reported for the panel and height of the tallest column.
    pub size: Size,
}

/// Masonry ("waterfall") panel.
///
/// Items go, in order, into whichever column is currently shortest. The
/// column count follows the available width: one more column every
/// `maximum_column_width` units, up to `maximum_column_count`.
///
/// The panel keeps the configuration and a breakpoint cache. Everything
/// else is rebuilt from scratch by each pass, so `measure` and `arrange`
/// take `&self` and are idempotent.
#[derive(Clone, Debug)]
pub struct MasonryPanel {
    config: MasonryConfig,
    breakpoints: Breakpoints,
}

impl Default for MasonryPanel {
    fn default() -> Self {
        Self::new(MasonryConfig::default())
    }
}

impl MasonryPanel {
    /// Create a panel. Invalid settings are clamped during layout.
    pub fn new(config: MasonryConfig) -> Self {
        warn_if_invalid(&config);
        Self {
            breakpoints: Breakpoints::new(&config),
            config,
        }
    }

    /// Current configuration, as set.
    pub fn config(&self) -> &MasonryConfig {
        &self.config
    }

    /// Cached column breakpoints.
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Recompute the breakpoint cache from the current configuration.
    ///
    /// Every setter that changes the column limits calls this.
    pub fn invalidate_breakpoints(&mut self) {
        self.breakpoints = Breakpoints::new(&self.config);
    }

    /// Replace the whole configuration. Returns `true` if anything changed.
    pub fn set_config(&mut self, config: MasonryConfig) -> bool {
        if config == self.config {
            return false;
        }
        warn_if_invalid(&config);
        self.config = config;
        self.invalidate_breakpoints();
        true
    }

    /// Returns `true` if the value changed.
    pub fn set_maximum_column_width(&mut self, width: f64) -> bool {
        if width == self.config.maximum_column_width {
            return false;
        }
        self.config.maximum_column_width = width;
        warn_if_invalid(&self.config);
        self.invalidate_breakpoints();
        true
    }

    /// Returns `true` if the value changed.
    pub fn set_maximum_column_count(&mut self, count: usize) -> bool {
        if count == self.config.maximum_column_count {
            return false;
        }
        self.config.maximum_column_count = count;
        warn_if_invalid(&self.config);
        self.invalidate_breakpoints();
        true
    }

    /// Returns `true` if the value changed.
    pub fn set_horizontal_item_spacing(&mut self, spacing: f64) -> bool {
        if spacing == self.config.horizontal_item_spacing {
            return false;
        }
        self.config.horizontal_item_spacing = spacing;
        warn_if_invalid(&self.config);
        true
    }

    /// Returns `true` if the value changed.
    pub fn set_vertical_item_spacing(&mut self, spacing: f64) -> bool {
        if spacing == self.config.vertical_item_spacing {
            return false;
        }
        self.config.vertical_item_spacing = spacing;
        warn_if_invalid(&self.config);
        true
    }

    /// Returns `true` if the value changed.
    pub fn set_use_layout_rounding(&mut self, enabled: bool) -> bool {
        if enabled == self.config.use_layout_rounding {
            return false;
        }
        self.config.use_layout_rounding = enabled;
        true
    }

    /// Column count for an available width.
    pub fn column_count(&self, available_width: f64) -> usize {
        self.breakpoints.column_count(sanitize_available(available_width))
    }

    /// Column width and offsets for an available width.
    pub fn column_geometry(&self, available_width: f64) -> ColumnGeometry {
        let width = sanitize_available(available_width);
        ColumnGeometry::resolve(self.breakpoints.column_count(width), width, &self.config)
    }

    /// Lay out already-measured sizes without a host.
    ///
    /// Produces the same rectangles [`arrange`](Panel::arrange) would hand to
    /// children whose desired sizes are `sizes`.
    pub fn layout(&self, sizes: &[Size], available_width: f64) -> Placement {
        let mut pass = Pass::begin(self, available_width);
        let mut rects = Vec::with_capacity(sizes.len());
        let mut columns = Vec::with_capacity(sizes.len());
        for (index, &size) in sizes.iter().enumerate() {
            let column = pass.next_column();
            let rect = pass.place(index, size);
            columns.push(column);
            rects.push(rect);
        }
        let size = Size::new(pass.reported_width(available_width), pass.state.tallest());
        pass.finish("layout", sizes.len(), size);
        Placement {
            geometry: pass.geometry,
            rects,
            columns,
            column_heights: pass.state.heights().to_vec(),
            size,
        }
    }
}

impl Panel for MasonryPanel {
    fn measure<C: Children + ?Sized>(&self, children: &mut C, available: Size) -> Size {
        let mut pass = Pass::begin(self, available.width);
        let constraint = Size::with_unbounded_height(pass.geometry.column_width);
        for index in 0..children.len() {
            let desired = children.measure(index, constraint);
            pass.grow(pass.next_column(), desired.height);
        }
        let size = Size::new(pass.reported_width(available.width), pass.state.tallest());
        pass.finish("measure", children.len(), size);
        size
    }

    fn arrange<C: Children + ?Sized>(&self, children: &mut C, final_size: Size) -> Size {
        let mut pass = Pass::begin(self, final_size.width);
        for index in 0..children.len() {
            let rect = pass.place(index, children.desired_size(index));
            children.arrange(index, rect);
        }
        pass.finish("arrange", children.len(), final_size);
        final_size
    }
}

/// State for one measure, arrange or layout call.
struct Pass {
    geometry: ColumnGeometry,
    state: ColumnState,
    rounding: bool,
}

impl Pass {
    fn begin(panel: &MasonryPanel, available_width: f64) -> Self {
        let config = panel.config.sanitized();
        let geometry = panel.column_geometry(available_width);
        let state = ColumnState::new(geometry.column_count(), config.vertical_item_spacing);
        Self {
            geometry,
            state,
            rounding: config.use_layout_rounding,
        }
    }

    fn next_column(&self) -> usize {
        self.state.shortest_column()
    }

    /// Add an item to `column` and return its new height.
    fn grow(&mut self, column: usize, height: f64) -> f64 {
        let height = if height.is_nan() || height < 0.0 {
            0.0
        } else if self.rounding {
            Float::round(height)
        } else {
            height
        };
        self.state.add_height(column, height)
    }

    /// Anchor item `index` at the top of the shortest column, then grow it.
    fn place(&mut self, index: usize, desired: Size) -> Rect {
        let column = self.next_column();
        let anchor = Point::new(self.geometry.offsets[column], self.state.heights()[column]);
        tracing::trace!(index, column, x = anchor.x, y = anchor.y, "placing item");
        self.grow(column, desired.height);
        Rect::from_origin_size(anchor, desired)
    }

    /// Width the panel reports: the available width, or the content width
    /// when the available width is unbounded. Negative and NaN widths act as `0`.
    fn reported_width(&self, available_width: f64) -> f64 {
        if available_width == f64::INFINITY {
            self.geometry.content_width()
        } else {
            sanitize_available(available_width)
        }
    }

    fn finish(&self, phase: &'static str, items: usize, size: Size) {
        tracing::debug!(
            phase,
            items,
            columns = self.geometry.column_count(),
            column_width = self.geometry.column_width,
            width = size.width,
            height = size.height,
            "masonry pass complete"
        );
    }
}

fn sanitize_available(width: f64) -> f64 {
    if width.is_nan() || width < 0.0 {
        0.0
    } else {
        width
    }
}

fn warn_if_invalid(config: &MasonryConfig) {
    if let Err(err) = config.validate() {
        tracing::warn!(%err, "invalid masonry configuration; clamping");
    }
}

/// A simple [`Element`] with a fixed height or a fixed aspect ratio.
///
/// Fixed tiles take the full column width and a constant height. Aspect
/// tiles (photos, cards with media) take the full column width and derive
/// their height from `width / ratio`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    sizing: TileSizing,
    desired: Size,
    placed: Option<Rect>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum TileSizing {
    Fixed(f64),
    Aspect(f64),
}

impl Tile {
    /// Tile with a constant height.
    pub fn fixed(height: f64) -> Self {
        Self::with_sizing(TileSizing::Fixed(height))
    }

    /// Tile whose height is `column width / ratio` (ratio = width / height).
    pub fn aspect(ratio: f64) -> Self {
        Self::with_sizing(TileSizing::Aspect(ratio))
    }

    fn with_sizing(sizing: TileSizing) -> Self {
        Self {
            sizing,
            desired: Size::ZERO,
            placed: None,
        }
    }

    /// Rect from the last arrange, if any.
    pub fn placed(&self) -> Option<Rect> {
        self.placed
    }
}

impl Element for Tile {
    fn measure(&mut self, constraint: Size) -> Size {
        let width = if constraint.width.is_finite() {
            constraint.width
        } else {
            0.0
        };
        let height = match self.sizing {
            TileSizing::Fixed(h) => h.max(0.0),
            TileSizing::Aspect(ratio) if ratio > 0.0 => width / ratio,
            TileSizing::Aspect(_) => 0.0,
        };
        self.desired = Size::new(width, height.min(constraint.height));
        self.desired
    }

    fn desired_size(&self) -> Size {
        self.desired
    }

    fn arrange(&mut self, rect: Rect) {
        self.placed = Some(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn fixed_tiles(heights: &[f64]) -> Vec<Tile> {
        heights.iter().map(|&h| Tile::fixed(h)).collect()
    }

    fn scenario_panel() -> MasonryPanel {
        MasonryPanel::new(MasonryConfig::new(100.0, 3).spacing(10.0, 5.0))
    }

    #[test]
    fn measure_two_column_scenario() {
        let panel = MasonryPanel::new(MasonryConfig::new(100.0, 2).vertical_spacing(5.0));
        let mut tiles = fixed_tiles(&[50.0, 30.0, 20.0, 40.0]);
        let desired = panel.measure(&mut tiles, Size::new(250.0, 500.0));
        assert_eq!(desired, Size::new(250.0, 105.0));
    }

    #[test]
    fn arrange_two_column_scenario() {
        let panel = MasonryPanel::new(MasonryConfig::new(100.0, 2).vertical_spacing(5.0));
        let mut tiles = fixed_tiles(&[50.0, 30.0, 20.0, 40.0]);
        let desired = panel.measure(&mut tiles, Size::new(250.0, 500.0));
        let used = panel.arrange(&mut tiles, desired);
        assert_eq!(used, desired);

        let placed: Vec<Rect> = tiles.iter().map(|t| t.placed().unwrap()).collect();
        assert_eq!(placed[0], Rect::new(0.0, 5.0, 100.0, 50.0));
        assert_eq!(placed[1], Rect::new(100.0, 5.0, 100.0, 30.0));
        assert_eq!(placed[2], Rect::new(100.0, 40.0, 100.0, 20.0));
        assert_eq!(placed[3], Rect::new(0.0, 60.0, 100.0, 40.0));
    }

    #[test]
    fn measure_passes_column_width_constraint() {
        struct Probe {
            seen: Vec<Size>,
        }
        impl Element for Probe {
            fn measure(&mut self, constraint: Size) -> Size {
                self.seen.push(constraint);
                Size::new(10.0, 10.0)
            }
            fn desired_size(&self) -> Size {
                Size::new(10.0, 10.0)
            }
            fn arrange(&mut self, _rect: Rect) {}
        }

        let panel = scenario_panel();
        let mut probes = vec![Probe { seen: Vec::new() }];
        panel.measure(&mut probes, Size::new(330.0, 100.0));
        let c = probes[0].seen[0];
        assert!((c.width - 290.0 / 3.0).abs() < 1e-9);
        assert!(c.height.is_infinite());
    }

    #[test]
    fn arrange_uses_desired_size_not_column_width() {
        let panel = MasonryPanel::new(MasonryConfig::new(100.0, 1));
        let mut tiles = fixed_tiles(&[20.0]);
        panel.measure(&mut tiles, Size::new(100.0, 100.0));
        // Arrange at a different width than measure: rect keeps the measured size.
        panel.arrange(&mut tiles, Size::new(60.0, 100.0));
        assert_eq!(tiles[0].placed(), Some(Rect::new(0.0, 0.0, 100.0, 20.0)));
    }

    #[test]
    fn measure_is_idempotent() {
        let panel = scenario_panel();
        let mut tiles = fixed_tiles(&[12.0, 80.0, 33.0, 7.0, 64.0]);
        let first = panel.measure(&mut tiles, Size::new(330.0, 800.0));
        let second = panel.measure(&mut tiles, Size::new(330.0, 800.0));
        assert_eq!(first, second);
    }

    #[test]
    fn empty_children_report_zero_height() {
        let panel = scenario_panel();
        let mut tiles: Vec<Tile> = Vec::new();
        assert_eq!(
            panel.measure(&mut tiles, Size::new(330.0, 100.0)),
            Size::new(330.0, 0.0)
        );
        assert_eq!(
            panel.arrange(&mut tiles, Size::new(330.0, 100.0)),
            Size::new(330.0, 100.0)
        );
    }

    #[test]
    fn slices_work_as_children() {
        let panel = scenario_panel();
        let mut tiles = fixed_tiles(&[10.0, 20.0]);
        let desired = panel.measure(tiles.as_mut_slice(), Size::new(90.0, 100.0));
        assert_eq!(desired, Size::new(90.0, 45.0));
    }

    #[test]
    fn setters_invalidate_breakpoints() {
        let mut panel = scenario_panel();
        assert_eq!(panel.breakpoints().as_slice(), &[0.0, 100.0, 200.0]);

        assert!(panel.set_maximum_column_width(50.0));
        assert_eq!(panel.breakpoints().as_slice(), &[0.0, 50.0, 100.0]);

        assert!(panel.set_maximum_column_count(4));
        assert_eq!(panel.breakpoints().as_slice(), &[0.0, 50.0, 100.0, 150.0]);

        assert!(!panel.set_maximum_column_count(4));
        assert!(panel.set_horizontal_item_spacing(2.0));
        assert!(panel.set_vertical_item_spacing(1.0));
        assert!(panel.set_use_layout_rounding(true));
        assert_eq!(panel.breakpoints().as_slice(), &[0.0, 50.0, 100.0, 150.0]);
    }

    #[test]
    fn huge_column_count_does_not_abort_layout() {
        let mut panel = MasonryPanel::new(MasonryConfig::new(100.0, usize::MAX));
        assert_eq!(panel.breakpoints().maximum_column_count(), crate::MAX_COLUMNS);
        let placement = panel.layout(&[Size::new(100.0, 10.0)], 250.0);
        assert_eq!(placement.geometry.column_count(), 3);

        assert!(panel.set_maximum_column_count(2));
        assert!(panel.set_maximum_column_count(usize::MAX));
        assert!(panel.set_config(MasonryConfig::new(50.0, usize::MAX - 1)));
        assert_eq!(panel.breakpoints().maximum_column_count(), crate::MAX_COLUMNS);
    }

    #[test]
    fn set_config_replaces_everything() {
        let mut panel = scenario_panel();
        let config = MasonryConfig::new(40.0, 2);
        assert!(panel.set_config(config));
        assert!(!panel.set_config(config));
        assert_eq!(panel.config(), &config);
        assert_eq!(panel.breakpoints().as_slice(), &[0.0, 40.0]);
    }

    #[test]
    fn invalid_config_still_lays_out() {
        let panel = MasonryPanel::new(MasonryConfig::new(0.0, 0).spacing(-4.0, f64::NAN));
        let mut tiles = fixed_tiles(&[10.0, 10.0]);
        let desired = panel.measure(&mut tiles, Size::new(300.0, 100.0));
        assert_eq!(desired, Size::new(300.0, 20.0));
        assert_eq!(panel.column_count(300.0), 1);
    }

    #[test]
    fn unbounded_width_reports_content_width() {
        let panel = scenario_panel();
        let mut tiles = fixed_tiles(&[10.0]);
        let desired = panel.measure(&mut tiles, Size::new(f64::INFINITY, f64::INFINITY));
        assert_eq!(desired, Size::new(340.0, 20.0));
    }

    #[test]
    fn unusable_widths_report_zero() {
        let panel = scenario_panel();
        for w in [-5.0, f64::NAN, f64::NEG_INFINITY] {
            let mut tiles = fixed_tiles(&[10.0]);
            let desired = panel.measure(&mut tiles, Size::new(w, 100.0));
            assert_eq!(desired, Size::new(0.0, 20.0), "width {w}");
            assert_eq!(panel.layout(&[Size::new(0.0, 10.0)], w).size.width, 0.0, "width {w}");
        }
    }

    #[test]
    fn negative_heights_count_as_zero() {
        let panel = MasonryPanel::new(MasonryConfig::new(100.0, 1).vertical_spacing(5.0));
        let sizes = [
            Size::new(100.0, -30.0),
            Size::new(100.0, f64::NAN),
            Size::new(100.0, 10.0),
        ];
        let placement = panel.layout(&sizes, 100.0);
        let ys: Vec<f64> = placement.rects.iter().map(|r| r.y).collect();
        assert_eq!(ys, [5.0, 10.0, 15.0]);
        assert_eq!(placement.size.height, 30.0);
    }

    #[test]
    fn rounding_snaps_heights() {
        let panel = MasonryPanel::new(
            MasonryConfig::new(100.0, 1)
                .vertical_spacing(2.0)
                .layout_rounding(true),
        );
        let placement = panel.layout(&[Size::new(100.0, 10.4), Size::new(100.0, 10.6)], 100.0);
        assert_eq!(placement.rects[1].y, 14.0);
        assert_eq!(placement.size.height, 27.0);
    }

    #[test]
    fn layout_matches_arrange() {
        let panel = scenario_panel();
        let mut tiles = fixed_tiles(&[40.0, 15.0, 90.0, 25.0, 60.0, 5.0]);
        let desired = panel.measure(&mut tiles, Size::new(330.0, 1000.0));
        panel.arrange(&mut tiles, desired);

        let sizes: Vec<Size> = tiles.iter().map(|t| t.desired_size()).collect();
        let placement = panel.layout(&sizes, 330.0);
        let arranged: Vec<Rect> = tiles.iter().map(|t| t.placed().unwrap()).collect();
        assert_eq!(placement.rects, arranged);
        assert_eq!(placement.size, desired);
        assert_eq!(placement.column_heights.len(), 3);
    }

    #[test]
    fn fewer_items_than_columns_leave_empty_columns() {
        let panel = scenario_panel();
        let placement = panel.layout(&[Size::new(50.0, 30.0)], 330.0);
        assert_eq!(placement.columns, [0]);
        assert_eq!(placement.column_heights, [40.0, 5.0, 5.0]);
    }

    #[test]
    fn aspect_tiles_follow_column_width() {
        let mut tile = Tile::aspect(2.0);
        assert_eq!(
            tile.measure(Size::with_unbounded_height(120.0)),
            Size::new(120.0, 60.0)
        );
        let mut flat = Tile::aspect(0.0);
        assert_eq!(
            flat.measure(Size::with_unbounded_height(120.0)),
            Size::new(120.0, 0.0)
        );
    }
}
