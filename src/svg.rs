//! SVG visualization of a masonry placement.
//!
//! Draws the panel background, one strip per column, and every placed item
//! numbered in placement order. Handy for eyeballing breakpoints and gutter
//! settings.
//!
//! # Example
//!
//! ```
//! use zenmasonry::{MasonryConfig, MasonryPanel, Size, svg::render_placement_svg};
//!
//! let panel = MasonryPanel::new(MasonryConfig::new(100.0, 3).spacing(10.0, 5.0));
//! let sizes = [Size::new(96.0, 50.0), Size::new(96.0, 80.0), Size::new(96.0, 20.0)];
//! let placement = panel.layout(&sizes, 330.0);
//!
//! let svg = render_placement_svg(&placement);
//! assert!(svg.starts_with("<svg"));
//! ```

use crate::panel::Placement;

/// Maximum drawing width for the panel.
const MAX_PANEL_W: f64 = 480.0;
/// Maximum drawing height for the panel.
const MAX_PANEL_H: f64 = 640.0;
/// Margin around the panel.
const MARGIN: f64 = 30.0;
/// Height of the caption above the panel.
const LABEL_H: f64 = 22.0;

/// Render a complete SVG document for a [`Placement`].
pub fn render_placement_svg(placement: &Placement) -> String {
    let extent_w = placement.size.width.max(placement.geometry.content_width());
    let extent_h = placement
        .size
        .height
        .max(placement.column_heights.iter().copied().fold(0.0, f64::max));
    let (pw, ph, scale) = scale_to_fit(extent_w, extent_h);

    let total_w = pw + 2.0 * MARGIN;
    let total_h = ph + 2.0 * MARGIN + LABEL_H;
    let panel_x = MARGIN;
    let panel_y = MARGIN + LABEL_H;

    let mut svg = String::with_capacity(2048 + placement.rects.len() * 160);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w.ceil() as u32,
        total_h.ceil() as u32,
        total_w,
        total_h
    ));
    svg.push('\n');

    // Light/dark mode via prefers-color-scheme
    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .index { font-size: 10px; fill: #fff; }
  .panel { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .column { fill: #d6d6d6; }
  .item { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .panel { fill: #2d2d2d; stroke: #555; }
    .column { fill: #3a3a3a; }
    .item { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##);

    let label = format!(
        "{} columns × {:.1}  {:.1}×{:.1}",
        placement.geometry.column_count(),
        placement.geometry.column_width,
        placement.size.width,
        placement.size.height
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        MARGIN + 14.0,
        escape_xml(&label)
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="panel" rx="2"/>"#,
        panel_x, panel_y, pw, ph
    ));
    svg.push('\n');

    for &offset in &placement.geometry.offsets {
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="column"/>"#,
            panel_x + offset * scale,
            panel_y,
            placement.geometry.column_width * scale,
            ph
        ));
        svg.push('\n');
    }

    for (i, rect) in placement.rects.iter().enumerate() {
        let x = panel_x + rect.x * scale;
        let y = panel_y + rect.y * scale;
        let w = rect.width.max(0.0) * scale;
        let h = rect.height.max(0.0) * scale;
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="item" rx="1"/>"#
        ));
        svg.push('\n');
        if h >= 12.0 {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="index">{i}</text>"#,
                x + 3.0,
                y + 11.0
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Scale an extent to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(w: f64, h: f64) -> (f64, f64, f64) {
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 {
        return (MAX_PANEL_W, MAX_PANEL_H, 1.0);
    }
    if h <= 0.0 {
        let scale = MAX_PANEL_W / w;
        return (MAX_PANEL_W, 1.0, scale);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
