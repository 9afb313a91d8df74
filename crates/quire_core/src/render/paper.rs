//! Paper background patterns.
//!
//! Pure draw routines, no state. Geometry scales with the surface DPI so a
//! page keeps its printed proportions at any resolution.

use super::Surface;

const MARGIN_RULE_COLOR: &str = "rgba(192, 64, 64, 0.25)";
const LINE_COLOR: &str = "rgba(64, 64, 192, 0.25)";
const GRID_COLOR: &str = "rgba(32, 96, 32, 0.25)";

const MARGIN_RULE_WIDTH: f64 = 3.0;
const LINE_WIDTH: f64 = 2.0;

/// Ruled paper: a vertical margin rule, then the full lined pattern on
/// top. Every lined guide appears on ruled paper at the same position.
pub fn draw_ruled(surface: &mut dyn Surface) {
    let (_, height) = surface.size();
    let margin = 0.8 * surface.dpi();
    surface.fill_rect(
        margin - MARGIN_RULE_WIDTH / 2.0,
        0.0,
        MARGIN_RULE_WIDTH,
        f64::from(height),
        MARGIN_RULE_COLOR,
    );
    draw_lined(surface);
}

/// Lined paper: horizontal guides every fifth of an inch, starting one
/// inch from the top.
pub fn draw_lined(surface: &mut dyn Surface) {
    let (width, height) = surface.size();
    let dpi = surface.dpi();
    let spacing = dpi / 5.0;
    let half = LINE_WIDTH / 2.0;
    let mut y = dpi;
    while y < f64::from(height) {
        surface.fill_rect(0.0, y - half, f64::from(width), LINE_WIDTH, LINE_COLOR);
        y += spacing;
    }
}

/// Grid paper: vertical then horizontal guides every fifth of an inch.
pub fn draw_grid(surface: &mut dyn Surface) {
    let (width, height) = surface.size();
    let dpi = surface.dpi();
    let spacing = dpi / 5.0;
    let half = LINE_WIDTH / 2.0;
    let mut x = spacing;
    while x < f64::from(width) {
        surface.fill_rect(x - half, 0.0, LINE_WIDTH, f64::from(height), GRID_COLOR);
        x += spacing;
    }
    let mut y = spacing;
    while y < f64::from(height) {
        surface.fill_rect(0.0, y - half, f64::from(width), LINE_WIDTH, GRID_COLOR);
        y += spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::{draw_grid, draw_lined, draw_ruled};
    use crate::render::{DrawOp, RecordingSurface, Surface};

    fn colors(surface: &RecordingSurface) -> Vec<&str> {
        surface
            .ops()
            .iter()
            .map(|op| match op {
                DrawOp::FillRect { color, .. } => color.as_str(),
                other => panic!("unexpected op: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn lined_draws_one_guide_per_spacing_step() {
        let mut surface = RecordingSurface::with_dpi(100, 200, 100.0);
        draw_lined(&mut surface);
        // Guides at y = 100, 120, 140, 160, 180.
        assert_eq!(surface.ops().len(), 5);
        assert!(colors(&surface)
            .iter()
            .all(|color| *color == super::LINE_COLOR));
    }

    #[test]
    fn ruled_is_margin_rule_plus_lined() {
        let mut ruled = RecordingSurface::with_dpi(100, 200, 100.0);
        draw_ruled(&mut ruled);

        let mut lined = RecordingSurface::with_dpi(100, 200, 100.0);
        draw_lined(&mut lined);

        assert_eq!(colors(&ruled)[0], super::MARGIN_RULE_COLOR);
        assert_eq!(&ruled.ops()[1..], lined.ops());
    }

    #[test]
    fn grid_draws_both_directions() {
        let mut surface = RecordingSurface::with_dpi(60, 40, 100.0);
        draw_grid(&mut surface);
        // Vertical at x = 20, 40; horizontal at y = 20.
        assert_eq!(surface.ops().len(), 3);
        assert!(colors(&surface)
            .iter()
            .all(|color| *color == super::GRID_COLOR));
    }
}
