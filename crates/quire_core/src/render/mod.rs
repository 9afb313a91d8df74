//! Drawing surface abstraction.
//!
//! # Responsibility
//! - Define the `Surface` contract the document model and tools draw onto.
//! - Provide a recording implementation for headless use and tests.
//!
//! # Invariants
//! - Surfaces are passive: drawing never mutates document state.
//! - `clear` resets content but keeps the configured size.

pub mod dpi;
pub mod paper;

/// Host-provided drawing target.
///
/// Coordinates are device-independent pixels with the origin at the top-left.
/// Colors are CSS color strings, passed through untouched.
pub trait Surface {
    /// Current surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resizes the surface. Implementations discard existing content.
    fn set_size(&mut self, width: u32, height: u32);

    /// Resolution used by background patterns.
    fn dpi(&self) -> f64 {
        dpi::display_dpi()
    }

    /// Clears the whole surface.
    fn clear(&mut self);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);

    /// Strokes an open polyline given as a flat `[x0, y0, x1, y1, ...]` run.
    fn polyline(&mut self, points: &[f64], color: &str, width: f64);

    /// Strokes a single segment. Used for incremental drawing while a
    /// stroke is being captured, so the surface is never cleared mid-stroke.
    fn segment(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64);

    /// Draws centered status text. Cosmetic only; headless surfaces may
    /// record it without rendering glyphs.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: String,
    },
    Polyline {
        points: Vec<f64>,
        color: String,
        width: f64,
    },
    Segment {
        from: (f64, f64),
        to: (f64, f64),
        color: String,
        width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
    },
}

/// Surface that records every drawing call instead of rasterizing.
///
/// Backs headless operation and lets tests assert on exact draw sequences.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    dpi: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            dpi: dpi::display_dpi(),
            ops: Vec::new(),
        }
    }

    /// Overrides the probed DPI, for deterministic pattern geometry.
    pub fn with_dpi(width: u32, height: u32, dpi: f64) -> Self {
        Self {
            width,
            height,
            dpi,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Ops recorded since the last `Clear`, or all ops if never cleared.
    pub fn ops_since_clear(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn dpi(&self) -> f64 {
        self.dpi
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }

    fn polyline(&mut self, points: &[f64], color: &str, width: f64) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            color: color.to_string(),
            width,
        });
    }

    fn segment(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
        self.ops.push(DrawOp::Segment {
            from,
            to,
            color: color.to_string(),
            width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}
