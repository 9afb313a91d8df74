//! Stroke item: a colored polyline captured from the pen.
//!
//! # Invariants
//! - `points` is a flat `[x0, y0, x1, y1, ...]` run; its length is even.
//! - `width` is finite and strictly positive.
//! - A stroke with no points draws nothing; a single point draws a filled
//!   square of side `width` centered on it (the single-click dot case).

use super::item::{DeserializeError, DeserializeResult, Item};
use crate::render::Surface;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag used in the serialized form.
pub const KIND: &str = "stroke";

/// Serialized field layout shared by the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StrokeFields {
    color: String,
    width: f64,
    points: Vec<f64>,
}

/// A freehand polyline (or dot) with one color and width.
#[derive(Debug, Clone)]
pub struct Stroke {
    color: String,
    width: f64,
    points: Vec<f64>,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            points: Vec::new(),
        }
    }

    /// Builds a stroke from an already-captured flat coordinate run.
    ///
    /// A trailing unpaired coordinate is dropped to keep the even-length
    /// invariant.
    pub fn with_points(color: impl Into<String>, width: f64, mut points: Vec<f64>) -> Self {
        if points.len() % 2 != 0 {
            points.pop();
        }
        Self {
            color: color.into(),
            width,
            points,
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Flat coordinate run.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of coordinate pairs.
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.points.push(x);
        self.points.push(y);
    }

    /// Registry deserializer for the `stroke` tag.
    pub fn from_value(value: &Value) -> DeserializeResult<Box<dyn Item>> {
        let fields: StrokeFields = serde_json::from_value(value.clone())
            .map_err(|err| DeserializeError::Malformed(format!("stroke item: {err}")))?;
        if !(fields.width.is_finite() && fields.width > 0.0) {
            return Err(DeserializeError::Malformed(format!(
                "stroke width must be positive, got {}",
                fields.width
            )));
        }
        if fields.points.len() % 2 != 0 {
            return Err(DeserializeError::Malformed(format!(
                "stroke point run has odd length {}",
                fields.points.len()
            )));
        }
        Ok(Box::new(Self {
            color: fields.color,
            width: fields.width,
            points: fields.points,
        }))
    }

    /// Draws a flat coordinate run with the dot special case. Shared with
    /// the in-progress overlay, which renders paths that are not yet
    /// strokes.
    pub fn draw_path(surface: &mut dyn Surface, points: &[f64], color: &str, width: f64) {
        match points.len() / 2 {
            0 => {}
            1 => {
                let half = width / 2.0;
                surface.fill_rect(points[0] - half, points[1] - half, width, width, color);
            }
            _ => surface.polyline(points, color, width),
        }
    }
}

impl Item for Stroke {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn draw(&self, surface: &mut dyn Surface) {
        Self::draw_path(surface, &self.points, &self.color, self.width);
    }

    fn to_value(&self) -> Value {
        serde_json::json!({
            "color": self.color,
            "width": self.width,
            "points": self.points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, Stroke};
    use crate::render::{DrawOp, RecordingSurface};
    use serde_json::json;

    #[test]
    fn empty_stroke_draws_nothing() {
        let mut surface = RecordingSurface::new(100, 100);
        Stroke::new("#000", 4.0).draw(&mut surface);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn single_point_draws_centered_square() {
        let mut surface = RecordingSurface::new(100, 100);
        Stroke::with_points("#000", 4.0, vec![10.0, 20.0]).draw(&mut surface);
        assert_eq!(
            surface.ops(),
            &[DrawOp::FillRect {
                x: 8.0,
                y: 18.0,
                width: 4.0,
                height: 4.0,
                color: "#000".to_string(),
            }]
        );
    }

    #[test]
    fn multi_point_stroke_draws_one_polyline() {
        let mut surface = RecordingSurface::new(100, 100);
        Stroke::with_points("red", 2.0, vec![0.0, 0.0, 5.0, 5.0, 9.0, 1.0]).draw(&mut surface);
        assert_eq!(
            surface.ops(),
            &[DrawOp::Polyline {
                points: vec![0.0, 0.0, 5.0, 5.0, 9.0, 1.0],
                color: "red".to_string(),
                width: 2.0,
            }]
        );
    }

    #[test]
    fn from_value_rejects_odd_point_run() {
        let value = json!({"type": "stroke", "color": "#000", "width": 1.0, "points": [1.0, 2.0, 3.0]});
        assert!(Stroke::from_value(&value).is_err());
    }

    #[test]
    fn from_value_rejects_non_positive_width() {
        let value = json!({"type": "stroke", "color": "#000", "width": 0.0, "points": []});
        assert!(Stroke::from_value(&value).is_err());
    }
}
