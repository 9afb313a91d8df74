//! Pen tool: the stroke-capture state machine.
//!
//! # Responsibility
//! - Turn a stream of pointer events into a filtered point sequence.
//! - Drive incremental drawing while the stroke is forming.
//!
//! # Invariants
//! - Idle → Drawing only on a primary-button press while enabled.
//! - After the first accepted move, every further candidate must be more
//!   than `size / 2` away from the last accepted point (squared-distance
//!   comparison, no square root).
//! - The tool never touches the document; it hands the finished point
//!   sequence to whoever owns the page.

use crate::model::stroke::Stroke;
use crate::render::Surface;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepts hex colors, bare color names, and rgb()/rgba()/hsl()/hsla()
/// functional notation. Loose on purpose: the surface consumes the string
/// verbatim, this only has to catch obvious configuration mistakes.
static CSS_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#[0-9a-fA-F]{3,8}|[a-zA-Z]+|(rgb|rgba|hsl|hsla)\([0-9.,%\s]+\))$")
        .unwrap_or_else(|err| panic!("color pattern must compile: {err}"))
});

/// Pen configuration rejected at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum PenValidationError {
    EmptyColor,
    InvalidColor(String),
    NonFiniteSize,
    NonPositiveSize(f64),
    /// Stored pen text that is not `<color>:<size>`.
    MalformedStorageText(String),
}

impl Display for PenValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyColor => write!(f, "pen color cannot be empty"),
            Self::InvalidColor(color) => write!(f, "pen color is not a CSS color: `{color}`"),
            Self::NonFiniteSize => write!(f, "pen size must be a finite number"),
            Self::NonPositiveSize(size) => write!(f, "pen size must be positive, got {size}"),
            Self::MalformedStorageText(text) => {
                write!(f, "stored pen text is not `color:size`: `{text}`")
            }
        }
    }
}

impl Error for PenValidationError {}

/// Contract violation: reading capture state that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    NotDrawing,
}

impl Display for UsageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDrawing => write!(f, "not drawing, no points"),
        }
    }
}

impl Error for UsageError {}

/// Transient drawing configuration. Editing state, never document state.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    color: String,
    size: f64,
    /// `(size / 2)²`, precomputed for the sampling comparison.
    half_size_sq: f64,
}

impl Pen {
    pub const DEFAULT_COLOR: &'static str = "rgb(0, 0, 0)";
    pub const DEFAULT_SIZE: f64 = 3.0;

    pub fn new(color: impl Into<String>, size: f64) -> Result<Self, PenValidationError> {
        let color = color.into();
        if color.trim().is_empty() {
            return Err(PenValidationError::EmptyColor);
        }
        if !CSS_COLOR.is_match(color.trim()) {
            return Err(PenValidationError::InvalidColor(color));
        }
        if !size.is_finite() {
            return Err(PenValidationError::NonFiniteSize);
        }
        if size <= 0.0 {
            return Err(PenValidationError::NonPositiveSize(size));
        }
        Ok(Self {
            color,
            size,
            half_size_sq: (size / 2.0) * (size / 2.0),
        })
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Squared minimum distance between consecutive accepted points.
    pub fn min_distance_sq(&self) -> f64 {
        self.half_size_sq
    }

    /// Parses the `<color>:<size>` storage form.
    pub fn parse(text: &str) -> Result<Self, PenValidationError> {
        let (color, size) = text
            .rsplit_once(':')
            .ok_or_else(|| PenValidationError::MalformedStorageText(text.to_string()))?;
        let size: f64 = size
            .trim()
            .parse()
            .map_err(|_| PenValidationError::MalformedStorageText(text.to_string()))?;
        Self::new(color.trim(), size)
    }

    /// `<color>:<size>` storage form.
    pub fn to_storage_string(&self) -> String {
        format!("{}:{}", self.color, self.size)
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR.to_string(),
            size: Self::DEFAULT_SIZE,
            half_size_sq: (Self::DEFAULT_SIZE / 2.0) * (Self::DEFAULT_SIZE / 2.0),
        }
    }
}

/// Pointer button identifier. Only the primary button starts a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// Surface-relative pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64, button: PointerButton },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave,
}

/// Emitted when a stroke finishes: the accepted points plus the pen
/// settings they were captured with.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedStroke {
    pub points: Vec<f64>,
    pub color: String,
    pub width: f64,
}

struct ActivePath {
    points: Vec<f64>,
    last: (f64, f64),
    /// The first move after the press is accepted without the distance
    /// check; filtering starts from the second.
    moved: bool,
}

/// Stroke-capture state machine. Idle when `path` is `None`, Drawing
/// otherwise; it cycles between the two for the life of the tool.
pub struct PenTool {
    pen: Pen,
    path: Option<ActivePath>,
    enabled: bool,
}

impl PenTool {
    pub fn new(pen: Pen) -> Self {
        Self {
            pen,
            path: None,
            enabled: true,
        }
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Swaps the pen settings. An in-progress path keeps its captured
    /// points; only subsequent drawing uses the new pen.
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling mid-stroke discards the in-progress path.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel();
        }
        self.enabled = enabled;
    }

    pub fn is_drawing(&self) -> bool {
        self.path.is_some()
    }

    /// In-progress accepted points.
    ///
    /// # Errors
    /// Returns [`UsageError::NotDrawing`] outside an active stroke; that is
    /// a programming-contract violation, not a condition to retry.
    pub fn points(&self) -> Result<&[f64], UsageError> {
        self.path
            .as_ref()
            .map(|path| path.points.as_slice())
            .ok_or(UsageError::NotDrawing)
    }

    /// Feeds one pointer event through the state machine.
    ///
    /// Returns the finished stroke when this event completed one. Drawing
    /// while capturing is incremental: a dot on press, one segment per
    /// accepted point, never a full clear.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        surface: &mut dyn Surface,
    ) -> Option<FinishedStroke> {
        match event {
            PointerEvent::Down { x, y, button } => {
                if !self.enabled || self.path.is_some() || button != PointerButton::Primary {
                    return None;
                }
                self.path = Some(ActivePath {
                    points: vec![x, y],
                    last: (x, y),
                    moved: false,
                });
                let size = self.pen.size();
                let half = size / 2.0;
                surface.fill_rect(x - half, y - half, size, size, self.pen.color());
                None
            }
            PointerEvent::Move { x, y } => {
                if self.path.is_some() {
                    self.accept_point(x, y, surface);
                }
                None
            }
            PointerEvent::Up { x, y } => {
                if self.path.is_none() {
                    return None;
                }
                self.accept_point(x, y, surface);
                self.finish()
            }
            PointerEvent::Leave => {
                if self.path.is_none() {
                    return None;
                }
                self.finish()
            }
        }
    }

    /// Discards the in-progress path without emitting a finished stroke.
    pub fn cancel(&mut self) {
        self.path = None;
    }

    fn finish(&mut self) -> Option<FinishedStroke> {
        let path = self.path.take()?;
        Some(FinishedStroke {
            points: path.points,
            color: self.pen.color().to_string(),
            width: self.pen.size(),
        })
    }

    /// Sampling policy: identical candidates are always dropped; after the
    /// first accepted move, candidates within the pen's minimum distance
    /// are dropped too. Accepted points extend the current path segment.
    fn accept_point(&mut self, x: f64, y: f64, surface: &mut dyn Surface) {
        let Some(path) = self.path.as_mut() else {
            return;
        };
        if (x, y) == path.last {
            return;
        }
        if path.moved {
            let (dx, dy) = (path.last.0 - x, path.last.1 - y);
            if dx * dx + dy * dy <= self.pen.min_distance_sq() {
                return;
            }
        }
        surface.segment(path.last, (x, y), self.pen.color(), self.pen.size());
        path.points.push(x);
        path.points.push(y);
        path.last = (x, y);
        path.moved = true;
    }

    /// Draws the in-progress path as an overlay during a full redraw.
    pub fn draw_overlay(&self, surface: &mut dyn Surface) {
        if let Some(path) = &self.path {
            Stroke::draw_path(surface, &path.points, self.pen.color(), self.pen.size());
        }
    }
}

impl Default for PenTool {
    fn default() -> Self {
        Self::new(Pen::default())
    }
}
