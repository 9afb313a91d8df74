//! Input tools and redraw scheduling.

pub mod pen;
pub mod redraw;

pub use pen::{
    FinishedStroke, Pen, PenTool, PenValidationError, PointerButton, PointerEvent, UsageError,
};
pub use redraw::{RedrawScheduler, DEFAULT_DELAY};
