//! Display resolution probe.
//!
//! The hosting environment's DPI cannot change within a process lifetime,
//! so the probe runs once and the result is memoized in an explicitly
//! scoped cell rather than a mutable static.

use once_cell::sync::OnceCell;

const DEFAULT_DPI: f64 = 96.0;

static DISPLAY_DPI: OnceCell<f64> = OnceCell::new();

/// Returns the display resolution in dots per inch.
///
/// Probed from the `QUIRE_DPI` environment variable on first call and
/// cached for the rest of the process. Values that are missing, unparsable
/// or not strictly positive fall back to 96.
pub fn display_dpi() -> f64 {
    *DISPLAY_DPI.get_or_init(probe_environment)
}

fn probe_environment() -> f64 {
    std::env::var("QUIRE_DPI")
        .ok()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|dpi| dpi.is_finite() && *dpi > 0.0)
        .unwrap_or(DEFAULT_DPI)
}
