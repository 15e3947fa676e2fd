//! Boundary to whatever actually draws spinners and toasts.

use crate::config::ToastDuration;

/// Rendering backend for the generic view primitives.
pub trait Overlay: Send + Sync {
    fn show_spinner(&self, message: &str);

    fn dismiss_spinner(&self);

    fn show_toast(&self, message: &str, duration: ToastDuration);
}

/// Overlay that only emits tracing events. Used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOverlay;

impl Overlay for TracingOverlay {
    fn show_spinner(&self, message: &str) {
        tracing::info!(target: "tline::overlay", text = message, "Spinner shown");
    }

    fn dismiss_spinner(&self) {
        tracing::info!(target: "tline::overlay", "Spinner dismissed");
    }

    fn show_toast(&self, message: &str, duration: ToastDuration) {
        tracing::info!(target: "tline::overlay", text = message, ?duration, "Toast");
    }
}
