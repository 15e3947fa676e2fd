//! The single modal spinner a host owns.

use std::sync::Arc;

use super::overlay::Overlay;

#[derive(Debug)]
struct Spinner {
    message: String,
    showing: bool,
}

/// Loading indicator owned by one host instance.
///
/// The spinner is created on first show and reused afterwards; showing it
/// again only replaces the message. `hide` is idempotent.
pub struct LoadingIndicator {
    overlay: Arc<dyn Overlay>,
    spinner: Option<Spinner>,
}

impl LoadingIndicator {
    pub fn new(overlay: Arc<dyn Overlay>) -> Self {
        Self {
            overlay,
            spinner: None,
        }
    }

    pub fn show(&mut self, message: &str) {
        let spinner = self.spinner.get_or_insert_with(|| Spinner {
            message: String::new(),
            showing: false,
        });
        spinner.message.clear();
        spinner.message.push_str(message);
        spinner.showing = true;
        self.overlay.show_spinner(message);
    }

    /// Dismiss the spinner if it is showing. Returns `true` if it was.
    pub fn hide(&mut self) -> bool {
        match self.spinner.as_mut() {
            Some(spinner) if spinner.showing => {
                spinner.showing = false;
                self.overlay.dismiss_spinner();
                true
            }
            _ => false,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.spinner.as_ref().is_some_and(|s| s.showing)
    }

    /// Message of the showing spinner.
    pub fn message(&self) -> Option<&str> {
        self.spinner
            .as_ref()
            .filter(|s| s.showing)
            .map(|s| s.message.as_str())
    }
}
