//! Generic view contract shared by every feature view.
//!
//! Each host instance owns one [`HostView`]: its loading indicator plus the
//! overlay used for transient messages. Feature views wrap it and get the
//! whole [`BaseView`] contract from the default methods.

mod loading;
mod overlay;

pub use loading::LoadingIndicator;
pub use overlay::{Overlay, TracingOverlay};

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ViewConfig;
use crate::ui::host::HostInstanceId;

/// View primitives every presenter can rely on.
pub trait BaseView {
    /// The host primitives backing this view.
    fn host_view(&self) -> &HostView;

    /// Show the spinner with the default loading message.
    fn show_loading(&self) {
        let host = self.host_view();
        host.spin(&host.config().loading_message);
    }

    fn show_loading_with(&self, message: &str) {
        self.host_view().spin(message);
    }

    fn hide_loading(&self) {
        self.host_view().dismiss();
    }

    fn show_error_with_message(&self, text: &str) {
        self.show_toast(text);
    }

    fn show_error_loading(&self) {
        let message = self.host_view().config().error_loading_message.clone();
        self.show_toast(&message);
    }

    fn show_toast(&self, message: &str) {
        self.host_view().toast(message);
    }

    fn show_network_error(&self) {
        let message = self.host_view().config().no_network_message.clone();
        self.show_toast(&message);
    }
}

struct HostViewInner {
    instance: HostInstanceId,
    overlay: Arc<dyn Overlay>,
    loading: Mutex<LoadingIndicator>,
    config: ViewConfig,
}

/// Per-host view primitives. Clones share the same host resources.
#[derive(Clone)]
pub struct HostView {
    inner: Arc<HostViewInner>,
}

impl HostView {
    pub fn new(instance: HostInstanceId, overlay: Arc<dyn Overlay>, config: ViewConfig) -> Self {
        Self {
            inner: Arc::new(HostViewInner {
                instance,
                loading: Mutex::new(LoadingIndicator::new(Arc::clone(&overlay))),
                overlay,
                config,
            }),
        }
    }

    /// Host instance this view belongs to.
    pub fn instance(&self) -> HostInstanceId {
        self.inner.instance
    }

    pub fn config(&self) -> &ViewConfig {
        &self.inner.config
    }

    pub fn is_loading(&self) -> bool {
        self.inner.loading.lock().is_showing()
    }

    pub fn loading_message(&self) -> Option<String> {
        self.inner.loading.lock().message().map(str::to_owned)
    }

    /// Show the spinner until the returned guard is dropped.
    pub fn loading_scope(&self, message: &str) -> LoadingGuard {
        self.spin(message);
        LoadingGuard { view: self.clone() }
    }

    /// True if both handles belong to the same host instance.
    pub fn same_host(&self, other: &HostView) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn spin(&self, message: &str) {
        self.inner.loading.lock().show(message);
    }

    /// Idempotent; returns `true` if a spinner was dismissed.
    pub(crate) fn dismiss(&self) -> bool {
        self.inner.loading.lock().hide()
    }

    pub(crate) fn toast(&self, message: &str) {
        self.inner
            .overlay
            .show_toast(message, self.inner.config.toast_duration);
    }
}

impl BaseView for HostView {
    fn host_view(&self) -> &HostView {
        self
    }
}

impl fmt::Debug for HostView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostView")
            .field("instance", &self.inner.instance)
            .field("loading", &self.is_loading())
            .finish()
    }
}

/// Dismisses the spinner when dropped.
#[must_use = "the spinner is dismissed as soon as the guard is dropped"]
pub struct LoadingGuard {
    view: HostView,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.view.dismiss();
    }
}
