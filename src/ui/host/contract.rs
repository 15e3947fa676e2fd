//! What a feature screen supplies to its host.

use std::collections::BTreeMap;
use std::fmt;

use crate::component::AppComponent;
use crate::loader::ChainId;
use crate::presenter::{BoxedPresenterFactory, Presenter};
use crate::ui::view::HostView;

/// Static identifier of a screen layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutId(pub &'static str);

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// State handed from a host destroyed for recreation to its successor.
///
/// Carries the chain identity plus whatever the feature stored in
/// [`HostContract::on_save_state`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedState {
    chain: ChainId,
    values: BTreeMap<String, String>,
}

impl SavedState {
    pub(crate) fn new(chain: ChainId) -> Self {
        Self {
            chain,
            values: BTreeMap::new(),
        }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Arguments the screen was launched with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchInput {
    extras: BTreeMap<String, String>,
}

impl LaunchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }
}

/// Feature-specific half of a host.
///
/// Call order on creation: `setup_component`, `content_view`, `bind_view`,
/// `presenter_factory` (first instance of a chain only), `on_view_ready`.
pub trait HostContract {
    type Presenter: Presenter;

    /// Factory for the chain's presenter. Called once per chain.
    fn presenter_factory(&self) -> BoxedPresenterFactory<Self::Presenter>;

    /// Pull feature dependencies out of the app component. Called once per
    /// host instance.
    fn setup_component(&mut self, component: &AppComponent);

    fn content_view(&self) -> LayoutId;

    /// Build the view handle the presenter will see for this host instance.
    fn bind_view(&mut self, base: HostView) -> <Self::Presenter as Presenter>::View;

    fn on_view_ready(&mut self, _saved: Option<&SavedState>, _launch: &LaunchInput) {}

    /// Store feature values for the successor instance. Called by
    /// `destroy_for_recreation` after the host has stopped.
    fn on_save_state(&self, _state: &mut SavedState) {}
}
