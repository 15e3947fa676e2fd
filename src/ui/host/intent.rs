//! Intents for the host lifecycle.

use crate::ui::mvi::Intent;

/// Events that move a host through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostIntent {
    /// Host built and loading requested.
    Created,

    /// Platform start callback.
    Started,

    /// Platform stop callback.
    Stopped,

    /// The loader handed over the presenter.
    PresenterDelivered,

    /// The loader dropped the presenter.
    PresenterReset,

    /// The host chain ends for good.
    Finished,
}

impl Intent for HostIntent {}
