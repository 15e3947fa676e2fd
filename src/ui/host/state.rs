//! State for the host lifecycle.

use crate::ui::mvi::UiState;

/// Where a ready host is in its start/stop cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyPhase {
    /// Presenter delivered, host not started yet.
    Idle,
    Started,
    Stopped,
}

/// Host lifecycle overlaid with presenter readiness.
///
/// `Creating → WaitingForPresenter → Ready(Idle | Started | Stopped) → Finished`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostLifecycleState {
    #[default]
    Creating,

    /// Loading requested, presenter not delivered yet.
    WaitingForPresenter {
        /// The host started before delivery; the start is pending.
        host_started: bool,
    },

    Ready(ReadyPhase),

    /// Permanently finished. Terminal.
    Finished,
}

impl UiState for HostLifecycleState {}

impl HostLifecycleState {
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::WaitingForPresenter { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Presenter started and view attached.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Ready(ReadyPhase::Started))
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// The host itself is between a platform start and stop, whether or not
    /// the presenter has caught up.
    pub fn host_started(&self) -> bool {
        matches!(
            self,
            Self::WaitingForPresenter { host_started: true } | Self::Ready(ReadyPhase::Started)
        )
    }
}
