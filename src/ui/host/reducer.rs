//! Reducer for the host lifecycle.

use crate::ui::mvi::Reducer;

use super::intent::HostIntent;
use super::state::{HostLifecycleState, ReadyPhase};

/// Pure host lifecycle transitions.
///
/// Presenter callbacks, the start gate and view attachment are handled by
/// [`super::ViewLifecycleHost`] around each dispatch.
pub struct HostReducer;

impl Reducer for HostReducer {
    type State = HostLifecycleState;
    type Intent = HostIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        use HostLifecycleState::*;

        match (state, intent) {
            (Finished, _) => Finished,
            (_, HostIntent::Finished) => Finished,

            (Creating, HostIntent::Created) => WaitingForPresenter {
                host_started: false,
            },
            (Creating, _) => Creating,

            (WaitingForPresenter { .. }, HostIntent::Started) => WaitingForPresenter {
                host_started: true,
            },
            (WaitingForPresenter { .. }, HostIntent::Stopped) => WaitingForPresenter {
                host_started: false,
            },
            (WaitingForPresenter { host_started }, HostIntent::PresenterDelivered) => {
                if host_started {
                    Ready(ReadyPhase::Started)
                } else {
                    Ready(ReadyPhase::Idle)
                }
            }
            (waiting @ WaitingForPresenter { .. }, _) => waiting,

            (Ready(_), HostIntent::Started) => Ready(ReadyPhase::Started),
            (Ready(ReadyPhase::Started), HostIntent::Stopped) => Ready(ReadyPhase::Stopped),
            (Ready(phase), HostIntent::PresenterReset) => WaitingForPresenter {
                host_started: phase == ReadyPhase::Started,
            },
            (ready @ Ready(_), _) => ready,
        }
    }
}
