//! Model-View-Intent primitives for the lifecycle state machines.
//!
//! A reducer maps `(state, intent)` to the next state and nothing else; the
//! owner of the state runs presenter callbacks and view work around
//! [`Reducer::apply`].

/// Lifecycle state value. Copied through reducers and compared to detect
/// transitions.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Platform or loader event fed to a reducer.
pub trait Intent: Send + 'static {}

pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Pure transition function.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Reduce in place. Returns `true` if the state changed.
    fn apply(state: &mut Self::State, intent: Self::Intent) -> bool {
        let previous = state.clone();
        *state = Self::reduce(std::mem::take(state), intent);
        *state != previous
    }

    /// Fold a sequence of intents, starting from `state`.
    fn reduce_all<I>(state: Self::State, intents: I) -> Self::State
    where
        I: IntoIterator<Item = Self::Intent>,
    {
        intents.into_iter().fold(state, Self::reduce)
    }
}
