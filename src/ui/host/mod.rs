//! Host lifecycle: binds the retained presenter to the live host instance.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern for the lifecycle itself:
//! - `state.rs` - Lifecycle state enum
//! - `intent.rs` - Platform and loader events
//! - `reducer.rs` - State transitions (pure, no side effects)
//!
//! [`ViewLifecycleHost`] runs the side effects around each dispatch: presenter
//! callbacks, view attach/detach, and the chain's start gate.
//!
//! # Start/delivery race
//!
//! The platform start callback and the presenter delivery arrive in either
//! order. A start without a presenter arms the chain's [`StartGate`]; the
//! delivery consumes it with a compare-and-swap and performs the start. A
//! start with a presenter starts right away and never touches the gate. Both
//! orders end with the view attached and `on_start` called once.
//!
//! [`StartGate`]: crate::loader::StartGate

mod contract;
mod events;
mod intent;
mod reducer;
mod state;

pub use contract::{HostContract, LaunchInput, LayoutId, SavedState};
pub use events::{HostEvent, HostEventQueue, HostEventSender, InstanceTarget};
pub use intent::HostIntent;
pub use reducer::HostReducer;
pub use state::{HostLifecycleState, ReadyPhase};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::component::AppComponent;
use crate::loader::{ChainId, Delivery, LoaderRegistry, PresenterLoader, RetentionError};
use crate::presenter::{attach_view, detach_view, Presenter, SharedPresenter};
use crate::ui::mvi::Reducer;
use crate::ui::view::{HostView, Overlay};

/// Process-unique id of one host instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostInstanceId(u64);

impl HostInstanceId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for HostInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Retention(#[from] RetentionError),
}

/// Shared resources every host is created with.
#[derive(Clone)]
pub struct HostEnvironment {
    pub registry: LoaderRegistry,
    pub component: AppComponent,
    pub overlay: Arc<dyn Overlay>,
}

type ViewOf<C> = <<C as HostContract>::Presenter as Presenter>::View;

/// One live host instance of a chain.
pub struct ViewLifecycleHost<C: HostContract> {
    contract: C,
    chain: ChainId,
    instance: HostInstanceId,
    state: HostLifecycleState,
    layout: LayoutId,
    host_view: HostView,
    view: ViewOf<C>,
    presenter: Option<SharedPresenter<C::Presenter>>,
    loader: Arc<PresenterLoader<C::Presenter>>,
    registry: LoaderRegistry,
}

impl<C: HostContract> ViewLifecycleHost<C> {
    /// Create a host instance and request its presenter.
    ///
    /// `saved` is `Some` when recreating an instance destroyed by
    /// [`Self::destroy_for_recreation`]; the chain's retained presenter is then
    /// reused. The presenter may already be delivered when this returns, or
    /// arrive later through `events`.
    pub fn create(
        mut contract: C,
        env: &HostEnvironment,
        events: &HostEventSender<C::Presenter>,
        saved: Option<SavedState>,
        launch: &LaunchInput,
    ) -> Result<Self, HostError> {
        let chain = saved.as_ref().map(SavedState::chain).unwrap_or_default();
        let instance = HostInstanceId::next();
        let config = env.component.config();

        contract.setup_component(&env.component);
        let layout = contract.content_view();
        let host_view = HostView::new(instance, Arc::clone(&env.overlay), config.view());
        let view = contract.bind_view(host_view.clone());

        let (loader, fresh_chain) =
            env.registry
                .get_or_init(chain, || contract.presenter_factory())?;

        let mut host = Self {
            contract,
            chain,
            instance,
            state: HostLifecycleState::default(),
            layout,
            host_view,
            view,
            presenter: None,
            loader,
            registry: env.registry.clone(),
        };
        tracing::debug!(
            chain = %chain,
            instance = %instance,
            layout = %layout,
            fresh_chain,
            "Host created"
        );
        host.dispatch(HostIntent::Created);

        let target = events.target_for(instance);
        let delivery = host
            .loader
            .start_loading(&target, config.delivery_policy())?;
        if let Delivery::Immediate(presenter) = delivery {
            host.on_presenter_delivered(presenter);
        }

        host.contract.on_view_ready(saved.as_ref(), launch);
        Ok(host)
    }

    /// Platform start callback.
    pub fn on_start(&mut self) {
        if self.state.is_finished() {
            tracing::debug!(instance = %self.instance, "Start after finish ignored");
            return;
        }
        if self.state.host_started() {
            tracing::debug!(instance = %self.instance, "Duplicate start ignored");
            return;
        }

        self.dispatch(HostIntent::Started);
        match self.presenter.clone() {
            Some(presenter) => self.start_presenter(&presenter),
            None => {
                self.loader.start_gate().arm();
                tracing::debug!(
                    instance = %self.instance,
                    "Host started before presenter delivery, start deferred"
                );
            }
        }
    }

    /// Platform stop callback.
    ///
    /// Stops and detaches the presenter if it was started. Stopping before
    /// delivery only cancels the pending start. The host's spinner is
    /// dismissed either way.
    pub fn on_stop(&mut self) {
        if self.state.is_finished() {
            return;
        }

        if self.state.is_started() {
            self.stop_presenter();
        } else if self.state.is_waiting() {
            self.loader.start_gate().disarm();
        }

        self.host_view.dismiss();
        self.dispatch(HostIntent::Stopped);
    }

    /// The loader handed over the presenter.
    pub fn on_presenter_delivered(&mut self, presenter: SharedPresenter<C::Presenter>) {
        if self.state.is_finished() {
            tracing::debug!(instance = %self.instance, "Delivery after finish ignored");
            return;
        }

        self.presenter = Some(Arc::clone(&presenter));
        self.loader.mark_delivered();
        self.dispatch(HostIntent::PresenterDelivered);

        if self.loader.start_gate().try_consume() {
            self.start_presenter(&presenter);
        }
    }

    /// The loader dropped the presenter; forget the local handle.
    ///
    /// A started presenter is stopped and detached first. The host itself is
    /// still started, so the start gate is armed and the next delivery starts
    /// the presenter again.
    pub fn on_presenter_reset(&mut self) {
        if self.state.is_finished() {
            return;
        }
        if self.state.is_started() {
            self.stop_presenter();
            self.loader.start_gate().arm();
        }
        self.presenter = None;
        self.dispatch(HostIntent::PresenterReset);
    }

    /// Permanently finish the chain.
    ///
    /// Stops a started presenter, destroys it through the loader and removes
    /// the chain from the registry. Every later event is ignored.
    pub fn finish(&mut self) {
        if self.state.is_finished() {
            return;
        }
        if self.state.host_started() {
            self.on_stop();
        }

        self.loader.destroy();
        self.registry.remove(self.chain);
        self.on_presenter_reset();
        self.dispatch(HostIntent::Finished);
        tracing::info!(chain = %self.chain, instance = %self.instance, "Host chain finished");
    }

    /// Destroy this instance for recreation, keeping the presenter retained.
    ///
    /// Returns the state the successor instance must be created with.
    pub fn destroy_for_recreation(mut self) -> SavedState {
        if self.state.host_started() {
            self.on_stop();
        }
        let mut saved = SavedState::new(self.chain);
        self.contract.on_save_state(&mut saved);
        tracing::debug!(
            chain = %self.chain,
            instance = %self.instance,
            "Host destroyed for recreation"
        );
        saved
    }

    /// Dispatch an event taken from the host's queue.
    pub fn handle_event(&mut self, event: HostEvent<C::Presenter>) {
        match event {
            HostEvent::Started => self.on_start(),
            HostEvent::Stopped => self.on_stop(),
            HostEvent::PresenterDelivered {
                instance,
                presenter,
            } => {
                if instance != self.instance {
                    tracing::warn!(
                        target_instance = %instance,
                        instance = %self.instance,
                        "Stale presenter delivery ignored"
                    );
                    return;
                }
                self.on_presenter_delivered(presenter);
            }
            HostEvent::PresenterReset => self.on_presenter_reset(),
            HostEvent::Finished => self.finish(),
        }
    }

    pub fn state(&self) -> HostLifecycleState {
        self.state
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn instance(&self) -> HostInstanceId {
        self.instance
    }

    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    /// The presenter handle, between delivery and reset.
    pub fn presenter(&self) -> Option<&SharedPresenter<C::Presenter>> {
        self.presenter.as_ref()
    }

    /// The feature view handle of this instance.
    pub fn view(&self) -> &ViewOf<C> {
        &self.view
    }

    pub fn host_view(&self) -> &HostView {
        &self.host_view
    }

    pub fn contract(&self) -> &C {
        &self.contract
    }

    pub fn contract_mut(&mut self) -> &mut C {
        &mut self.contract
    }

    fn stop_presenter(&self) {
        if let Some(presenter) = &self.presenter {
            let mut presenter = presenter.lock();
            presenter.on_stop();
            detach_view(&mut *presenter);
        }
        tracing::debug!(chain = %self.chain, instance = %self.instance, "Presenter stopped");
    }

    fn start_presenter(&mut self, presenter: &SharedPresenter<C::Presenter>) {
        let first_start = self.loader.take_first_start();
        let mut presenter = presenter.lock();
        attach_view(&mut *presenter, self.view.clone());
        presenter.on_start(first_start);
        tracing::debug!(
            chain = %self.chain,
            instance = %self.instance,
            first_start,
            "Presenter started"
        );
    }

    fn dispatch(&mut self, intent: HostIntent) {
        let previous = self.state;
        if HostReducer::apply(&mut self.state, intent) {
            tracing::trace!(
                instance = %self.instance,
                ?intent,
                from = ?previous,
                to = ?self.state,
                "Host transition"
            );
        }
    }
}
