//! Shared test utilities: a recording presenter, its host contract and an
//! environment wired to a recording overlay.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tline::component::AppComponent;
use tline::config::{Config, ConfigStore, ToastDuration};
use tline::loader::LoaderRegistry;
use tline::presenter::{BoxedPresenterFactory, Presenter, ViewSlot};
use tline::ui::host::{
    HostContract, HostEnvironment, HostEventQueue, HostInstanceId, LaunchInput, LayoutId,
    SavedState, ViewLifecycleHost,
};
use tline::ui::view::{BaseView, HostView, Overlay};

pub const PROBE_LAYOUT: LayoutId = LayoutId("activity_probe");

// -- Presenter ----------------------------------------------------------------

/// Presenter callback as observed by the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Attached(HostInstanceId),
    Start(bool),
    Stop,
    Detached,
    Destroyed,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

#[derive(Clone, Debug)]
pub struct ProbeView {
    pub base: HostView,
}

impl BaseView for ProbeView {
    fn host_view(&self) -> &HostView {
        &self.base
    }
}

pub struct ProbePresenter {
    pub serial: usize,
    slot: ViewSlot<ProbeView>,
    log: CallLog,
    /// Message shown as spinner on every start, if set.
    pub loading_on_start: Option<String>,
}

impl Presenter for ProbePresenter {
    type View = ProbeView;

    fn view_slot(&self) -> &ViewSlot<ProbeView> {
        &self.slot
    }

    fn view_slot_mut(&mut self) -> &mut ViewSlot<ProbeView> {
        &mut self.slot
    }

    fn on_view_attached(&mut self) {
        let instance = self
            .view()
            .map(|v| v.base.instance())
            .expect("view attached before on_view_attached");
        self.log.lock().push(Call::Attached(instance));
    }

    fn on_start(&mut self, first_start: bool) {
        self.log.lock().push(Call::Start(first_start));
        if let (Some(message), Some(view)) = (&self.loading_on_start, self.view()) {
            view.show_loading_with(message);
        }
    }

    fn on_stop(&mut self) {
        assert!(self.view().is_some(), "view must stay attached during on_stop");
        self.log.lock().push(Call::Stop);
    }

    fn on_view_detached(&mut self) {
        self.log.lock().push(Call::Detached);
    }

    fn on_presenter_destroyed(&mut self) {
        self.log.lock().push(Call::Destroyed);
    }
}

// -- Host contract ------------------------------------------------------------

#[derive(Default, Clone)]
pub struct Counters {
    /// Presenters built by the factory.
    pub presenters_built: Arc<AtomicUsize>,
    /// Times the host asked its contract for a factory.
    pub factories_requested: Arc<AtomicUsize>,
}

impl Counters {
    pub fn presenters_built(&self) -> usize {
        self.presenters_built.load(Ordering::SeqCst)
    }

    pub fn factories_requested(&self) -> usize {
        self.factories_requested.load(Ordering::SeqCst)
    }
}

pub struct ProbeHost {
    log: CallLog,
    counters: Counters,
    pub setup_calls: usize,
    pub ready_calls: usize,
    pub saved_on_ready: Option<SavedState>,
    pub launch_on_ready: Option<LaunchInput>,
    pub component_marker: Option<String>,
    /// Stored into the saved state on recreation, if set.
    pub note: Option<String>,
}

impl ProbeHost {
    pub fn new(log: CallLog, counters: Counters) -> Self {
        Self {
            log,
            counters,
            setup_calls: 0,
            ready_calls: 0,
            saved_on_ready: None,
            launch_on_ready: None,
            component_marker: None,
            note: None,
        }
    }
}

impl HostContract for ProbeHost {
    type Presenter = ProbePresenter;

    fn presenter_factory(&self) -> BoxedPresenterFactory<ProbePresenter> {
        self.counters
            .factories_requested
            .fetch_add(1, Ordering::SeqCst);
        let log = self.log.clone();
        let built = self.counters.presenters_built.clone();
        Box::new(move || ProbePresenter {
            serial: built.fetch_add(1, Ordering::SeqCst) + 1,
            slot: ViewSlot::new(),
            log: log.clone(),
            loading_on_start: None,
        })
    }

    fn setup_component(&mut self, component: &AppComponent) {
        self.setup_calls += 1;
        self.component_marker = component.get::<String>();
    }

    fn content_view(&self) -> LayoutId {
        PROBE_LAYOUT
    }

    fn bind_view(&mut self, base: HostView) -> ProbeView {
        ProbeView { base }
    }

    fn on_view_ready(&mut self, saved: Option<&SavedState>, launch: &LaunchInput) {
        self.ready_calls += 1;
        self.saved_on_ready = saved.cloned();
        self.launch_on_ready = Some(launch.clone());
    }

    fn on_save_state(&self, state: &mut SavedState) {
        if let Some(note) = &self.note {
            state.put("note", note.clone());
        }
    }
}

// -- Overlay ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayCall {
    Spinner(String),
    Dismiss,
    Toast(String, ToastDuration),
}

#[derive(Default)]
pub struct RecordingOverlay {
    calls: Mutex<Vec<OverlayCall>>,
}

impl RecordingOverlay {
    pub fn calls(&self) -> Vec<OverlayCall> {
        self.calls.lock().clone()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                OverlayCall::Toast(message, _) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Overlay for RecordingOverlay {
    fn show_spinner(&self, message: &str) {
        self.calls
            .lock()
            .push(OverlayCall::Spinner(message.to_string()));
    }

    fn dismiss_spinner(&self) {
        self.calls.lock().push(OverlayCall::Dismiss);
    }

    fn show_toast(&self, message: &str, duration: ToastDuration) {
        self.calls
            .lock()
            .push(OverlayCall::Toast(message.to_string(), duration));
    }
}

// -- Harness ------------------------------------------------------------------

pub type Host = ViewLifecycleHost<ProbeHost>;

/// Everything one test needs to drive probe hosts.
pub struct Harness {
    pub env: HostEnvironment,
    pub overlay: Arc<RecordingOverlay>,
    pub queue: HostEventQueue<ProbePresenter>,
    pub log: CallLog,
    pub counters: Counters,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let overlay = Arc::new(RecordingOverlay::default());
        let store = ConfigStore::new(config, PathBuf::from("/tmp/tline-test.toml"));
        let env = HostEnvironment {
            registry: LoaderRegistry::new(),
            component: AppComponent::new(store),
            overlay: overlay.clone(),
        };
        Self {
            env,
            overlay,
            queue: HostEventQueue::new(),
            log: Arc::new(Mutex::new(Vec::new())),
            counters: Counters::default(),
        }
    }

    /// Harness whose retained deliveries always go through the queue.
    pub fn always_deferred() -> Self {
        let mut config = Config::default();
        config.loader.deliver_retained_immediately = false;
        Self::with_config(config)
    }

    pub fn contract(&self) -> ProbeHost {
        ProbeHost::new(self.log.clone(), self.counters.clone())
    }

    pub fn create(&self, saved: Option<SavedState>) -> Host {
        ViewLifecycleHost::create(
            self.contract(),
            &self.env,
            &self.queue.sender(),
            saved,
            &LaunchInput::new(),
        )
        .expect("host creation")
    }

    /// Create a host and process its pending delivery.
    pub fn create_delivered(&self, saved: Option<SavedState>) -> Host {
        let mut host = self.create(saved);
        self.queue.drain(&mut host);
        host
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.log.lock().clear();
    }

    /// First-start flags of every `on_start`, in order.
    pub fn starts(&self) -> Vec<bool> {
        self.log
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Start(first) => Some(*first),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.log.lock().iter().filter(|call| *call == wanted).count()
    }

    pub fn stops(&self) -> usize {
        self.count(&Call::Stop)
    }
}

/// Instance the presenter's view currently belongs to.
pub fn attached_instance(host: &Host) -> Option<HostInstanceId> {
    host.presenter()
        .and_then(|presenter| presenter.lock().view().map(|v| v.base.instance()))
}
