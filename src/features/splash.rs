//! Splash screen: decides where a freshly launched app goes.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::component::AppComponent;
use crate::presenter::{BoxedPresenterFactory, Presenter, ViewSlot};
use crate::ui::host::{HostContract, LaunchInput, LayoutId, SavedState};
use crate::ui::view::{BaseView, HostView};

pub const SPLASH_LAYOUT: LayoutId = LayoutId("activity_splash");

/// Session lookup the splash screen depends on.
pub trait SplashInteractor: Send + Sync {
    fn has_active_session(&self) -> bool;
}

/// Interactor answering from a fixed flag.
#[derive(Debug, Clone, Copy)]
pub struct StaticSession(pub bool);

impl SplashInteractor for StaticSession {
    fn has_active_session(&self) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SplashDestination {
    Login,
    Timeline,
}

pub trait SplashView: BaseView {
    fn open(&self, destination: SplashDestination);
}

/// View handle of one splash host instance.
#[derive(Clone)]
pub struct SplashScreen {
    base: HostView,
    opened: Arc<Mutex<Vec<SplashDestination>>>,
}

impl SplashScreen {
    pub fn new(base: HostView) -> Self {
        Self {
            base,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Destinations this instance was asked to open.
    pub fn opened(&self) -> Vec<SplashDestination> {
        self.opened.lock().clone()
    }
}

impl BaseView for SplashScreen {
    fn host_view(&self) -> &HostView {
        &self.base
    }
}

impl SplashView for SplashScreen {
    fn open(&self, destination: SplashDestination) {
        tracing::info!(instance = %self.base.instance(), ?destination, "Splash destination");
        self.opened.lock().push(destination);
    }
}

pub struct SplashPresenter {
    interactor: Arc<dyn SplashInteractor>,
    slot: ViewSlot<SplashScreen>,
    destination: Option<SplashDestination>,
}

impl SplashPresenter {
    pub fn new(interactor: Arc<dyn SplashInteractor>) -> Self {
        Self {
            interactor,
            slot: ViewSlot::new(),
            destination: None,
        }
    }

    pub fn destination(&self) -> Option<SplashDestination> {
        self.destination
    }
}

impl Presenter for SplashPresenter {
    type View = SplashScreen;

    fn view_slot(&self) -> &ViewSlot<SplashScreen> {
        &self.slot
    }

    fn view_slot_mut(&mut self) -> &mut ViewSlot<SplashScreen> {
        &mut self.slot
    }

    fn on_start(&mut self, first_start: bool) {
        if !first_start {
            return;
        }
        let Some(view) = self.slot.get() else {
            return;
        };

        let _loading = view.host_view().loading_scope(&view.host_view().config().loading_message);
        let destination = if self.interactor.has_active_session() {
            SplashDestination::Timeline
        } else {
            SplashDestination::Login
        };
        self.destination = Some(destination);
        view.open(destination);
    }

    fn on_presenter_destroyed(&mut self) {
        tracing::debug!(destination = ?self.destination, "Splash presenter destroyed");
    }
}

/// Factory capturing the interactor, as provided to the splash host.
pub fn splash_presenter_factory(
    interactor: Arc<dyn SplashInteractor>,
) -> BoxedPresenterFactory<SplashPresenter> {
    Box::new(move || SplashPresenter::new(Arc::clone(&interactor)))
}

/// Feature half of the splash host.
#[derive(Default)]
pub struct SplashHost {
    interactor: Option<Arc<dyn SplashInteractor>>,
    launched_from: Option<String>,
}

impl SplashHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `source` launch extra, recorded when the view became ready.
    pub fn launched_from(&self) -> Option<&str> {
        self.launched_from.as_deref()
    }
}

impl HostContract for SplashHost {
    type Presenter = SplashPresenter;

    fn presenter_factory(&self) -> BoxedPresenterFactory<SplashPresenter> {
        let interactor = self
            .interactor
            .clone()
            .expect("SplashInteractor must be provided by the app component");
        splash_presenter_factory(interactor)
    }

    fn setup_component(&mut self, component: &AppComponent) {
        self.interactor = component.get::<Arc<dyn SplashInteractor>>();
    }

    fn content_view(&self) -> LayoutId {
        SPLASH_LAYOUT
    }

    fn bind_view(&mut self, base: HostView) -> SplashScreen {
        SplashScreen::new(base)
    }

    fn on_view_ready(&mut self, _saved: Option<&SavedState>, launch: &LaunchInput) {
        self.launched_from = launch.extra("source").map(str::to_owned);
    }
}
