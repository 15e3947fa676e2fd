//! Presenter contract and the view slot every presenter owns.
//!
//! A presenter outlives the hosts that display it. The host lifecycle drives
//! it through [`attach_view`], [`Presenter::on_start`], [`Presenter::on_stop`]
//! and [`detach_view`]; the retention loader ends it with
//! [`Presenter::on_presenter_destroyed`].

mod factory;

pub use factory::{BoxedPresenterFactory, PresenterFactory};

use parking_lot::Mutex;
use std::sync::Arc;

/// Presenter handle shared between the retention record (owner) and the host
/// currently displaying it.
pub type SharedPresenter<P> = Arc<Mutex<P>>;

/// Storage for the view currently attached to a presenter.
///
/// `None` whenever the presenter is detached. Only the lifecycle layer writes
/// to it, see [`attach_view`] and [`detach_view`].
#[derive(Debug)]
pub struct ViewSlot<V> {
    view: Option<V>,
}

impl<V> Default for ViewSlot<V> {
    fn default() -> Self {
        Self { view: None }
    }
}

impl<V> ViewSlot<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The attached view, if any.
    pub fn get(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    fn set(&mut self, view: V) {
        self.view = Some(view);
    }

    fn clear(&mut self) {
        self.view = None;
    }
}

/// Business-logic counterpart of a host.
///
/// All callbacks default to no-ops so features only override what they use.
pub trait Presenter: Send + 'static {
    /// View capability set this presenter drives.
    type View: Clone + Send + 'static;

    fn view_slot(&self) -> &ViewSlot<Self::View>;

    fn view_slot_mut(&mut self) -> &mut ViewSlot<Self::View>;

    /// The currently attached view.
    fn view(&self) -> Option<&Self::View> {
        self.view_slot().get()
    }

    /// Called right after the view was stored in the slot.
    fn on_view_attached(&mut self) {}

    /// `first_start` is true only for the first start of the presenter's lifetime.
    fn on_start(&mut self, _first_start: bool) {}

    /// The view is still attached while this runs.
    fn on_stop(&mut self) {}

    /// Called before the slot is cleared.
    fn on_view_detached(&mut self) {}

    /// Final callback; cancel outstanding work here.
    fn on_presenter_destroyed(&mut self) {}
}

/// Store `view` in the presenter's slot and notify it.
pub fn attach_view<P: Presenter>(presenter: &mut P, view: P::View) {
    presenter.view_slot_mut().set(view);
    presenter.on_view_attached();
}

/// Notify the presenter and clear its slot.
///
/// The slot is empty once this returns regardless of what the
/// presenter's `on_view_detached` did.
pub fn detach_view<P: Presenter>(presenter: &mut P) {
    presenter.on_view_detached();
    presenter.view_slot_mut().clear();
}
