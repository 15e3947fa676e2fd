//! Retention record: the presenter a loader owns plus its race flags.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::presenter::SharedPresenter;

/// One-shot "needs start" flag.
///
/// Armed when the host starts before the presenter was delivered and
/// consumed by whichever delivery observes it first. Consumption is a single
/// compare-and-swap, so a delivery racing a second delivery (or a delivery
/// posted from another thread) can start the presenter at most once.
#[derive(Debug, Default)]
pub struct StartGate {
    armed: AtomicBool,
}

impl StartGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Drop a pending start without consuming it.
    pub fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }

    /// Check-and-clear. Returns `true` for exactly one caller per `arm()`.
    pub fn try_consume(&self) -> bool {
        self.armed
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

/// Storage owned by a [`super::PresenterLoader`].
pub(crate) struct RetentionRecord<P> {
    pub(crate) presenter: Mutex<Option<SharedPresenter<P>>>,
    pub(crate) delivered: AtomicBool,
    pub(crate) needs_start: StartGate,
    pub(crate) first_start: AtomicBool,
    pub(crate) destroyed: AtomicBool,
}

impl<P> RetentionRecord<P> {
    pub(crate) fn new() -> Self {
        Self {
            presenter: Mutex::new(None),
            delivered: AtomicBool::new(false),
            needs_start: StartGate::new(),
            first_start: AtomicBool::new(true),
            destroyed: AtomicBool::new(false),
        }
    }
}
