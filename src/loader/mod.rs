//! Presenter retention across host recreation.
//!
//! A [`PresenterLoader`] owns exactly one presenter for a host chain. Hosts
//! come and go; the loader (kept alive by the [`LoaderRegistry`]) hands the
//! same presenter to each of them until the chain finishes for good.

mod record;
mod registry;

pub use record::StartGate;
pub use registry::LoaderRegistry;

use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use uuid::Uuid;

use crate::presenter::{BoxedPresenterFactory, Presenter, SharedPresenter};
use record::RetentionRecord;

/// Identity of a host chain: every host instance recreated from the same
/// saved state shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(Uuid);

impl ChainId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors raised by the retention layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetentionError {
    #[error("chain {chain} is retained for a different presenter type")]
    TypeMismatch { chain: ChainId },

    #[error("loader for chain {chain} was already destroyed")]
    LoaderDestroyed { chain: ChainId },
}

/// Receiver of deferred deliveries.
pub trait DeliveryTarget<P>: Send {
    fn post_delivery(&self, presenter: SharedPresenter<P>);
}

/// How a retained presenter is handed back on host recreation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Retained presenters are returned synchronously, new ones are deferred.
    RetainedImmediate,
    /// Every delivery goes through the target.
    AlwaysDeferred,
}

/// Outcome of [`PresenterLoader::start_loading`].
pub enum Delivery<P> {
    /// The caller must deliver this presenter to itself right away.
    Immediate(SharedPresenter<P>),
    /// The presenter was posted to the delivery target.
    Deferred,
}

impl<P> fmt::Debug for Delivery<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Immediate(_) => f.write_str("Immediate"),
            Delivery::Deferred => f.write_str("Deferred"),
        }
    }
}

/// Result of [`PresenterLoader::ensure_loaded`].
pub struct Loaded<P> {
    pub presenter: SharedPresenter<P>,
    /// True when the factory ran for this call.
    pub created: bool,
}

/// Retained owner of one presenter.
pub struct PresenterLoader<P: Presenter> {
    chain: ChainId,
    factory: BoxedPresenterFactory<P>,
    record: RetentionRecord<P>,
}

impl<P: Presenter> PresenterLoader<P> {
    pub fn new(chain: ChainId, factory: BoxedPresenterFactory<P>) -> Self {
        Self {
            chain,
            factory,
            record: RetentionRecord::new(),
        }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    /// Return the retained presenter, building it on first call.
    ///
    /// The factory runs at most once per loader. A panicking factory
    /// propagates to the caller.
    pub fn ensure_loaded(&self) -> Result<Loaded<P>, RetentionError> {
        if self.is_destroyed() {
            return Err(RetentionError::LoaderDestroyed { chain: self.chain });
        }

        let mut slot = self.record.presenter.lock();
        if let Some(presenter) = slot.as_ref() {
            return Ok(Loaded {
                presenter: Arc::clone(presenter),
                created: false,
            });
        }

        let presenter = Arc::new(Mutex::new(self.factory.create()));
        *slot = Some(Arc::clone(&presenter));
        tracing::info!(chain = %self.chain, "Presenter created");
        Ok(Loaded {
            presenter,
            created: true,
        })
    }

    /// Load (if needed) and deliver the presenter.
    ///
    /// A freshly built presenter is always posted to `target`. A retained one
    /// is returned as [`Delivery::Immediate`] unless the policy defers it too.
    pub fn start_loading(
        &self,
        target: &dyn DeliveryTarget<P>,
        policy: DeliveryPolicy,
    ) -> Result<Delivery<P>, RetentionError> {
        let Loaded { presenter, created } = self.ensure_loaded()?;

        if !created && policy == DeliveryPolicy::RetainedImmediate {
            tracing::debug!(chain = %self.chain, "Delivering retained presenter immediately");
            return Ok(Delivery::Immediate(presenter));
        }

        tracing::debug!(chain = %self.chain, created, "Posting deferred presenter delivery");
        target.post_delivery(presenter);
        Ok(Delivery::Deferred)
    }

    /// The retained presenter, if loaded and not destroyed.
    pub fn presenter(&self) -> Option<SharedPresenter<P>> {
        self.record.presenter.lock().clone()
    }

    /// True once a host has received the presenter. A delivery that is still
    /// queued, or was dropped as stale, does not count.
    pub fn has_delivered(&self) -> bool {
        self.record.delivered.load(Ordering::SeqCst)
    }

    /// Record that a host received the presenter.
    pub fn mark_delivered(&self) {
        self.record.delivered.store(true, Ordering::SeqCst);
    }

    pub fn is_destroyed(&self) -> bool {
        self.record.destroyed.load(Ordering::SeqCst)
    }

    /// The "needs start" gate of this chain.
    pub fn start_gate(&self) -> &StartGate {
        &self.record.needs_start
    }

    /// Consume the chain's first-start flag. True exactly once per loader.
    pub fn take_first_start(&self) -> bool {
        self.record.first_start.swap(false, Ordering::SeqCst)
    }

    /// Tear down the retained presenter.
    ///
    /// Only for permanent finish. Returns `true` if a presenter was destroyed
    /// by this call; later calls are no-ops.
    pub fn destroy(&self) -> bool {
        if self.record.destroyed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.record.needs_start.disarm();
        self.record.delivered.store(false, Ordering::SeqCst);

        let Some(presenter) = self.record.presenter.lock().take() else {
            tracing::debug!(chain = %self.chain, "Loader destroyed before presenter was created");
            return false;
        };
        presenter.lock().on_presenter_destroyed();
        tracing::info!(chain = %self.chain, "Presenter destroyed");
        true
    }
}
