//! Event queue of the thread that owns a host.
//!
//! Platform callbacks and deferred presenter deliveries are all funnelled
//! through one channel and dispatched in arrival order by
//! [`HostEventQueue::drain`]. Their relative order is whatever the senders
//! produced; the host copes with either.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::loader::DeliveryTarget;
use crate::presenter::{Presenter, SharedPresenter};

use super::{HostContract, HostInstanceId, ViewLifecycleHost};

pub enum HostEvent<P> {
    /// Platform start callback.
    Started,
    /// Platform stop callback.
    Stopped,
    /// Deferred delivery, addressed to the instance that requested it.
    PresenterDelivered {
        instance: HostInstanceId,
        presenter: SharedPresenter<P>,
    },
    PresenterReset,
    /// Permanent finish.
    Finished,
}

impl<P> fmt::Debug for HostEvent<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEvent::Started => f.write_str("Started"),
            HostEvent::Stopped => f.write_str("Stopped"),
            HostEvent::PresenterDelivered { instance, .. } => f
                .debug_struct("PresenterDelivered")
                .field("instance", instance)
                .finish_non_exhaustive(),
            HostEvent::PresenterReset => f.write_str("PresenterReset"),
            HostEvent::Finished => f.write_str("Finished"),
        }
    }
}

/// Cloneable, `Send` handle for posting host events.
pub struct HostEventSender<P> {
    tx: Sender<HostEvent<P>>,
}

impl<P> Clone for HostEventSender<P> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<P> HostEventSender<P> {
    /// Returns `false` if the queue is gone.
    pub fn send(&self, event: HostEvent<P>) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Delivery target bound to one host instance.
    pub fn target_for(&self, instance: HostInstanceId) -> InstanceTarget<P> {
        InstanceTarget {
            instance,
            sender: self.clone(),
        }
    }
}

/// Posts deferred deliveries tagged with the requesting instance.
pub struct InstanceTarget<P> {
    instance: HostInstanceId,
    sender: HostEventSender<P>,
}

impl<P: Send> DeliveryTarget<P> for InstanceTarget<P> {
    fn post_delivery(&self, presenter: SharedPresenter<P>) {
        let posted = self.sender.send(HostEvent::PresenterDelivered {
            instance: self.instance,
            presenter,
        });
        if !posted {
            tracing::warn!(instance = %self.instance, "Host event queue closed, delivery dropped");
        }
    }
}

/// Event queue owned by the host's thread.
pub struct HostEventQueue<P> {
    tx: Sender<HostEvent<P>>,
    rx: Receiver<HostEvent<P>>,
}

impl<P> Default for HostEventQueue<P> {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl<P> HostEventQueue<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(&self) -> HostEventSender<P> {
        HostEventSender {
            tx: self.tx.clone(),
        }
    }

    pub fn post(&self, event: HostEvent<P>) {
        // The queue holds its own receiver, so this cannot fail.
        let _ = self.tx.send(event);
    }

    /// Dispatch one pending event. Returns `false` if none was pending.
    pub fn dispatch_one<C>(&self, host: &mut ViewLifecycleHost<C>) -> bool
    where
        C: HostContract<Presenter = P>,
        P: Presenter,
    {
        match self.rx.try_recv() {
            Ok(event) => {
                host.handle_event(event);
                true
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }

    /// Dispatch every pending event in order. Returns how many ran.
    pub fn drain<C>(&self, host: &mut ViewLifecycleHost<C>) -> usize
    where
        C: HostContract<Presenter = P>,
        P: Presenter,
    {
        let mut dispatched = 0;
        while self.dispatch_one(host) {
            dispatched += 1;
        }
        dispatched
    }

    /// Drop pending events without dispatching them.
    pub fn clear(&self) -> usize {
        self.rx.try_iter().count()
    }
}
