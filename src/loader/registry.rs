//! Activity-scope store of retained loaders, keyed by chain.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{ChainId, PresenterLoader, RetentionError};
use crate::presenter::{BoxedPresenterFactory, Presenter};

type ErasedLoader = Arc<dyn Any + Send + Sync>;

/// Keeps loaders alive while their hosts are destroyed and recreated.
///
/// Cloning yields another handle to the same store.
#[derive(Clone, Default)]
pub struct LoaderRegistry {
    loaders: Arc<Mutex<HashMap<ChainId, ErasedLoader>>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the chain's loader, creating it with the factory from `init`.
    ///
    /// `init` only runs when the chain has no loader yet. The boolean is true
    /// when a new loader was registered.
    pub fn get_or_init<P, F>(
        &self,
        chain: ChainId,
        init: F,
    ) -> Result<(Arc<PresenterLoader<P>>, bool), RetentionError>
    where
        P: Presenter,
        F: FnOnce() -> BoxedPresenterFactory<P>,
    {
        let mut loaders = self.loaders.lock();
        if let Some(existing) = loaders.get(&chain) {
            let loader = Arc::clone(existing)
                .downcast::<PresenterLoader<P>>()
                .map_err(|_| RetentionError::TypeMismatch { chain })?;
            return Ok((loader, false));
        }

        let loader = Arc::new(PresenterLoader::new(chain, init()));
        loaders.insert(chain, Arc::clone(&loader) as ErasedLoader);
        tracing::debug!(chain = %chain, "Loader registered");
        Ok((loader, true))
    }

    /// Look up the chain's loader without creating one.
    pub fn get<P: Presenter>(
        &self,
        chain: ChainId,
    ) -> Result<Option<Arc<PresenterLoader<P>>>, RetentionError> {
        let loaders = self.loaders.lock();
        let Some(existing) = loaders.get(&chain) else {
            return Ok(None);
        };
        Arc::clone(existing)
            .downcast::<PresenterLoader<P>>()
            .map(Some)
            .map_err(|_| RetentionError::TypeMismatch { chain })
    }

    /// Forget the chain's loader. Returns `true` if one was registered.
    pub fn remove(&self, chain: ChainId) -> bool {
        let removed = self.loaders.lock().remove(&chain).is_some();
        if removed {
            tracing::debug!(chain = %chain, "Loader unregistered");
        }
        removed
    }

    pub fn contains(&self, chain: ChainId) -> bool {
        self.loaders.lock().contains_key(&chain)
    }

    pub fn len(&self) -> usize {
        self.loaders.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.lock().is_empty()
    }
}
