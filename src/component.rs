//! Application-wide dependency container handed to hosts.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::ConfigStore;

/// Typed service container plus the shared config.
///
/// Services are looked up by type; register trait objects behind an `Arc`
/// (`component.provide::<Arc<dyn MyInteractor>>(...)`). Clones share storage.
#[derive(Clone)]
pub struct AppComponent {
    config: ConfigStore,
    services: Arc<RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>>,
}

impl AppComponent {
    pub fn new(config: ConfigStore) -> Self {
        Self {
            config,
            services: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Register `service`, replacing any previous one of the same type.
    pub fn provide<T>(&self, service: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.services
            .write()
            .insert(TypeId::of::<T>(), Box::new(service));
    }

    pub fn get<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.services
            .read()
            .get(&TypeId::of::<T>())
            .and_then(|service| service.downcast_ref::<T>())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::PathBuf;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    fn make_component() -> AppComponent {
        AppComponent::new(ConfigStore::new(
            Config::default(),
            PathBuf::from("/tmp/tline-test.toml"),
        ))
    }

    #[test]
    fn provides_trait_objects() {
        let component = make_component();
        component.provide::<Arc<dyn Greeter>>(Arc::new(Hello));

        let greeter = component.get::<Arc<dyn Greeter>>().unwrap();
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn missing_service_is_none() {
        let component = make_component();
        assert!(component.get::<u32>().is_none());
    }

    #[test]
    fn later_provide_replaces() {
        let component = make_component();
        component.provide(1u32);
        component.provide(2u32);
        assert_eq!(component.get::<u32>(), Some(2));
    }

    #[test]
    fn clones_share_services() {
        let component = make_component();
        let other = component.clone();
        component.provide(String::from("shared"));
        assert_eq!(other.get::<String>().as_deref(), Some("shared"));
    }
}
