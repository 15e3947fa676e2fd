use serde::{Deserialize, Serialize};

use crate::loader::DeliveryPolicy;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Canned strings and timings used by the generic view primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Spinner text for `show_loading()` without a message.
    #[serde(default = "default_loading_message")]
    pub loading_message: String,
    /// Toast text for a generic loading failure.
    #[serde(default = "default_error_loading_message")]
    pub error_loading_message: String,
    /// Toast text when the network is unreachable.
    #[serde(default = "default_no_network_message")]
    pub no_network_message: String,
    /// How long toasts stay on screen.
    #[serde(default)]
    pub toast_duration: ToastDuration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    #[default]
    Short,
    Long,
}

/// Presenter loader behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Hand a retained presenter back synchronously on host recreation
    /// (default: true). When false every delivery goes through the event queue.
    #[serde(default = "default_deliver_retained_immediately")]
    pub deliver_retained_immediately: bool,
}

impl LoaderConfig {
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        if self.deliver_retained_immediately {
            DeliveryPolicy::RetainedImmediate
        } else {
            DeliveryPolicy::AlwaysDeferred
        }
    }
}

fn default_loading_message() -> String {
    "Loading...".to_string()
}

fn default_error_loading_message() -> String {
    "Error loading data".to_string()
}

fn default_no_network_message() -> String {
    "No network connection".to_string()
}

fn default_deliver_retained_immediately() -> bool {
    true
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            loading_message: default_loading_message(),
            error_loading_message: default_error_loading_message(),
            no_network_message: default_no_network_message(),
            toast_duration: ToastDuration::default(),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            deliver_retained_immediately: default_deliver_retained_immediately(),
        }
    }
}
