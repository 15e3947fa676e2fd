//! Presenter retention and view binding for Model-View-Presenter screens.
//!
//! A presenter is built once per host chain by a [`presenter::PresenterFactory`],
//! retained by a [`loader::PresenterLoader`] while its host is destroyed and
//! recreated, and bound to whichever [`ui::host::ViewLifecycleHost`] is alive.

pub mod component;
pub mod config;
pub mod features;
pub mod loader;
pub mod logging;
pub mod presenter;
pub mod simulation;
pub mod ui;
