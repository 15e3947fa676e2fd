pub mod host;
pub mod mvi;
pub mod view;
