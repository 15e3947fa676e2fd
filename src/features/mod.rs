//! Feature screens built on the host lifecycle.

pub mod splash;
