//! Utilities

pub mod config;
pub mod constants;
pub mod overflow;
pub mod ready;
pub mod registry;
pub mod url;
