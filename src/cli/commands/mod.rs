//! Command implementations for apiview
//!
//! Each command is implemented in its own module.

pub mod config;
pub mod outline;
pub mod render;
pub mod tokens;
