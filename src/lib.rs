//! apiview - Public API surface rendering library
//!
//! Turns the symbol tree of a compiled library into a deterministic,
//! semantically tagged token stream, then into display lines carrying stable
//! definition ids plus a parallel navigation tree.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod services;

pub use config::RenderPolicy;
pub use error::{ApiViewError, ApiViewResult};
pub use render::{CodeFile, DisplayLine, build_code_file};
