//! Service layer for apiview

pub mod config;
pub mod provider;

pub use config::{ConfigService, DefaultConfigService};
pub use provider::{JsonSymbolProvider, SymbolProvider};
