//! Data models for apiview
//!
//! Contains the symbol tree consumed by the renderer and the token, line and
//! navigation types it produces.

pub mod config;
pub mod navigation;
pub mod symbol;
pub mod token;

// Re-export commonly used types
pub use config::ApiViewConfig;
pub use navigation::{NavigationItem, NavigationKind};
pub use symbol::{
    Accessibility, Accessors, Assembly, AttributeData, Constant, MemberKind, MemberSymbol,
    Modifiers, NamespaceSymbol, Parameter, RefKind, Symbol, TypeKind, TypeParameter, TypeRef,
    TypeSymbol, Variance,
};
pub use token::{Token, TokenKind};
