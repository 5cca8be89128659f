//! Configuration model for apiview
//!
//! Every table is optional in the TOML file; missing keys fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};

/// apiview configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiViewConfig {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub attributes: AttributeConfig,

    #[serde(default)]
    pub diff: DiffConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Rendering options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "defaults::indent_width")]
    pub indent_width: usize,

    /// Placeholder emitted as the body of every non-abstract method
    #[serde(default = "defaults::stub_body")]
    pub stub_body: String,

    /// Render `get { <stub> } set { }` instead of `get; set;`
    #[serde(default)]
    pub accessor_bodies: bool,

    #[serde(default = "defaults::enabled")]
    pub include_documentation: bool,

    /// Leading `// Assembly:` comment and `[assembly: ...]` attributes
    #[serde(default)]
    pub include_assembly_header: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: defaults::indent_width(),
            stub_body: defaults::stub_body(),
            accessor_bodies: false,
            include_documentation: defaults::enabled(),
            include_assembly_header: false,
        }
    }
}

/// Attribute tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeConfig {
    /// Implementation-detail attributes never shown
    #[serde(default = "defaults::skipped_attributes")]
    pub skip: Vec<String>,

    /// Attributes that mark a declaration as deprecated
    #[serde(default = "defaults::deprecated_attributes")]
    pub deprecated: Vec<String>,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            skip: defaults::skipped_attributes(),
            deprecated: defaults::deprecated_attributes(),
        }
    }
}

/// Diff hints
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiffConfig {
    /// Const fields whose value changes every release
    #[serde(default)]
    pub skip_constants: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::format")]
    pub format: String,

    #[serde(default)]
    pub show_ids: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: defaults::format(),
            show_ids: false,
        }
    }
}

mod defaults {
    // Render
    pub fn indent_width() -> usize {
        4
    }
    pub fn stub_body() -> String {
        "throw null;".to_string()
    }
    pub fn enabled() -> bool {
        true
    }

    // Attributes
    pub fn skipped_attributes() -> Vec<String> {
        [
            "AsyncStateMachineAttribute",
            "IteratorStateMachineAttribute",
            "AsyncIteratorStateMachineAttribute",
            "DebuggerStepThroughAttribute",
            "DebuggerNonUserCodeAttribute",
            "TupleElementNamesAttribute",
            "DefaultMemberAttribute",
            "CompilerGeneratedAttribute",
            "NullableAttribute",
            "NullableContextAttribute",
            "IsReadOnlyAttribute",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
    pub fn deprecated_attributes() -> Vec<String> {
        vec!["ObsoleteAttribute".to_string()]
    }

    // Output
    pub fn format() -> String {
        "text".to_string()
    }
}
