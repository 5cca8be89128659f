//! Error types for apiview

use thiserror::Error;

pub type ApiViewResult<T> = std::result::Result<T, ApiViewError>;

#[derive(Debug, Error)]
pub enum ApiViewError {
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure to acquire a symbol tree
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Symbol file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("Invalid symbol document {path}: {message}")]
    Parse { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    pub fn parse(path: &std::path::Path, err: serde_json::Error) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// A symbol tree that cannot be rendered consistently
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Duplicate definition '{id}': two declarations resolve to the same id")]
    DuplicateDefinition { id: String },

    #[error("Assembly has no name")]
    UnnamedAssembly,
}

impl BuildError {
    /// The definition id the error is attributed to, if any
    pub fn definition_id(&self) -> Option<&str> {
        match self {
            Self::DuplicateDefinition { id } => Some(id),
            Self::UnnamedAssembly => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_definition_is_attributable() {
        let err = BuildError::DuplicateDefinition {
            id: "T:N.C".to_string(),
        };
        assert_eq!(err.definition_id(), Some("T:N.C"));
        assert!(err.to_string().contains("T:N.C"));
        assert_eq!(BuildError::UnnamedAssembly.definition_id(), None);
    }

    #[test]
    fn test_error_conversion() {
        let err: ApiViewError = BuildError::UnnamedAssembly.into();
        assert!(matches!(err, ApiViewError::Build(_)));

        let err: ApiViewError = ProviderError::NotFound("missing.json".into()).into();
        assert_eq!(err.to_string(), "Symbol file not found: missing.json");
    }

    #[test]
    fn test_parse_error_mentions_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ProviderError::parse(std::path::Path::new("lib.json"), json_err);
        assert!(err.to_string().starts_with("Invalid symbol document lib.json"));
    }
}
