//! Symbol providers
//!
//! A provider hands the renderer a complete symbol tree. Extraction from
//! compiled metadata happens elsewhere; the shipped provider reads the tree
//! from a JSON document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::symbol::Assembly;

#[async_trait]
pub trait SymbolProvider: Send + Sync {
    /// Load the symbol tree for one assembly
    async fn load(&self) -> Result<Assembly, ProviderError>;
}

/// Reads an [`Assembly`] serialized as JSON
pub struct JsonSymbolProvider {
    path: PathBuf,
}

impl JsonSymbolProvider {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SymbolProvider for JsonSymbolProvider {
    async fn load(&self) -> Result<Assembly, ProviderError> {
        if !self.path.exists() {
            return Err(ProviderError::NotFound(self.path.clone()));
        }
        let content = tokio::fs::read_to_string(&self.path).await?;
        let assembly: Assembly =
            serde_json::from_str(&content).map_err(|e| ProviderError::parse(&self.path, e))?;
        tracing::debug!(
            "Loaded assembly {} with {} namespaces from {}",
            assembly.name,
            assembly.namespaces.len(),
            self.path.display()
        );
        Ok(assembly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symbol::{Symbol, TypeKind};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_json_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lib.json");
        std::fs::write(
            &path,
            r#"{
                "name": "Lib",
                "version": "1.0.0",
                "namespaces": [{
                    "name": "N",
                    "members": [{
                        "kind": "type",
                        "name": "C",
                        "accessibility": "public",
                        "type_kind": "class",
                        "members": [
                            {"kind": "member", "name": "M", "accessibility": "public", "member_kind": "method"},
                            {"kind": "lambda_closure"}
                        ]
                    }]
                }]
            }"#,
        )
        .unwrap();

        let assembly = JsonSymbolProvider::new(&path).load().await.unwrap();
        assert_eq!(assembly.display_name(), "Lib (1.0.0)");
        let Symbol::Type(ty) = &assembly.namespaces[0].members[0] else {
            panic!("expected a type");
        };
        assert_eq!(ty.type_kind, TypeKind::Class);
        assert_eq!(ty.members.len(), 2);
        assert!(matches!(ty.members[1], Symbol::Unknown));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.json");
        let err = JsonSymbolProvider::new(&path).load().await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(p) if p == path));
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, r#"{"name": "Lib", "namespaces": [}"#).unwrap();
        let err = JsonSymbolProvider::new(&path).load().await.unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }
}
