//! Configuration service for apiview
//!
//! Layers: global config, then project config, then environment overrides.
//! Layers are merged key by key, so a project file only needs the keys it
//! changes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ConfigError;
use crate::models::config::ApiViewConfig;

pub const OUTPUT_FORMATS: &[&str] = &["text", "html", "json"];

#[async_trait]
pub trait ConfigService: Send + Sync {
    async fn load(&self, global_only: bool) -> Result<ApiViewConfig, ConfigError>;
    fn config_path(&self, global: bool) -> PathBuf;
    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError>;
}

pub struct DefaultConfigService {
    root: PathBuf,
    global_path: PathBuf,
}

impl DefaultConfigService {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            global_path: Self::global_config_path(),
        }
    }

    /// Use a specific global config file instead of the XDG location
    pub fn with_global_path(mut self, path: PathBuf) -> Self {
        self.global_path = path;
        self
    }

    fn global_config_path() -> PathBuf {
        // XDG standard: ~/.config/apiview/config.toml
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("apiview")
            .join("config.toml")
    }

    fn project_config_path(&self) -> PathBuf {
        self.root.join(".apiview").join("config.toml")
    }

    async fn load_table(path: &Path) -> Result<toml::Table, ConfigError> {
        if !path.exists() {
            return Ok(toml::Table::new());
        }
        let content = tokio::fs::read_to_string(path).await?;
        content
            .parse::<toml::Table>()
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    async fn write_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let config = ApiViewConfig::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigService for DefaultConfigService {
    async fn load(&self, global_only: bool) -> Result<ApiViewConfig, ConfigError> {
        let mut table = Self::load_table(&self.global_path).await?;
        if !global_only {
            let project = Self::load_table(&self.project_config_path()).await?;
            merge_tables(&mut table, project);
        }

        let config: ApiViewConfig = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        let config = if global_only {
            config
        } else {
            apply_env_overrides(config, |key| std::env::var(key).ok())?
        };
        validate(&config)?;

        tracing::debug!("Loaded config (global_only={})", global_only);
        Ok(config)
    }

    fn config_path(&self, global: bool) -> PathBuf {
        if global {
            self.global_path.clone()
        } else {
            self.project_config_path()
        }
    }

    async fn init(&self, global: bool, force: bool) -> Result<PathBuf, ConfigError> {
        let path = self.config_path(global);

        if path.exists() && !force {
            return Err(ConfigError::InvalidValue {
                key: "config".to_string(),
                message: format!(
                    "Config already exists: {}. Use --force to overwrite.",
                    path.display()
                ),
            });
        }

        Self::write_default_config(&path).await?;
        Ok(path)
    }
}

/// Recursively overlay `overlay` onto `base`; nested tables merge, other
/// values replace.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming)
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn apply_env_overrides(
    mut config: ApiViewConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ApiViewConfig, ConfigError> {
    if let Some(val) = lookup("APIVIEW_OUTPUT_FORMAT") {
        config.output.format = val;
    }
    if let Some(val) = lookup("APIVIEW_STUB_BODY") {
        config.render.stub_body = val;
    }
    if let Some(val) = lookup("APIVIEW_INDENT_WIDTH") {
        config.render.indent_width = val.parse().map_err(|_| ConfigError::InvalidValue {
            key: "APIVIEW_INDENT_WIDTH".to_string(),
            message: format!("expected a non-negative integer, got '{}'", val),
        })?;
    }
    Ok(config)
}

fn validate(config: &ApiViewConfig) -> Result<(), ConfigError> {
    if !OUTPUT_FORMATS.contains(&config.output.format.as_str()) {
        return Err(ConfigError::InvalidValue {
            key: "output.format".to_string(),
            message: format!(
                "'{}' is not one of {}",
                config.output.format,
                OUTPUT_FORMATS.join(", ")
            ),
        });
    }
    if config.render.indent_width > 16 {
        return Err(ConfigError::InvalidValue {
            key: "render.indent_width".to_string(),
            message: format!("{} is larger than 16", config.render.indent_width),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> DefaultConfigService {
        DefaultConfigService::new(temp.path()).with_global_path(temp.path().join("global.toml"))
    }

    #[tokio::test]
    async fn test_load_defaults_without_files() {
        let temp = TempDir::new().unwrap();
        let config = service(&temp).load(true).await.unwrap();
        assert_eq!(config.render.indent_width, 4);
        assert_eq!(config.output.format, "text");
    }

    #[tokio::test]
    async fn test_project_layer_merges_keys() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("global.toml"),
            "[render]\nindent_width = 2\nstub_body = \"null;\"\n",
        )
        .unwrap();
        std::fs::create_dir_all(temp.path().join(".apiview")).unwrap();
        std::fs::write(
            temp.path().join(".apiview/config.toml"),
            "[render]\nstub_body = \"throw new NotImplementedException();\"\n",
        )
        .unwrap();

        let svc = service(&temp);
        let global = svc.load(true).await.unwrap();
        assert_eq!(global.render.stub_body, "null;");

        let config = svc.load(false).await.unwrap();
        assert_eq!(config.render.indent_width, 2);
        assert_eq!(config.render.stub_body, "throw new NotImplementedException();");
    }

    #[tokio::test]
    async fn test_init_writes_default_and_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);

        let path = svc.init(false, false).await.unwrap();
        assert_eq!(path, temp.path().join(".apiview").join("config.toml"));
        let written: ApiViewConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.render.stub_body, "throw null;");

        let err = svc.init(false, false).await.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(svc.init(false, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_toml_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("global.toml"), "[render\n").unwrap();
        let err = service(&temp).load(true).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env_overrides(ApiViewConfig::default(), |key| match key {
            "APIVIEW_OUTPUT_FORMAT" => Some("html".to_string()),
            "APIVIEW_INDENT_WIDTH" => Some("2".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.output.format, "html");
        assert_eq!(config.render.indent_width, 2);
        assert_eq!(config.render.stub_body, "throw null;");

        let err = apply_env_overrides(ApiViewConfig::default(), |key| {
            (key == "APIVIEW_INDENT_WIDTH").then(|| "wide".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "APIVIEW_INDENT_WIDTH"));
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let mut config = ApiViewConfig::default();
        config.output.format = "pdf".to_string();
        assert!(validate(&config).is_err());
        config.output.format = "json".to_string();
        assert!(validate(&config).is_ok());
    }
}
