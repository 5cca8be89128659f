//! Application container for apiview

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::OutputContext;
use crate::config::RenderPolicy;
use crate::error::ApiViewResult;
use crate::models::config::ApiViewConfig;
use crate::models::symbol::Assembly;
use crate::render::{self, CodeFile};
use crate::services::config::{ConfigService, DefaultConfigService};
use crate::services::provider::{JsonSymbolProvider, SymbolProvider};

pub struct App {
    root: PathBuf,
    pub(crate) output: OutputContext,
    pub(crate) config_service: Arc<dyn ConfigService>,
    pub(crate) config: ApiViewConfig,
    policy: RenderPolicy,
}

impl App {
    pub async fn new() -> anyhow::Result<Self> {
        let root = std::env::current_dir()?;
        tracing::debug!("Initializing apiview at {:?}", root);

        let config_service = Arc::new(DefaultConfigService::new(&root));
        let config = config_service.load(false).await.unwrap_or_else(|e| {
            tracing::warn!("Falling back to default config: {}", e);
            ApiViewConfig::default()
        });
        Ok(Self::with_config(root, config_service, config))
    }

    pub fn with_config(
        root: PathBuf,
        config_service: Arc<dyn ConfigService>,
        config: ApiViewConfig,
    ) -> Self {
        let policy = RenderPolicy::from(&config);
        Self {
            output: OutputContext::new(root.clone()),
            root,
            config_service,
            config,
            policy,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ApiViewConfig {
        &self.config
    }

    /// Load a symbol document and build its token stream
    pub async fn build(&self, input: &Path) -> ApiViewResult<(Assembly, CodeFile)> {
        let provider = JsonSymbolProvider::new(input);
        self.build_with(&provider).await
    }

    pub async fn build_with(
        &self,
        provider: &dyn SymbolProvider,
    ) -> ApiViewResult<(Assembly, CodeFile)> {
        let assembly = provider.load().await?;
        let file = render::build_code_file(&assembly, &self.policy)?;
        tracing::debug!(
            "Built {} tokens for {}",
            file.tokens.len(),
            assembly.display_name()
        );
        Ok((assembly, file))
    }
}
