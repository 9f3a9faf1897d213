use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::{CatalogIndex, CatalogProvider};
use scoring::ScoringEngine;
use session::SessionManager;
use tracing::info;

use crate::auth::{IdentityProvider, TokenTable};
use crate::config::ServerConfig;

/// Shared by every request handler
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub sessions: SessionManager,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        sessions: SessionManager,
        identity: Arc<dyn IdentityProvider>,
        config: ServerConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            catalog,
            sessions,
            identity,
            config,
        })
    }

    /// Load the catalog and token table named by the config
    pub fn load(config: ServerConfig) -> Result<Arc<Self>> {
        info!("Loading catalog from {}", config.catalog_path.display());
        let catalog: Arc<dyn CatalogProvider> = Arc::new(
            CatalogIndex::load_from_file(&config.catalog_path)
                .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?,
        );
        let identity = Arc::new(TokenTable::load_from_file(&config.tokens_path)?);

        let sessions = SessionManager::new(Arc::clone(&catalog))
            .with_policy(config.policy)
            .with_engine(ScoringEngine::new().with_matching(config.matching));
        info!("Ingredient matching: {}", config.matching);

        Ok(Self::new(catalog, sessions, identity, config))
    }
}
