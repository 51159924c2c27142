use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::{
    config::Config,
    error::AppResult,
    services::{
        catalog::{ItemRepository, UserDirectory},
        home::HomeFeed,
        providers::{FallbackGenerator, HttpRecommender, RecommendationProvider},
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

/// Catalog, directory and home view shared by all handlers
pub struct AppStateInner {
    pub catalog: Arc<ItemRepository>,
    pub users: UserDirectory,
    pub provider: Arc<dyn RecommendationProvider>,
    pub home: HomeFeed,
}

impl AppState {
    /// Creates state around the given recommendation provider
    pub fn new(config: &Config, provider: Arc<dyn RecommendationProvider>) -> AppResult<Self> {
        let catalog = Arc::new(ItemRepository::seeded()?);
        let users = UserDirectory::seeded();
        let default_user = users.default_user().map(|user| user.id.clone());

        let home = HomeFeed::new(
            provider.clone(),
            catalog.clone(),
            FallbackGenerator::new(Utc::now().year()),
            default_user,
            config.trending_size,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                catalog,
                users,
                provider,
                home,
            }),
        })
    }

    /// Creates state backed by the HTTP recommendation service in `config`
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let provider = HttpRecommender::new(config)?;
        Self::new(config, Arc::new(provider))
    }
}
