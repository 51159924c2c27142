/// Recommendation provider abstraction
///
/// The external scoring service is reached through [`RecommendationProvider`], so
/// view composition can be exercised against a mock and the HTTP client can be
/// swapped without touching callers. The local [`fallback::FallbackGenerator`]
/// is deliberately not a provider: it never fails and is only consulted after a
/// provider call did.
use crate::{
    error::AppResult,
    models::{ColdStartAnswer, Recommendation},
};

pub mod fallback;
pub mod http;

pub use fallback::FallbackGenerator;
pub use http::HttpRecommender;

/// Trait for recommendation sources
///
/// Every call is attempted exactly once; callers decide how to degrade.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Personalized, ranked recommendations for a known user
    async fn fetch_user_recommendations(&self, user_id: &str) -> AppResult<Vec<Recommendation>>;

    /// Recommendations for a new user from their questionnaire answers
    async fn submit_cold_start(&self, answer: &ColdStartAnswer) -> AppResult<Vec<Recommendation>>;

    /// Best-effort health probe. Failures are logged and reported as `None`.
    async fn health(&self) -> Option<serde_json::Value>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
