/// HTTP client for the external recommendation service
///
/// Endpoints:
/// 1. Personalized: `GET /api/recommend/user/{user_id}?limit=N`
/// 2. Cold start: `POST /api/recommend/cold-start?limit=N` with the questionnaire as JSON
/// 3. Health: `GET /`
///
/// Non-success statuses become [`AppError::ExternalApi`]; the error body is not read.
use reqwest::{Client as HttpClient, Response, Url};
use tracing::instrument;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ColdStartAnswer, Recommendation},
    services::providers::RecommendationProvider,
};

#[derive(Clone)]
pub struct HttpRecommender {
    http_client: HttpClient,
    api_url: Url,
    user_limit: usize,
    cold_start_limit: usize,
}

impl HttpRecommender {
    /// Creates a client for the service configured in `config`
    pub fn new(config: &Config) -> AppResult<Self> {
        let api_url = Url::parse(&config.recommender_api_url).map_err(|e| {
            AppError::InvalidInput(format!(
                "Invalid recommender URL {}: {}",
                config.recommender_api_url, e
            ))
        })?;

        let http_client = HttpClient::builder()
            .timeout(config.recommender_timeout())
            .build()?;

        Ok(Self {
            http_client,
            api_url,
            user_limit: config.user_recommendation_limit,
            cold_start_limit: config.cold_start_limit,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Internal(format!("Recommender URL {} cannot be a base", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_recommendations(response: Response) -> AppResult<Vec<Recommendation>> {
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "Recommendation service returned status {}",
                status
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for HttpRecommender {
    #[instrument(skip(self), fields(provider = "http"))]
    async fn fetch_user_recommendations(&self, user_id: &str) -> AppResult<Vec<Recommendation>> {
        let url = self.endpoint(&["api", "recommend", "user", user_id])?;

        let response = self
            .http_client
            .get(url)
            .query(&[("limit", self.user_limit)])
            .send()
            .await?;

        let recommendations = Self::read_recommendations(response).await?;

        tracing::info!(
            user_id = %user_id,
            results = recommendations.len(),
            "User recommendations fetched"
        );

        Ok(recommendations)
    }

    #[instrument(
        skip(self, answer),
        fields(provider = "http", interests = answer.interests().len())
    )]
    async fn submit_cold_start(&self, answer: &ColdStartAnswer) -> AppResult<Vec<Recommendation>> {
        let url = self.endpoint(&["api", "recommend", "cold-start"])?;

        let response = self
            .http_client
            .post(url)
            .query(&[("limit", self.cold_start_limit)])
            .json(answer)
            .send()
            .await?;

        let recommendations = Self::read_recommendations(response).await?;

        tracing::info!(
            results = recommendations.len(),
            "Cold-start recommendations fetched"
        );

        Ok(recommendations)
    }

    async fn health(&self) -> Option<serde_json::Value> {
        let result = async {
            let response = self
                .http_client
                .get(self.api_url.clone())
                .send()
                .await?
                .error_for_status()?;
            response.json::<serde_json::Value>().await
        }
        .await;

        match result {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(error = %e, provider = "http", "Recommender health check failed");
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
