use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{
        ColdStartAnswer, ColdStartRequest, Item, Recommendation, User, INTEREST_TAGS,
        MIN_INTERESTS, OCCUPATIONS,
    },
    services::{
        explore::{explore, ExploreQuery},
        home::{FetchOutcome, HomeSections, ItemDetail},
    },
};

use super::AppState;

// Request/Response types

/// Query string of the explore endpoint. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ExploreParams {
    pub q: Option<String>,
    pub category: Option<String>,
    /// Comma-separated genre names
    pub genres: Option<String>,
    pub years: Option<String>,
    pub sort: Option<String>,
    /// `asc` or `desc` (default)
    pub order: Option<String>,
}

impl TryFrom<ExploreParams> for ExploreQuery {
    type Error = AppError;

    fn try_from(params: ExploreParams) -> Result<Self, Self::Error> {
        let ascending = match params.order.as_deref().map(str::to_lowercase).as_deref() {
            None | Some("") | Some("desc") => false,
            Some("asc") => true,
            Some(other) => {
                return Err(AppError::InvalidInput(format!(
                    "unknown order '{}'",
                    other
                )))
            }
        };

        Ok(ExploreQuery {
            query: params.q.unwrap_or_default().trim().to_string(),
            category: params
                .category
                .unwrap_or_default()
                .parse()
                .map_err(AppError::InvalidInput)?,
            genres: params
                .genres
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect(),
            years: params
                .years
                .unwrap_or_default()
                .parse()
                .map_err(AppError::InvalidInput)?,
            sort: params
                .sort
                .unwrap_or_default()
                .parse()
                .map_err(AppError::InvalidInput)?,
            ascending,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ExploreResponse {
    pub total: usize,
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
pub struct SelectUserRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct HomeUpdateResponse {
    pub outcome: FetchOutcome,
    pub home: HomeSections,
}

#[derive(Debug, Serialize)]
pub struct ColdStartResponse {
    pub notice: &'static str,
    pub recommendations: Vec<Recommendation>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Best-effort probe of the recommendation service
pub async fn upstream_health(State(state): State<AppState>) -> Json<Value> {
    let provider = &state.inner.provider;
    let body = provider.health().await;
    Json(json!({
        "provider": provider.name(),
        "healthy": body.is_some(),
        "body": body,
    }))
}

/// Search, filter and sort the catalog
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ExploreParams>,
) -> AppResult<Json<ExploreResponse>> {
    let query = ExploreQuery::try_from(params)?;
    let items: Vec<Item> = explore(state.inner.catalog.all(), &query)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(query = ?query, results = items.len(), "Explore query served");

    Ok(Json(ExploreResponse {
        total: items.len(),
        items,
    }))
}

/// Item detail with feature breakdown and related recommendations
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ItemDetail>> {
    let detail = state.inner.home.item_detail(&id).await?;
    Ok(Json(detail))
}

/// Static user directory
pub async fn get_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.inner.users.all().to_vec())
}

/// Composed home page sections
pub async fn get_home(State(state): State<AppState>) -> Json<HomeSections> {
    Json(state.inner.home.sections().await)
}

/// Switch the home page to another user profile
pub async fn select_user(
    State(state): State<AppState>,
    Json(request): Json<SelectUserRequest>,
) -> AppResult<Json<HomeUpdateResponse>> {
    if state.inner.users.get(&request.user_id).is_none() {
        return Err(AppError::NotFound(format!("User {}", request.user_id)));
    }

    let home = &state.inner.home;
    let outcome = home.select_user(&request.user_id).await;

    Ok(Json(HomeUpdateResponse {
        outcome,
        home: home.sections().await,
    }))
}

/// Repeat the recommendation fetch for the selected user
pub async fn refresh_home(State(state): State<AppState>) -> AppResult<Json<HomeUpdateResponse>> {
    let home = &state.inner.home;
    let outcome = home.refresh().await?;

    Ok(Json(HomeUpdateResponse {
        outcome,
        home: home.sections().await,
    }))
}

/// Choices offered by the onboarding questionnaire
pub async fn cold_start_options() -> Json<Value> {
    Json(json!({
        "genders": ["male", "female", "other"],
        "occupations": OCCUPATIONS,
        "interests": INTEREST_TAGS,
        "min_interests": MIN_INTERESTS,
    }))
}

/// Submit the onboarding questionnaire
pub async fn submit_cold_start(
    State(state): State<AppState>,
    Json(request): Json<ColdStartRequest>,
) -> AppResult<Json<ColdStartResponse>> {
    let answer = ColdStartAnswer::try_from(request)?;
    let recommendations = state.inner.home.submit_cold_start(&answer).await?;

    Ok(Json(ColdStartResponse {
        notice: "Preferences saved! Generated personalized recommendations.",
        recommendations,
    }))
}
