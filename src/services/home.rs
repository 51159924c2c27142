//! Home page composition.
//!
//! Three sections are served: the recommended list (cold-start results, the
//! service's personalized list, or the local fallback), the trending list
//! (catalog order by popularity) and a "because you liked" strip that relabels
//! part of the recommended list.
//!
//! Every fetch takes a [`FetchTicket`]. Results arriving for a ticket that is no
//! longer current are dropped, so a slow response can never overwrite the
//! outcome of a later selection, refresh or cold-start submission.

use std::{ops::Range, sync::Arc};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{ColdStartAnswer, FeatureRow, Item, Recommendation, Source},
    services::{
        catalog::ItemRepository,
        explore::{explore, ExploreQuery},
        providers::{FallbackGenerator, RecommendationProvider},
    },
};

/// Entries shown per section
pub const SECTION_SIZE: usize = 4;

/// Title the "because you liked" strip is anchored on
pub const LIKED_ANCHOR_TITLE: &str = "The Matrix";

const LIKED_SLICE: Range<usize> = 2..6;
const LIKED_BASE_SCORE: f64 = 0.82;
const LIKED_SCORE_STEP: f64 = 0.05;

/// Message returned to the browser when a cold-start submission fails
pub const COLD_START_FAILURE_NOTICE: &str =
    "Failed to connect to recommendation engine. Please ensure backend is running.";

/// Where the current recommendation list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationOrigin {
    /// Nothing loaded yet
    Pending,
    ColdStart,
    Service,
    Fallback,
}

/// How a failed fetch is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Replace the list with locally generated recommendations
    Fallback,
    /// Keep whatever is currently shown
    KeepCurrent,
}

/// Result of applying a fetch to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOutcome {
    Applied,
    FellBack,
    KeptCurrent,
    /// A newer request superseded this one; its result was discarded
    Stale,
}

/// Permission to apply the result of one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    user_id: String,
}

impl FetchTicket {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// State owned by the home page
#[derive(Debug, Clone)]
pub struct HomeView {
    selected_user: Option<String>,
    recommendations: Vec<Recommendation>,
    origin: RecommendationOrigin,
    loading: bool,
    generation: u64,
}

impl HomeView {
    pub fn new(selected_user: Option<String>) -> Self {
        Self {
            selected_user,
            recommendations: Vec::new(),
            origin: RecommendationOrigin::Pending,
            loading: false,
            generation: 0,
        }
    }

    pub fn selected_user(&self) -> Option<&str> {
        self.selected_user.as_deref()
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn origin(&self) -> RecommendationOrigin {
        self.origin
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn issue_ticket(&mut self, user_id: String) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            user_id,
        }
    }

    /// Switches to `user_id`, dropping any cold-start results
    pub fn select_user(&mut self, user_id: &str) -> FetchTicket {
        self.selected_user = Some(user_id.to_string());
        if self.origin == RecommendationOrigin::ColdStart {
            self.recommendations.clear();
            self.origin = RecommendationOrigin::Pending;
        }
        self.issue_ticket(user_id.to_string())
    }

    /// Repeats the fetch for the current selection, if there is one
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        let user_id = self.selected_user.clone()?;
        Some(self.issue_ticket(user_id))
    }

    /// Applies a fetch result unless a newer request has been issued since
    pub fn apply_fetch<F>(
        &mut self,
        ticket: &FetchTicket,
        result: AppResult<Vec<Recommendation>>,
        policy: FailurePolicy,
        fallback: F,
    ) -> FetchOutcome
    where
        F: FnOnce(&str) -> Vec<Recommendation>,
    {
        if ticket.generation != self.generation {
            tracing::debug!(
                user_id = %ticket.user_id,
                ticket = ticket.generation,
                current = self.generation,
                "Discarding superseded recommendation response"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;

        match (result, policy) {
            (Ok(recommendations), _) => {
                self.recommendations = recommendations;
                self.origin = RecommendationOrigin::Service;
                FetchOutcome::Applied
            }
            (Err(e), FailurePolicy::Fallback) => {
                tracing::warn!(
                    error = %e,
                    user_id = %ticket.user_id,
                    "Recommendation fetch failed, using fallback"
                );
                self.recommendations = fallback(&ticket.user_id);
                self.origin = RecommendationOrigin::Fallback;
                FetchOutcome::FellBack
            }
            (Err(e), FailurePolicy::KeepCurrent) => {
                tracing::error!(
                    error = %e,
                    user_id = %ticket.user_id,
                    "Recommendation refresh failed"
                );
                FetchOutcome::KeptCurrent
            }
        }
    }

    /// Shows cold-start results, superseding any fetch still in flight
    pub fn install_cold_start(&mut self, recommendations: Vec<Recommendation>) {
        self.generation += 1;
        self.loading = false;
        self.recommendations = recommendations;
        self.origin = RecommendationOrigin::ColdStart;
    }
}

/// A titled group of entries
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Section<T> {
    pub title: String,
    pub subtitle: String,
    pub entries: Vec<T>,
}

/// Everything the home page renders
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HomeSections {
    pub selected_user_id: Option<String>,
    pub loading: bool,
    pub origin: RecommendationOrigin,
    pub recommended: Option<Section<Recommendation>>,
    pub trending: Section<Item>,
    pub because_you_liked: Option<Section<Recommendation>>,
}

/// Most popular catalog items, without touching the repository's own order
pub fn trending(repository: &ItemRepository, size: usize) -> Vec<Item> {
    explore(repository.all(), &ExploreQuery::default())
        .into_iter()
        .take(size)
        .cloned()
        .collect()
}

/// Relabels part of the recommended list as content matches with a descending
/// display score. No new ranking is computed.
pub fn because_you_liked(recommendations: &[Recommendation]) -> Vec<Recommendation> {
    let end = LIKED_SLICE.end.min(recommendations.len());
    let start = LIKED_SLICE.start.min(end);

    recommendations[start..end]
        .iter()
        .enumerate()
        .map(|(index, rec)| Recommendation {
            source: Source::Content,
            score: LIKED_BASE_SCORE - index as f64 * LIKED_SCORE_STEP,
            ..rec.clone()
        })
        .collect()
}

/// Builds the home page sections from the view state
pub fn compose(view: &HomeView, repository: &ItemRepository, trending_size: usize) -> HomeSections {
    let cold_start = view.origin == RecommendationOrigin::ColdStart;

    let recommended = (view.selected_user.is_some() || cold_start).then(|| {
        let (title, subtitle) = if cold_start {
            ("Matches for Your Preferences", "Based on your choices")
        } else {
            ("Recommended For You", "Curated selections based on your taste")
        };
        Section {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            entries: view
                .recommendations
                .iter()
                .take(SECTION_SIZE)
                .cloned()
                .collect(),
        }
    });

    let because = view.selected_user.as_ref().map(|_| Section {
        title: format!("Because You Liked '{}'", LIKED_ANCHOR_TITLE),
        subtitle: "Movies with similar themes and style".to_string(),
        entries: because_you_liked(&view.recommendations),
    });

    HomeSections {
        selected_user_id: view.selected_user.clone(),
        loading: view.loading,
        origin: view.origin,
        recommended,
        trending: Section {
            title: "Trending Now".to_string(),
            subtitle: "What everyone is watching right now".to_string(),
            entries: trending(repository, trending_size),
        },
        because_you_liked: because,
    }
}

/// Detail page payload for a single item
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItemDetail {
    pub item: Item,
    /// Present when the item is part of the current recommendations
    pub recommendation: Option<Recommendation>,
    pub features: Vec<FeatureRow>,
    pub related: Vec<Recommendation>,
}

/// Home view state plus the collaborators needed to populate it
pub struct HomeFeed {
    view: RwLock<HomeView>,
    provider: Arc<dyn RecommendationProvider>,
    repository: Arc<ItemRepository>,
    fallback: FallbackGenerator,
    trending_size: usize,
}

impl HomeFeed {
    pub fn new(
        provider: Arc<dyn RecommendationProvider>,
        repository: Arc<ItemRepository>,
        fallback: FallbackGenerator,
        default_user: Option<String>,
        trending_size: usize,
    ) -> Self {
        Self {
            view: RwLock::new(HomeView::new(default_user)),
            provider,
            repository,
            fallback,
            trending_size,
        }
    }

    /// Snapshot of the current view state
    pub async fn view(&self) -> HomeView {
        self.view.read().await.clone()
    }

    /// Current sections, loading the selected user's list first if nothing has
    /// been loaded yet
    pub async fn sections(&self) -> HomeSections {
        let initial = {
            let view = self.view.read().await;
            match view.selected_user() {
                Some(user_id)
                    if view.origin == RecommendationOrigin::Pending && !view.loading =>
                {
                    Some(user_id.to_string())
                }
                _ => None,
            }
        };

        if let Some(user_id) = initial {
            self.select_user(&user_id).await;
        }

        let view = self.view.read().await;
        compose(&view, &self.repository, self.trending_size)
    }

    /// Selects a user and fetches their recommendations, falling back to the
    /// local generator on failure
    pub async fn select_user(&self, user_id: &str) -> FetchOutcome {
        let ticket = self.view.write().await.select_user(user_id);
        let result = self.provider.fetch_user_recommendations(user_id).await;

        let outcome = self.view.write().await.apply_fetch(
            &ticket,
            result,
            FailurePolicy::Fallback,
            |user_id| self.fallback.generate(&self.repository, user_id),
        );

        tracing::info!(
            user_id = %user_id,
            provider = self.provider.name(),
            outcome = ?outcome,
            "User selected"
        );

        outcome
    }

    /// Repeats the fetch for the selected user. A failure keeps the current list.
    pub async fn refresh(&self) -> AppResult<FetchOutcome> {
        let ticket = self
            .view
            .write()
            .await
            .begin_refresh()
            .ok_or_else(|| AppError::InvalidInput("No user selected".to_string()))?;

        let result = self
            .provider
            .fetch_user_recommendations(ticket.user_id())
            .await;

        let outcome = self.view.write().await.apply_fetch(
            &ticket,
            result,
            FailurePolicy::KeepCurrent,
            |user_id| self.fallback.generate(&self.repository, user_id),
        );

        Ok(outcome)
    }

    /// Submits a questionnaire. On success the results replace the recommended
    /// section; on failure the view is left untouched.
    pub async fn submit_cold_start(
        &self,
        answer: &ColdStartAnswer,
    ) -> AppResult<Vec<Recommendation>> {
        match self.provider.submit_cold_start(answer).await {
            Ok(recommendations) => {
                self.view
                    .write()
                    .await
                    .install_cold_start(recommendations.clone());
                tracing::info!(
                    results = recommendations.len(),
                    "Preferences saved, cold-start recommendations installed"
                );
                Ok(recommendations)
            }
            Err(e) => {
                tracing::error!(error = %e, "Cold-start submission failed");
                Err(AppError::ExternalApi(COLD_START_FAILURE_NOTICE.to_string()))
            }
        }
    }

    /// Item page: the item, its feature breakdown when it is currently
    /// recommended, and up to four other recommendations
    pub async fn item_detail(&self, item_id: &str) -> AppResult<ItemDetail> {
        let recommendations = {
            let view = self.view.read().await;
            if view.recommendations.is_empty() {
                let user_id = view.selected_user().unwrap_or_default().to_string();
                self.fallback.generate(&self.repository, &user_id)
            } else {
                view.recommendations.clone()
            }
        };

        // Service ids need not exist in the local catalog
        let recommendation = recommendations
            .iter()
            .find(|rec| rec.item.id == item_id)
            .cloned();
        let item = match &recommendation {
            Some(rec) => rec.item.clone(),
            None => self
                .repository
                .get(item_id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Item {}", item_id)))?,
        };

        let features = recommendation
            .as_ref()
            .map(Recommendation::feature_breakdown)
            .unwrap_or_default();
        let related = recommendations
            .into_iter()
            .filter(|rec| rec.item.id != item.id)
            .take(SECTION_SIZE)
            .collect();

        Ok(ItemDetail {
            item,
            recommendation,
            features,
            related,
        })
    }
}
