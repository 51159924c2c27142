use serde::{Deserialize, Serialize};

use super::Item;

/// Upstream signal that produced a recommendation. Informational only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Svd,
    Content,
    Hybrid,
    Trending,
}

impl Source {
    /// Labels a feature vector the way the recommendation service does:
    /// hybrid when both collaborative and content signals are strong, otherwise
    /// whichever of the two dominates, trending on a tie.
    pub fn from_features(features: &Features) -> Self {
        let svd = features.svd_score.unwrap_or(0.0);
        let content = features.content_similarity.unwrap_or(0.0);

        if svd > 0.8 && content > 0.7 {
            Source::Hybrid
        } else if svd > content {
            Source::Svd
        } else if content > svd {
            Source::Content
        } else {
            Source::Trending
        }
    }
}

/// Ranking features reported with a recommendation, each in 0.0-1.0
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svd_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_item_similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographic_match: Option<f64>,
}

/// Names of the ranking features, in display order
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FeatureName {
    SvdScore,
    ContentSimilarity,
    UserItemSimilarity,
    Popularity,
    Recency,
    DemographicMatch,
}

impl FeatureName {
    pub const ALL: [FeatureName; 6] = [
        FeatureName::SvdScore,
        FeatureName::ContentSimilarity,
        FeatureName::UserItemSimilarity,
        FeatureName::Popularity,
        FeatureName::Recency,
        FeatureName::DemographicMatch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FeatureName::SvdScore => "SVD Score",
            FeatureName::ContentSimilarity => "Content Match",
            FeatureName::UserItemSimilarity => "Embedding Sim",
            FeatureName::Popularity => "Popularity",
            FeatureName::Recency => "Recency",
            FeatureName::DemographicMatch => "Demo Match",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FeatureName::SvdScore => "Collaborative filtering prediction",
            FeatureName::ContentSimilarity => "Genre/description similarity",
            FeatureName::UserItemSimilarity => "User-item embedding distance",
            FeatureName::Popularity => "Overall item popularity",
            FeatureName::Recency => "Release date freshness",
            FeatureName::DemographicMatch => "Demographic compatibility",
        }
    }
}

impl Features {
    pub fn get(&self, name: FeatureName) -> Option<f64> {
        match name {
            FeatureName::SvdScore => self.svd_score,
            FeatureName::ContentSimilarity => self.content_similarity,
            FeatureName::UserItemSimilarity => self.user_item_similarity,
            FeatureName::Popularity => self.popularity,
            FeatureName::Recency => self.recency,
            FeatureName::DemographicMatch => self.demographic_match,
        }
    }
}

/// One row of the feature explanation panel
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureRow {
    pub key: FeatureName,
    pub label: &'static str,
    pub description: &'static str,
    pub percentage: f64,
}

/// A ranked catalog item with its score, source tag and feature vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub item: Item,
    pub score: f64,
    pub source: Source,
    #[serde(default)]
    pub features: Features,
}

impl Recommendation {
    /// Present features as percentages, skipping the ones the service left out
    pub fn feature_breakdown(&self) -> Vec<FeatureRow> {
        FeatureName::ALL
            .into_iter()
            .filter_map(|name| {
                self.features.get(name).map(|value| FeatureRow {
                    key: name,
                    label: name.label(),
                    description: name.description(),
                    percentage: value * 100.0,
                })
            })
            .collect()
    }
}
