mod cold_start;
mod item;
mod recommendation;
mod user;

pub use cold_start::{ColdStartAnswer, ColdStartRequest, INTEREST_TAGS, MIN_INTERESTS, OCCUPATIONS};
pub use item::{Category, Item};
pub use recommendation::{FeatureName, FeatureRow, Features, Recommendation, Source};
pub use user::{Gender, User};
