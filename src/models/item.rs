use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Movie,
    Series,
    Documentary,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Movie, Category::Series, Category::Documentary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "Movie",
            Category::Series => "Series",
            Category::Documentary => "Documentary",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// A catalog entry (movie, series or documentary)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub category: Category,
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Popularity as a whole percentage (0-100)
    #[serde(deserialize_with = "deserialize_popularity")]
    pub popularity: u8,
    #[serde(default)]
    pub image_url: String,
}

impl Item {
    /// Returns true if the item carries any of the given genres
    pub fn has_any_genre<'a, I>(&self, genres: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        genres.into_iter().any(|g| self.genres.contains(g))
    }
}

/// The recommendation service reports popularity as a float; round and clamp it
/// into a whole percentage.
fn deserialize_popularity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}
