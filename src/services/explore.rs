//! Catalog search, filtering and sorting.
//!
//! [`explore`] is a pure function of the item slice and the query: it never
//! touches the repository and always yields the same order for the same input.

use std::{cmp::Ordering, collections::BTreeSet, str::FromStr};

use crate::models::{Category, Item};

/// Category selection; `All` disables the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    fn matches(&self, item: &Item) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Release-year buckets offered by the explore page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearRange {
    #[default]
    All,
    From2020,
    From2010To2019,
    From2000To2009,
    From1990To1999,
    Before1990,
}

impl YearRange {
    fn matches(&self, year: i32) -> bool {
        match self {
            YearRange::All => true,
            YearRange::From2020 => year >= 2020,
            YearRange::From2010To2019 => (2010..=2019).contains(&year),
            YearRange::From2000To2009 => (2000..=2009).contains(&year),
            YearRange::From1990To1999 => (1990..=1999).contains(&year),
            YearRange::Before1990 => year < 1990,
        }
    }
}

impl FromStr for YearRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "all years" => Ok(YearRange::All),
            "2020+" => Ok(YearRange::From2020),
            "2010-2019" => Ok(YearRange::From2010To2019),
            "2000-2009" => Ok(YearRange::From2000To2009),
            "1990-1999" => Ok(YearRange::From1990To1999),
            "before 1990" | "before-1990" => Ok(YearRange::Before1990),
            other => Err(format!("unknown year range '{}'", other)),
        }
    }
}

/// Sort key. `Rating` has no field of its own and orders by popularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Popularity,
    Rating,
    Newest,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "popularity" => Ok(SortKey::Popularity),
            "rating" => Ok(SortKey::Rating),
            "newest" => Ok(SortKey::Newest),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// Full explore configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExploreQuery {
    pub query: String,
    pub category: CategoryFilter,
    pub genres: BTreeSet<String>,
    pub years: YearRange,
    pub sort: SortKey,
    /// Flips the default (descending) order
    pub ascending: bool,
}

impl ExploreQuery {
    fn matches(&self, item: &Item, needle: &str) -> bool {
        if !needle.is_empty() && !item.title.to_lowercase().contains(needle) {
            return false;
        }
        if !self.category.matches(item) {
            return false;
        }
        if !self.genres.is_empty() && !item.has_any_genre(&self.genres) {
            return false;
        }
        self.years.matches(item.year)
    }

    /// Descending comparator for the selected key
    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ordering = match self.sort {
            SortKey::Popularity | SortKey::Rating => b.popularity.cmp(&a.popularity),
            SortKey::Newest => b.year.cmp(&a.year),
        };

        if self.ascending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Filters and orders `items` according to `query`.
///
/// Ties keep their input order.
pub fn explore<'a>(items: &'a [Item], query: &ExploreQuery) -> Vec<&'a Item> {
    let needle = query.query.to_lowercase();

    let mut results: Vec<&Item> = items
        .iter()
        .filter(|item| query.matches(item, &needle))
        .collect();

    results.sort_by(|a, b| query.compare(a, b));
    results
}
