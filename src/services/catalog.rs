//! Static in-memory catalog and user directory.
//!
//! Both are loaded once at startup and never change afterwards; everything
//! else borrows from them.

use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::{Category, Gender, Item, User},
};

/// Immutable collection of catalog items
#[derive(Debug, Clone)]
pub struct ItemRepository {
    items: Vec<Item>,
}

impl ItemRepository {
    /// Builds a repository, rejecting duplicate ids and items without genres
    pub fn new(items: Vec<Item>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(AppError::Internal(format!(
                    "Duplicate catalog item id {}",
                    item.id
                )));
            }
            if item.genres.is_empty() {
                return Err(AppError::Internal(format!(
                    "Catalog item {} has no genres",
                    item.id
                )));
            }
        }

        Ok(Self { items })
    }

    /// The built-in catalog shipped with the service
    pub fn seeded() -> AppResult<Self> {
        Self::new(seed_items())
    }

    pub fn all(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Static directory of selectable user profiles
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn seeded() -> Self {
        Self::new(seed_users())
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Profile selected when the home page is first opened
    pub fn default_user(&self) -> Option<&User> {
        self.users.first()
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    title: &str,
    year: i32,
    category: Category,
    genres: &[&str],
    popularity: u8,
    description: &str,
    photo: &str,
) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        year,
        category,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        description: description.to_string(),
        popularity,
        image_url: unsplash(photo, 400, 600),
    }
}

fn unsplash(photo: &str, width: u32, height: u32) -> String {
    format!(
        "https://images.unsplash.com/photo-{}?w={}&h={}&fit=crop",
        photo, width, height
    )
}

fn seed_items() -> Vec<Item> {
    use Category::*;

    vec![
        item(
            "1",
            "The Matrix",
            1999,
            Movie,
            &["Action", "Sci-Fi"],
            95,
            "A hacker discovers the world he lives in is a simulation.",
            "1536440136628-849c177e76a1",
        ),
        item(
            "2",
            "Inception",
            2010,
            Movie,
            &["Action", "Sci-Fi", "Thriller"],
            92,
            "A thief plants an idea inside a target's dreams.",
            "1478720568477-152d9b164e26",
        ),
        item(
            "3",
            "Breaking Bad",
            2008,
            Series,
            &["Drama", "Thriller"],
            94,
            "A chemistry teacher turns to making methamphetamine.",
            "1485846234645-a62644f84728",
        ),
        item(
            "4",
            "Planet Earth II",
            2016,
            Documentary,
            &["Documentary"],
            81,
            "Wildlife filmed across the planet's most extreme habitats.",
            "1444464666168-49d633b86797",
        ),
        item(
            "5",
            "The Grand Budapest Hotel",
            2014,
            Movie,
            &["Comedy", "Drama"],
            78,
            "A concierge and his lobby boy are framed for murder.",
            "1566073771259-6a8506099945",
        ),
        item(
            "6",
            "Spirited Away",
            2001,
            Movie,
            &["Animation", "Fantasy"],
            88,
            "A girl wanders into a world of spirits.",
            "1578632767115-351597cf2477",
        ),
        item(
            "7",
            "Stranger Things",
            2016,
            Series,
            &["Drama", "Sci-Fi", "Thriller"],
            90,
            "Kids in a small town face supernatural forces.",
            "1509347528160-9a9e33742cdb",
        ),
        item(
            "8",
            "The Office",
            2005,
            Series,
            &["Comedy"],
            86,
            "Everyday life at a paper company branch office.",
            "1497032628192-86f99bcd76bc",
        ),
        item(
            "9",
            "Pride and Prejudice",
            2005,
            Movie,
            &["Drama", "Romance"],
            72,
            "Elizabeth Bennet and Mr. Darcy misjudge each other.",
            "1518199266791-5375a83190b7",
        ),
        item(
            "10",
            "Mad Max: Fury Road",
            2015,
            Movie,
            &["Action", "Adventure"],
            85,
            "A desert chase across a post-apocalyptic wasteland.",
            "1504384308090-c894fdcc538d",
        ),
        item(
            "11",
            "Free Solo",
            2018,
            Documentary,
            &["Documentary", "Adventure"],
            69,
            "A climber attempts El Capitan without ropes.",
            "1522163182402-834f871fd851",
        ),
        item(
            "12",
            "Toy Story",
            1995,
            Movie,
            &["Animation", "Comedy"],
            83,
            "A cowboy doll feels threatened by a space ranger toy.",
            "1558060370-d644479cb6f7",
        ),
        item(
            "13",
            "Dune: Part Two",
            2024,
            Movie,
            &["Action", "Sci-Fi", "Adventure"],
            89,
            "Paul Atreides unites with the Fremen.",
            "1547234935-80c7145ec969",
        ),
        item(
            "14",
            "Alien",
            1979,
            Movie,
            &["Sci-Fi", "Thriller"],
            76,
            "A ship's crew is hunted by a deadly creature.",
            "1446776811953-b23d57bd21aa",
        ),
        item(
            "15",
            "La La Land",
            2016,
            Movie,
            &["Romance", "Comedy", "Drama"],
            74,
            "A jazz pianist and an actress chase their dreams.",
            "1514525253161-7a46d19cd819",
        ),
        item(
            "16",
            "Our Planet",
            2019,
            Documentary,
            &["Documentary"],
            66,
            "The impact of climate change on living creatures.",
            "1470071459604-3b5ec3a7fe05",
        ),
    ]
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "user1".to_string(),
            name: "Alex Chen".to_string(),
            gender: Gender::Male,
            occupation: "Engineer".to_string(),
            avatar: unsplash("1472099645785-5658abf4ff4e", 100, 100),
        },
        User {
            id: "user2".to_string(),
            name: "Sarah Miller".to_string(),
            gender: Gender::Female,
            occupation: "Designer".to_string(),
            avatar: unsplash("1494790108377-be9c29b29330", 100, 100),
        },
        User {
            id: "user3".to_string(),
            name: "James Wilson".to_string(),
            gender: Gender::Male,
            occupation: "Student".to_string(),
            avatar: unsplash("1507003211169-0a1dd7228f2d", 100, 100),
        },
    ]
}
