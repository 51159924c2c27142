use serde::{Deserialize, Serialize};

use super::Gender;
use crate::error::AppError;

/// Fewest interests a questionnaire may be submitted with
pub const MIN_INTERESTS: usize = 2;

/// Interest tags offered by the questionnaire
pub const INTEREST_TAGS: [&str; 8] = [
    "action",
    "comedy",
    "drama",
    "scifi",
    "romance",
    "thriller",
    "documentary",
    "animation",
];

/// Occupations offered by the questionnaire
pub const OCCUPATIONS: [&str; 10] = [
    "Student",
    "Engineer",
    "Designer",
    "Marketing",
    "Healthcare",
    "Finance",
    "Education",
    "Retail",
    "Entertainment",
    "Other",
];

/// Raw questionnaire payload as submitted by the browser
#[derive(Debug, Clone, Deserialize)]
pub struct ColdStartRequest {
    pub gender: Gender,
    pub occupation: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// A validated questionnaire answer.
///
/// Only constructible through `TryFrom<ColdStartRequest>`, so the recommendation
/// client can never be handed fewer than [`MIN_INTERESTS`] distinct interests.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColdStartAnswer {
    gender: Gender,
    occupation: String,
    interests: Vec<String>,
}

impl ColdStartAnswer {
    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn occupation(&self) -> &str {
        &self.occupation
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }
}

impl TryFrom<ColdStartRequest> for ColdStartAnswer {
    type Error = AppError;

    fn try_from(request: ColdStartRequest) -> Result<Self, Self::Error> {
        let occupation = request.occupation.trim().to_string();
        if occupation.is_empty() {
            return Err(AppError::InvalidInput(
                "Occupation cannot be empty".to_string(),
            ));
        }

        let mut interests: Vec<String> = Vec::with_capacity(request.interests.len());
        for raw in request.interests {
            let tag = raw.trim().to_lowercase();
            if !INTEREST_TAGS.contains(&tag.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Unknown interest '{}'",
                    raw
                )));
            }
            if !interests.contains(&tag) {
                interests.push(tag);
            }
        }

        if interests.len() < MIN_INTERESTS {
            return Err(AppError::InvalidInput(format!(
                "Select at least {} interests",
                MIN_INTERESTS
            )));
        }

        Ok(Self {
            gender: request.gender,
            occupation,
            interests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(interests: &[&str]) -> ColdStartRequest {
        ColdStartRequest {
            gender: Gender::Female,
            occupation: "Engineer".to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_answer() {
        let answer = ColdStartAnswer::try_from(request(&["action", "Comedy"])).unwrap();
        assert_eq!(answer.interests(), &["action", "comedy"]);
        assert_eq!(answer.occupation(), "Engineer");
        assert_eq!(answer.gender(), Gender::Female);
    }

    #[test]
    fn test_single_interest_rejected() {
        let result = ColdStartAnswer::try_from(request(&["drama"]));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_duplicates_do_not_count_twice() {
        let result = ColdStartAnswer::try_from(request(&["drama", "drama"]));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_interest_rejected() {
        let result = ColdStartAnswer::try_from(request(&["drama", "cooking"]));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_blank_occupation_rejected() {
        let mut req = request(&["drama", "scifi"]);
        req.occupation = "  ".to_string();
        assert!(ColdStartAnswer::try_from(req).is_err());
    }

    #[test]
    fn test_answer_serializes_as_service_body() {
        let answer = ColdStartAnswer::try_from(request(&["scifi", "romance"])).unwrap();
        let body = serde_json::to_value(&answer).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "gender": "female",
                "occupation": "Engineer",
                "interests": ["scifi", "romance"]
            })
        );
    }
}
