use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rated review left on a recommendation. One per reviewer per
/// recommendation; the backend enforces it, the client greys out the form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub recommendation_id: String,
    pub rating: u8,
    pub review_text: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
    #[serde(default)]
    pub reviewer_photo: String,
    pub created_at: DateTime<Utc>,
}

/// Form state for the review modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub rating: Option<u8>,
    pub text: String,
}

impl ReviewDraft {
    pub fn validate(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        match self.rating {
            None => problems.push("Pick a rating."),
            Some(r) if !(1..=5).contains(&r) => problems.push("Rating must be between 1 and 5."),
            _ => {}
        }
        if self.text.trim().is_empty() {
            problems.push("Write a few words for your review.");
        }
        problems
    }
}

pub fn has_reviewed(reviews: &[Review], email: &str) -> bool {
    reviews.iter().any(|r| r.reviewer_email == email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_range_is_rejected() {
        let draft = ReviewDraft {
            rating: Some(6),
            text: "too good".into(),
        };
        assert_eq!(draft.validate(), vec!["Rating must be between 1 and 5."]);
    }

    #[test]
    fn missing_rating_and_text_both_reported() {
        let draft = ReviewDraft::default();
        assert_eq!(draft.validate().len(), 2);
    }
}
