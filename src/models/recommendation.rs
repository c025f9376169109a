use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A suggested alternative product attached to a query. Likes are stored as
/// the likers' emails, comments inline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub query_id: String,
    pub query_title: String,
    pub product_name: String,
    #[serde(default)]
    pub product_image: String,
    pub recommendation_title: String,
    pub recommendation_reason: String,
    /// Owner of the query this recommendation answers.
    pub user_email: String,
    pub user_name: String,
    pub recommender_email: String,
    pub recommender_name: String,
    #[serde(default)]
    pub recommender_photo: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Recommendation {
    pub fn is_liked_by(&self, email: &str) -> bool {
        self.likes.iter().any(|e| e == email)
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Local mirror of the server's like toggle. Keeps at most one entry per
    /// email. Returns true when the email is now in the list.
    pub fn toggle_like(&mut self, email: &str) -> bool {
        if self.is_liked_by(email) {
            self.likes.retain(|e| e != email);
            false
        } else {
            self.likes.push(email.to_string());
            true
        }
    }
}

/// Comments are id-keyed: the backend assigns the id on creation, and a
/// freshly posted comment carries `None` until the response reconciles it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub author_name: String,
    pub author_email: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Comment {
    pub fn is_authored_by(&self, email: &str) -> bool {
        self.author_email == email
    }
}

/// Form state for the recommendation form on the query-details page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationDraft {
    pub title: String,
    pub product_name: String,
    pub product_image: String,
    pub reason: String,
    pub has_image_file: bool,
}

impl RecommendationDraft {
    pub fn validate(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if self.title.trim().is_empty() {
            problems.push("Recommendation title is required.");
        }
        if self.product_name.trim().is_empty() {
            problems.push("Product name is required.");
        }
        if self.reason.trim().is_empty() {
            problems.push("Recommendation reason is required.");
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec_with_likes(likes: &[&str]) -> Recommendation {
        Recommendation {
            likes: likes.iter().map(|s| s.to_string()).collect(),
            ..Recommendation::default()
        }
    }

    #[test]
    fn toggle_adds_then_removes_exactly_one_entry() {
        let mut rec = rec_with_likes(&["a@x.com"]);

        assert!(rec.toggle_like("b@x.com"));
        assert_eq!(rec.like_count(), 2);

        assert!(!rec.toggle_like("b@x.com"));
        assert_eq!(rec.like_count(), 1);
        assert!(!rec.is_liked_by("b@x.com"));
    }

    #[test]
    fn toggle_never_duplicates_an_email() {
        // A stale server copy may already contain duplicates; toggling off
        // removes them all, and toggling on from clean adds one.
        let mut rec = rec_with_likes(&["a@x.com", "a@x.com"]);
        rec.toggle_like("a@x.com");
        assert_eq!(rec.like_count(), 0);
        rec.toggle_like("a@x.com");
        assert_eq!(rec.likes, vec!["a@x.com".to_string()]);
    }

    #[test]
    fn draft_requires_title_product_and_reason() {
        let draft = RecommendationDraft {
            title: "Try this".into(),
            product_name: String::new(),
            product_image: String::new(),
            reason: "Locally made".into(),
            has_image_file: false,
        };
        assert_eq!(draft.validate(), vec!["Product name is required."]);
    }
}
