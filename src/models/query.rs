use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A "boycott this product" post, as stored by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub product_name: String,
    pub product_brand: String,
    pub product_image: String,
    pub query_title: String,
    pub boycott_reason: String,
    pub user_email: String,
    pub user_name: String,
    #[serde(default)]
    pub user_photo: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub recommendation_count: i64,
}

impl Query {
    /// Case-insensitive product-name substring match, used by the search box
    /// on the all-queries page.
    pub fn matches_product(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.product_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Sorts newest-first; the backend does not guarantee an order.
pub fn sort_newest_first(queries: &mut [Query]) {
    queries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Form state for creating or updating a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDraft {
    pub product_name: String,
    pub product_brand: String,
    pub query_title: String,
    pub boycott_reason: String,
    /// Either a pasted URL or the URL returned by the image host.
    pub product_image: String,
    /// Set when a file is staged for upload instead of a URL.
    pub has_image_file: bool,
}

impl QueryDraft {
    pub fn from_query(query: &Query) -> Self {
        QueryDraft {
            product_name: query.product_name.clone(),
            product_brand: query.product_brand.clone(),
            query_title: query.query_title.clone(),
            boycott_reason: query.boycott_reason.clone(),
            product_image: query.product_image.clone(),
            has_image_file: false,
        }
    }

    /// Returns the messages that block submission. Empty means valid.
    pub fn validate(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if self.product_name.trim().is_empty() {
            problems.push("Product name is required.");
        }
        if self.product_brand.trim().is_empty() {
            problems.push("Product brand is required.");
        }
        if self.query_title.trim().is_empty() {
            problems.push("Query title is required.");
        }
        if self.boycott_reason.trim().is_empty() {
            problems.push("Boycott reason is required.");
        }
        if self.product_image.trim().is_empty() && !self.has_image_file {
            problems.push("Provide an image URL or upload a file.");
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn query(product: &str, ts: i64) -> Query {
        Query {
            product_name: product.to_string(),
            timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
            ..Query::default()
        }
    }

    #[test]
    fn product_search_is_case_insensitive_substring() {
        let q = query("Coca-Cola Zero", 0);
        assert!(q.matches_product("cola"));
        assert!(q.matches_product("ZERO"));
        assert!(q.matches_product(""));
        assert!(!q.matches_product("pepsi"));
    }

    #[test]
    fn sorting_puts_newest_first() {
        let mut list = vec![query("a", 10), query("b", 30), query("c", 20)];
        sort_newest_first(&mut list);
        let names: Vec<_> = list.iter().map(|q| q.product_name.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn empty_required_field_blocks_submission() {
        let mut draft = QueryDraft {
            product_name: "Soap".into(),
            product_brand: "Acme".into(),
            query_title: "Alternative soap?".into(),
            boycott_reason: "Labor practices".into(),
            product_image: "https://img.example/s.png".into(),
            has_image_file: false,
        };
        assert!(draft.validate().is_empty());

        draft.query_title = "   ".into();
        let problems = draft.validate();
        assert_eq!(problems, vec!["Query title is required."]);
    }

    #[test]
    fn staged_file_satisfies_the_image_requirement() {
        let draft = QueryDraft {
            product_name: "Soap".into(),
            product_brand: "Acme".into(),
            query_title: "t".into(),
            boycott_reason: "r".into(),
            product_image: String::new(),
            has_image_file: true,
        };
        assert!(draft.validate().is_empty());
    }
}
