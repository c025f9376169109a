use serde::{Deserialize, Serialize};

/// The backend's profile record, merged on the profile page with the
/// identity-provider fields. Everything defaults to empty so a partial
/// record from the server still deserializes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub hobbies: String,
}

impl UserProfile {
    /// Fills name and photo from the identity provider when the server
    /// record does not have them. The server record wins otherwise.
    pub fn merge_identity(mut self, display_name: &str, photo_url: &str) -> Self {
        if self.full_name.is_empty() {
            self.full_name = display_name.to_string();
        }
        if self.photo.is_empty() {
            self.photo = photo_url.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_fields_only_fill_gaps() {
        let profile = UserProfile {
            full_name: "Stored Name".into(),
            ..UserProfile::default()
        };
        let merged = profile.merge_identity("Auth Name", "https://p/auth.png");
        assert_eq!(merged.full_name, "Stored Name");
        assert_eq!(merged.photo, "https://p/auth.png");
    }
}
