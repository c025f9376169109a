//! Light/dark display preference, persisted to localStorage and applied as a
//! `data-theme` attribute on the document element.

use leptos::*;

use crate::browser;

const STORAGE_KEY: &str = "prorec.theme";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

fn apply(theme: Theme) {
    let document = gloo_utils::document();
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

/// Loads the saved preference, applies it, and provides the theme signal as
/// context. Call once from the root component.
pub fn init() -> RwSignal<Theme> {
    let saved = browser::storage_get(STORAGE_KEY)
        .map(|v| Theme::from_str(&v))
        .unwrap_or_default();
    apply(saved);

    let theme = create_rw_signal(saved);
    provide_context(theme);
    theme
}

/// Flips the theme, persists it, and re-applies the document attribute.
pub fn toggle(theme: RwSignal<Theme>) {
    let next = theme.get_untracked().toggled();
    theme.set(next);
    browser::storage_set(STORAGE_KEY, next.as_str());
    apply(next);
}

#[cfg(test)]
mod tests {
    use super::Theme;

    #[test]
    fn round_trips_through_storage_strings() {
        assert_eq!(Theme::from_str(Theme::Dark.as_str()), Theme::Dark);
        assert_eq!(Theme::from_str(Theme::Light.as_str()), Theme::Light);
    }

    #[test]
    fn unknown_value_falls_back_to_light() {
        assert_eq!(Theme::from_str("mytheme"), Theme::Light);
    }

    #[test]
    fn toggle_alternates() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
