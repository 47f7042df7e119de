use serde::{Deserialize, Serialize};

/// Settings edited through the settings view and persisted inside the
/// user document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    /// Minimum acceptable public rating for listings and recommendations.
    #[serde(default = "default_min_rating")]
    pub min_rating: f32,
    /// Favored genre labels, empty means no stored genre preference.
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_text")]
    pub text: String,
}

fn default_min_rating() -> f32 {
    7.0
}

fn default_background() -> String {
    "dark-gray".to_string()
}

fn default_text() -> String {
    "white".to_string()
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            min_rating: default_min_rating(),
            genres: Vec::new(),
            theme: Theme::default(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: default_background(),
            text: default_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.min_rating, 7.0);
        assert!(prefs.genres.is_empty());
        assert_eq!(prefs.theme.background, "dark-gray");
    }

    #[test]
    fn test_preferences_partial_document() {
        // Older documents may only carry some of the fields.
        let json = r#"{"genres": ["Drama"]}"#;
        let prefs: UserPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.min_rating, 7.0);
        assert_eq!(prefs.genres, vec!["Drama"]);
        assert_eq!(prefs.theme.text, "white");
    }
}
