use serde::{Deserialize, Serialize};

/// A catalog record snapshot at fetch time. Not owned beyond the current
/// view except where the user pins it to a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    pub id: u64,
    pub title: String,
    /// Public catalog rating on a 0.0-10.0 scale.
    #[serde(default)]
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub overview: String,
    pub kind: MediaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Film,
    Series,
}

impl MediaKind {
    /// Path segment used by the catalog API ("movie" or "tv").
    pub fn api_path(&self) -> &'static str {
        match self {
            MediaKind::Film => "movie",
            MediaKind::Series => "tv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Film => "film",
            MediaKind::Series => "series",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "film" | "movie" => Ok(MediaKind::Film),
            "series" | "tv" | "show" => Ok(MediaKind::Series),
            other => Err(format!("unknown media kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_parse() {
        assert_eq!("movie".parse::<MediaKind>().unwrap(), MediaKind::Film);
        assert_eq!("Series".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert_eq!("tv".parse::<MediaKind>().unwrap(), MediaKind::Series);
        assert!("podcast".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_media_item_defaults_missing_fields() {
        // Remote payloads may omit optional fields entirely.
        let json = r#"{"id": 42, "title": "Heat", "kind": "film"}"#;
        let item: MediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 42);
        assert_eq!(item.rating, 0.0);
        assert_eq!(item.poster, None);
        assert!(item.genres.is_empty());
        assert_eq!(item.overview, "");
        assert_eq!(item.release_year, None);
    }
}
