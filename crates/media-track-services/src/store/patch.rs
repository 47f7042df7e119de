use media_track_models::{MediaItem, SeenEntry, UserPreferences};
use serde::Serialize;

/// A partial-merge write against the user document. Only the fields that
/// are set get serialized, so the store touches nothing else.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserDataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchlist: Option<Vec<MediaItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seen_list: Option<Vec<SeenEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<Vec<MediaItem>>,
}

impl UserDataPatch {
    pub fn preferences(prefs: UserPreferences) -> Self {
        Self {
            preferences: Some(prefs),
            ..Self::default()
        }
    }

    pub fn watchlist(list: Vec<MediaItem>) -> Self {
        Self {
            watchlist: Some(list),
            ..Self::default()
        }
    }

    pub fn seen_list(list: Vec<SeenEntry>) -> Self {
        Self {
            seen_list: Some(list),
            ..Self::default()
        }
    }

    pub fn hidden(list: Vec<MediaItem>) -> Self {
        Self {
            hidden: Some(list),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.preferences.is_none()
            && self.watchlist.is_none()
            && self.seen_list.is_none()
            && self.hidden.is_none()
    }
}
