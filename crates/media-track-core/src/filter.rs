//! In-memory narrowing of list views and search results.

use media_track_models::{MediaItem, SeenEntry, UserData};

/// Case-insensitive title/genre narrowing for the personal list views.
/// Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub title: Option<String>,
    pub genre: Option<String>,
}

impl ListFilter {
    pub fn matches(&self, item: &MediaItem) -> bool {
        if let Some(title) = &self.title {
            if !item.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            if !item
                .genres
                .iter()
                .any(|g| g.eq_ignore_ascii_case(genre))
            {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, items: &'a [MediaItem]) -> Vec<&'a MediaItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    pub fn apply_seen<'a>(&self, entries: &'a [SeenEntry]) -> Vec<&'a SeenEntry> {
        entries
            .iter()
            .filter(|entry| self.matches(&entry.item))
            .collect()
    }
}

/// Drop items the user already tracks in any list. Search and browse views
/// only show what the user can still act on.
pub fn filter_untracked(items: Vec<MediaItem>, data: &UserData) -> Vec<MediaItem> {
    let tracked = data.tracked_ids();
    items
        .into_iter()
        .filter(|item| !tracked.contains(&item.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::film;

    #[test]
    fn test_title_filter_is_substring_case_insensitive() {
        let filter = ListFilter {
            title: Some("god".to_string()),
            ..ListFilter::default()
        };
        assert!(filter.matches(&film(1, "The Godfather", 9.2, &["Crime"])));
        assert!(!filter.matches(&film(2, "Heat", 8.3, &["Crime"])));
    }

    #[test]
    fn test_genre_filter_is_exact_label_case_insensitive() {
        let filter = ListFilter {
            genre: Some("crime".to_string()),
            ..ListFilter::default()
        };
        assert!(filter.matches(&film(1, "Heat", 8.3, &["Crime", "Drama"])));
        assert!(!filter.matches(&film(2, "Up", 8.0, &["Animation"])));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ListFilter::default();
        assert!(filter.matches(&film(1, "Anything", 5.0, &[])));
    }

    #[test]
    fn test_both_fields_must_match() {
        let filter = ListFilter {
            title: Some("heat".to_string()),
            genre: Some("Animation".to_string()),
        };
        assert!(!filter.matches(&film(1, "Heat", 8.3, &["Crime"])));
    }

    #[test]
    fn test_apply_seen_filters_on_inner_item() {
        let entries = vec![
            SeenEntry {
                item: film(1, "Heat", 8.3, &["Crime"]),
                rating: 9,
            },
            SeenEntry {
                item: film(2, "Up", 8.0, &["Animation"]),
                rating: 8,
            },
        ];
        let filter = ListFilter {
            genre: Some("Crime".to_string()),
            ..ListFilter::default()
        };
        let filtered = filter.apply_seen(&entries);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].item.id, 1);
    }

    #[test]
    fn test_filter_untracked_drops_all_tracked_lists() {
        let mut data = UserData::default();
        data.watchlist.push(film(1, "Listed", 8.0, &[]));
        data.seen_list.push(SeenEntry {
            item: film(2, "Seen", 8.0, &[]),
            rating: 8,
        });
        data.hidden.push(film(3, "Hidden", 8.0, &[]));

        let items = vec![
            film(1, "Listed", 8.0, &[]),
            film(2, "Seen", 8.0, &[]),
            film(3, "Hidden", 8.0, &[]),
            film(4, "Fresh", 8.0, &[]),
        ];
        let kept = filter_untracked(items, &data);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 4);
    }
}
