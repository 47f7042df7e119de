//! Personalized ranking over the catalog's discovery feed.
//!
//! The ranking blends two signals: a per-genre affinity table derived from
//! the user's own ratings, and the candidate's public rating. Candidates the
//! user already tracks in any list are never recommended again.

use crate::error::CoreError;
use media_track_config::RecommendOptions;
use media_track_models::{genre_id, translate_genre, MediaItem, MediaKind, SeenEntry, UserData};
use media_track_services::{Catalog, DiscoverQuery};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Per-genre affinity scores in the target kind's genre vocabulary.
///
/// A seen entry rated 7 or higher contributes `rating - 6` points to each of
/// its genres. Entries rated below 7 contribute nothing, so a thin or
/// lukewarm history yields an empty table and ranking falls back to public
/// rating alone.
#[derive(Debug, Default)]
pub struct AffinityTable {
    scores: HashMap<String, f32>,
}

impl AffinityTable {
    pub fn build(seen: &[SeenEntry], target: MediaKind) -> Self {
        let mut scores: HashMap<String, f32> = HashMap::new();
        for entry in seen {
            if entry.rating < 7 {
                continue;
            }
            let weight = f32::from(entry.rating - 6);
            for genre in &entry.item.genres {
                // Genres with no counterpart in the target vocabulary are
                // dropped rather than carried over verbatim.
                if let Some(label) = translate_genre(genre, entry.item.kind, target) {
                    *scores.entry(label.to_string()).or_insert(0.0) += weight;
                }
            }
        }
        Self { scores }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn genre_score(&self, label: &str) -> f32 {
        self.scores.get(label).copied().unwrap_or(0.0)
    }

    /// Affinity across the item's genres plus a quality blend of a quarter
    /// of the item's public rating.
    pub fn score(&self, item: &MediaItem) -> f32 {
        let affinity: f32 = item
            .genres
            .iter()
            .map(|genre| self.genre_score(genre))
            .sum();
        affinity + item.rating / 4.0
    }
}

/// What to recommend and how to narrow the candidate feed.
#[derive(Debug, Clone, Default)]
pub struct RecommendRequest {
    pub kind: MediaKind,
    /// Explicit genre labels. When set these take precedence over the
    /// user's stored favorite genres.
    pub genres: Vec<String>,
    pub year_from: Option<u32>,
    pub year_to: Option<u32>,
    /// Overrides the configured result count when set.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ScoredItem {
    pub item: MediaItem,
    pub score: f32,
}

/// Resolve effective genre labels to ids in the request kind's vocabulary.
///
/// Stored preferences may use the other kind's labels (e.g. film genres
/// while browsing series), so unresolvable labels get one translation
/// attempt before being dropped.
fn resolve_genre_ids(labels: &[String], kind: MediaKind) -> Vec<u64> {
    let other = match kind {
        MediaKind::Film => MediaKind::Series,
        MediaKind::Series => MediaKind::Film,
    };
    labels
        .iter()
        .filter_map(|label| {
            genre_id(kind, label).or_else(|| {
                translate_genre(label, other, kind).and_then(|l| genre_id(kind, l))
            })
        })
        .collect()
}

/// Produce a ranked list of untracked candidates for the user.
///
/// Pages are fetched until the candidate pool reaches `pool_target`, the
/// feed runs out, or `page_limit` pages have been consumed. A fetch failure
/// after the first page ranks whatever was gathered so far.
pub async fn recommend(
    catalog: &dyn Catalog,
    data: &UserData,
    request: &RecommendRequest,
    options: &RecommendOptions,
) -> Result<Vec<ScoredItem>, CoreError> {
    let affinity = AffinityTable::build(&data.seen_list, request.kind);
    if affinity.is_empty() {
        debug!("no qualifying rated entries, ranking by public rating only");
    }

    let effective_genres: &[String] = if !request.genres.is_empty() {
        &request.genres
    } else {
        &data.preferences.genres
    };
    let genre_ids = resolve_genre_ids(effective_genres, request.kind);

    let tracked = data.tracked_ids();
    let min_rating = data.preferences.min_rating;

    let mut pool: Vec<MediaItem> = Vec::new();
    let mut pooled_ids: HashSet<u64> = HashSet::new();
    let mut page = 1;
    loop {
        let query = DiscoverQuery {
            genre_ids: genre_ids.clone(),
            year_from: request.year_from,
            year_to: request.year_to,
            cast_id: None,
            page,
        };
        let fetched = match catalog.discover(request.kind, &query).await {
            Ok(fetched) => fetched,
            Err(err) if page == 1 => return Err(err.into()),
            Err(err) => {
                warn!(page, error = %err, "candidate page fetch failed, ranking partial pool");
                break;
            }
        };
        let has_more = fetched.has_more();
        for item in fetched.items {
            if !pooled_ids.insert(item.id) {
                continue;
            }
            if tracked.contains(&item.id) {
                continue;
            }
            if item.rating < min_rating {
                continue;
            }
            pool.push(item);
        }
        if pool.len() >= options.pool_target || !has_more || page >= options.page_limit {
            break;
        }
        page += 1;
    }

    let mut ranked: Vec<ScoredItem> = pool
        .into_iter()
        .map(|item| {
            let score = affinity.score(&item);
            ScoredItem { item, score }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(request.limit.unwrap_or(options.result_count));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{film, series, MockCatalog};
    use media_track_models::UserPreferences;

    fn seen(item: MediaItem, rating: u8) -> SeenEntry {
        SeenEntry { item, rating }
    }

    fn data_with_seen(entries: Vec<SeenEntry>) -> UserData {
        UserData {
            seen_list: entries,
            ..UserData::default()
        }
    }

    fn request(kind: MediaKind) -> RecommendRequest {
        RecommendRequest {
            kind,
            ..RecommendRequest::default()
        }
    }

    fn options() -> RecommendOptions {
        RecommendOptions::default()
    }

    #[test]
    fn test_affinity_contribution_per_rating() {
        let table = AffinityTable::build(
            &[
                seen(film(1, "A", 8.0, &["Drama"]), 10),
                seen(film(2, "B", 8.0, &["Drama", "Comedy"]), 7),
                seen(film(3, "C", 8.0, &["Horror"]), 6),
            ],
            MediaKind::Film,
        );
        assert_eq!(table.genre_score("Drama"), 5.0);
        assert_eq!(table.genre_score("Comedy"), 1.0);
        assert_eq!(table.genre_score("Horror"), 0.0);
    }

    #[test]
    fn test_affinity_translates_across_kinds() {
        let table = AffinityTable::build(
            &[seen(film(1, "A", 8.0, &["Action", "Horror"]), 10)],
            MediaKind::Series,
        );
        assert_eq!(table.genre_score("Action & Adventure"), 4.0);
        // Horror has no series counterpart and is dropped.
        assert!(table.genre_score("Horror") == 0.0);
        assert!(!table.is_empty());
    }

    #[tokio::test]
    async fn test_personal_affinity_outranks_public_rating() {
        let data = data_with_seen(vec![seen(film(1, "Item A", 8.0, &["Drama"]), 9)]);
        let catalog = MockCatalog {
            discover_pages: vec![vec![
                film(10, "Item B", 7.0, &["Drama"]),
                film(11, "Item C", 8.0, &["Comedy"]),
            ]],
            ..MockCatalog::default()
        };

        let ranked = recommend(&catalog, &data, &request(MediaKind::Film), &options())
            .await
            .unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item.title, "Item B");
        assert!((ranked[0].score - 4.75).abs() < f32::EPSILON);
        assert_eq!(ranked[1].item.title, "Item C");
        assert!((ranked[1].score - 2.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_empty_history_ranks_by_public_rating() {
        let data = UserData::default();
        let catalog = MockCatalog {
            discover_pages: vec![vec![
                film(10, "Lower", 7.1, &["Drama"]),
                film(11, "Higher", 8.9, &["Comedy"]),
            ]],
            ..MockCatalog::default()
        };

        let ranked = recommend(&catalog, &data, &request(MediaKind::Film), &options())
            .await
            .unwrap();

        assert_eq!(ranked[0].item.title, "Higher");
        assert_eq!(ranked[1].item.title, "Lower");
    }

    #[tokio::test]
    async fn test_tracked_and_low_rated_candidates_excluded() {
        let mut data = data_with_seen(vec![seen(film(1, "Seen", 8.0, &["Drama"]), 8)]);
        data.watchlist.push(film(2, "Listed", 8.0, &["Drama"]));
        data.hidden.push(film(3, "Hidden", 8.0, &["Drama"]));

        let catalog = MockCatalog {
            discover_pages: vec![vec![
                film(1, "Seen", 8.0, &["Drama"]),
                film(2, "Listed", 8.0, &["Drama"]),
                film(3, "Hidden", 8.0, &["Drama"]),
                film(4, "Too Low", 6.9, &["Drama"]),
                film(5, "Fresh", 7.5, &["Drama"]),
            ]],
            ..MockCatalog::default()
        };

        let ranked = recommend(&catalog, &data, &request(MediaKind::Film), &options())
            .await
            .unwrap();

        let ids: Vec<u64> = ranked.iter().map(|s| s.item.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[tokio::test]
    async fn test_duplicates_across_pages_kept_once() {
        let catalog = MockCatalog {
            discover_pages: vec![
                vec![film(1, "One", 8.0, &[]), film(2, "Two", 8.0, &[])],
                vec![film(2, "Two", 8.0, &[]), film(3, "Three", 8.0, &[])],
            ],
            ..MockCatalog::default()
        };
        let data = UserData {
            preferences: UserPreferences {
                min_rating: 0.0,
                ..UserPreferences::default()
            },
            ..UserData::default()
        };

        let ranked = recommend(&catalog, &data, &request(MediaKind::Film), &options())
            .await
            .unwrap();

        assert_eq!(ranked.len(), 3);
    }

    #[tokio::test]
    async fn test_page_safety_limit() {
        let pages: Vec<Vec<MediaItem>> = (0..20)
            .map(|p| vec![film(p + 100, "Filler", 9.0, &[])])
            .collect();
        let catalog = MockCatalog {
            discover_pages: pages,
            ..MockCatalog::default()
        };
        let opts = RecommendOptions {
            page_limit: 3,
            pool_target: 1000,
            ..RecommendOptions::default()
        };

        recommend(&catalog, &UserData::default(), &request(MediaKind::Film), &opts)
            .await
            .unwrap();

        assert_eq!(catalog.discover_calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_pool_target_stops_fetching() {
        let pages: Vec<Vec<MediaItem>> = (0..10u64)
            .map(|p| {
                (0..5u64)
                    .map(|i| film(p * 5 + i + 100, "Filler", 9.0, &[]))
                    .collect()
            })
            .collect();
        let catalog = MockCatalog {
            discover_pages: pages,
            ..MockCatalog::default()
        };
        let opts = RecommendOptions {
            pool_target: 8,
            ..RecommendOptions::default()
        };

        recommend(&catalog, &UserData::default(), &request(MediaKind::Film), &opts)
            .await
            .unwrap();

        assert_eq!(catalog.discover_calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_explicit_genres_override_preferences() {
        let data = UserData {
            preferences: UserPreferences {
                genres: vec!["Comedy".to_string()],
                ..UserPreferences::default()
            },
            ..UserData::default()
        };
        let catalog = MockCatalog::default();
        let req = RecommendRequest {
            kind: MediaKind::Film,
            genres: vec!["Drama".to_string()],
            ..RecommendRequest::default()
        };

        recommend(&catalog, &data, &req, &options()).await.unwrap();

        let calls = catalog.discover_calls.lock().unwrap();
        assert_eq!(calls[0].genre_ids, vec![18]);
    }

    #[tokio::test]
    async fn test_preference_genres_translated_for_series() {
        let data = UserData {
            preferences: UserPreferences {
                genres: vec!["Science Fiction".to_string()],
                ..UserPreferences::default()
            },
            ..UserData::default()
        };
        let catalog = MockCatalog::default();

        recommend(&catalog, &data, &request(MediaKind::Series), &options())
            .await
            .unwrap();

        let calls = catalog.discover_calls.lock().unwrap();
        // Film label remapped to the Sci-Fi & Fantasy series genre.
        assert_eq!(calls[0].genre_ids, vec![10765]);
    }

    #[tokio::test]
    async fn test_later_page_failure_ranks_partial_pool() {
        let catalog = MockCatalog {
            discover_pages: vec![
                vec![series(1, "Kept", 8.0, &[])],
                vec![series(2, "Lost", 8.0, &[])],
            ],
            fail_discover_from_page: Some(2),
            ..MockCatalog::default()
        };
        let opts = RecommendOptions {
            pool_target: 10,
            ..RecommendOptions::default()
        };

        let ranked = recommend(
            &catalog,
            &UserData::default(),
            &request(MediaKind::Series),
            &opts,
        )
        .await
        .unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.id, 1);
    }

    #[tokio::test]
    async fn test_first_page_failure_is_an_error() {
        let catalog = MockCatalog {
            fail_discover_from_page: Some(1),
            ..MockCatalog::default()
        };

        let result = recommend(
            &catalog,
            &UserData::default(),
            &request(MediaKind::Film),
            &options(),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_result_count_truncation() {
        let items: Vec<MediaItem> = (0..30).map(|i| film(i + 1, "Filler", 8.0, &[])).collect();
        let catalog = MockCatalog {
            discover_pages: vec![items],
            ..MockCatalog::default()
        };
        let opts = RecommendOptions {
            result_count: 5,
            ..RecommendOptions::default()
        };

        let ranked = recommend(
            &catalog,
            &UserData::default(),
            &request(MediaKind::Film),
            &opts,
        )
        .await
        .unwrap();
        assert_eq!(ranked.len(), 5);

        let req = RecommendRequest {
            kind: MediaKind::Film,
            limit: Some(2),
            ..RecommendRequest::default()
        };
        let ranked = recommend(&catalog, &UserData::default(), &req, &opts)
            .await
            .unwrap();
        assert_eq!(ranked.len(), 2);
    }
}
