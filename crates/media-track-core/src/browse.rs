//! Paginated catalog browsing with a per-context cursor.

use crate::error::CoreError;
use media_track_models::{MediaItem, MediaKind};
use media_track_services::{Catalog, DiscoverQuery, Page, Person};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// What the current result set was fetched from.
#[derive(Debug, Clone)]
pub enum BrowseContext {
    /// The catalog's popular listing for the active kind.
    Popular,
    /// Literal title search.
    Query(String),
    /// Items featuring a recognized person.
    Cast(Person),
}

/// Cursor over one browsing context. Refining the search replaces the
/// cursor and result set; loading more appends the next page.
pub struct Browser {
    catalog: Arc<dyn Catalog>,
    kind: MediaKind,
    context: BrowseContext,
    page: u32,
    total_pages: u32,
    items: Vec<MediaItem>,
    loaded_ids: HashSet<u64>,
}

impl Browser {
    pub fn new(catalog: Arc<dyn Catalog>, kind: MediaKind) -> Self {
        Self {
            catalog,
            kind,
            context: BrowseContext::Popular,
            page: 0,
            total_pages: 0,
            items: Vec::new(),
            loaded_ids: HashSet::new(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn context(&self) -> &BrowseContext {
        &self.context
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Load the popular listing for the active kind.
    pub async fn load_initial(&mut self) -> Result<(), CoreError> {
        self.context = BrowseContext::Popular;
        self.reset_and_fetch().await
    }

    /// Replace the cursor with a new query and fetch its first page.
    ///
    /// A blank query is the popular listing. A query matching a recognized
    /// person entity by full name redirects to that person's credits; the
    /// heuristic is fuzzy on purpose and any person-lookup failure falls
    /// back to literal title search.
    pub async fn refine(&mut self, query: &str) -> Result<(), CoreError> {
        let trimmed = query.trim();
        self.context = if trimmed.is_empty() {
            BrowseContext::Popular
        } else {
            match self.catalog.search_person(trimmed).await {
                Ok(Some(person)) if person.name.eq_ignore_ascii_case(trimmed) => {
                    debug!(person = %person.name, "query redirected to person credits");
                    BrowseContext::Cast(person)
                }
                Ok(_) => BrowseContext::Query(trimmed.to_string()),
                Err(err) => {
                    warn!(error = %err, "person lookup failed, using title search");
                    BrowseContext::Query(trimmed.to_string())
                }
            }
        };
        self.reset_and_fetch().await
    }

    /// Append the next page to the result set. Returns false when the
    /// cursor is already at the end.
    pub async fn load_more(&mut self) -> Result<bool, CoreError> {
        if !self.has_more() {
            return Ok(false);
        }
        let fetched = self.fetch_page(self.page + 1).await?;
        self.page = fetched.page;
        self.total_pages = fetched.total_pages;
        self.append(fetched.items);
        Ok(true)
    }

    async fn reset_and_fetch(&mut self) -> Result<(), CoreError> {
        self.items.clear();
        self.loaded_ids.clear();
        let fetched = self.fetch_page(1).await?;
        self.page = fetched.page;
        self.total_pages = fetched.total_pages;
        self.append(fetched.items);
        Ok(())
    }

    async fn fetch_page(&self, page: u32) -> Result<Page<MediaItem>, CoreError> {
        let fetched = match &self.context {
            BrowseContext::Popular => self.catalog.popular(self.kind, page).await?,
            BrowseContext::Query(query) => self.catalog.search(self.kind, query, page).await?,
            BrowseContext::Cast(person) => {
                let query = DiscoverQuery {
                    cast_id: Some(person.id),
                    page,
                    ..DiscoverQuery::default()
                };
                self.catalog.discover(self.kind, &query).await?
            }
        };
        Ok(fetched)
    }

    fn append(&mut self, fetched: Vec<MediaItem>) {
        for item in fetched {
            if self.loaded_ids.insert(item.id) {
                self.items.push(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{film, MockCatalog};
    use std::collections::HashMap;

    fn browser(catalog: MockCatalog) -> Browser {
        Browser::new(Arc::new(catalog), MediaKind::Film)
    }

    #[tokio::test]
    async fn test_blank_query_equals_popular_listing() {
        let catalog = MockCatalog {
            popular_pages: vec![vec![film(1, "Popular", 8.0, &[])]],
            ..MockCatalog::default()
        };
        let mut browser = browser(catalog);

        browser.refine("   ").await.unwrap();

        assert!(matches!(browser.context(), BrowseContext::Popular));
        assert_eq!(browser.items().len(), 1);
        assert_eq!(browser.items()[0].title, "Popular");
    }

    #[tokio::test]
    async fn test_title_search() {
        let mut search_results = HashMap::new();
        search_results.insert("heat".to_string(), vec![film(1, "Heat", 8.3, &[])]);
        let catalog = MockCatalog {
            search_results,
            ..MockCatalog::default()
        };
        let mut browser = browser(catalog);

        browser.refine("heat").await.unwrap();

        assert!(matches!(browser.context(), BrowseContext::Query(_)));
        assert_eq!(browser.items()[0].title, "Heat");
    }

    #[tokio::test]
    async fn test_full_name_match_redirects_to_person_credits() {
        let catalog = MockCatalog {
            person: Some(Person {
                id: 31,
                name: "Tom Hanks".to_string(),
            }),
            discover_pages: vec![vec![film(1, "Big", 7.3, &[])]],
            ..MockCatalog::default()
        };
        let mut browser = browser(catalog);

        browser.refine("tom hanks").await.unwrap();

        assert!(matches!(browser.context(), BrowseContext::Cast(_)));
        assert_eq!(browser.items()[0].title, "Big");
    }

    #[tokio::test]
    async fn test_partial_person_match_stays_title_search() {
        let mut search_results = HashMap::new();
        search_results.insert("hanks".to_string(), vec![film(1, "Hanks Doc", 7.0, &[])]);
        let catalog = MockCatalog {
            person: Some(Person {
                id: 31,
                name: "Tom Hanks".to_string(),
            }),
            search_results,
            ..MockCatalog::default()
        };
        let mut browser = browser(catalog);

        browser.refine("hanks").await.unwrap();

        assert!(matches!(browser.context(), BrowseContext::Query(_)));
        assert_eq!(browser.items()[0].title, "Hanks Doc");
    }

    #[tokio::test]
    async fn test_person_lookup_failure_falls_back_to_title_search() {
        let mut search_results = HashMap::new();
        search_results.insert("heat".to_string(), vec![film(1, "Heat", 8.3, &[])]);
        let catalog = MockCatalog {
            fail_person_search: true,
            search_results,
            ..MockCatalog::default()
        };
        let mut browser = browser(catalog);

        browser.refine("heat").await.unwrap();

        assert_eq!(browser.items().len(), 1);
    }

    #[tokio::test]
    async fn test_load_more_appends_and_dedupes() {
        let catalog = MockCatalog {
            popular_pages: vec![
                vec![film(1, "One", 8.0, &[]), film(2, "Two", 8.0, &[])],
                vec![film(2, "Two", 8.0, &[]), film(3, "Three", 8.0, &[])],
            ],
            ..MockCatalog::default()
        };
        let mut browser = browser(catalog);

        browser.load_initial().await.unwrap();
        assert!(browser.has_more());

        let advanced = browser.load_more().await.unwrap();
        assert!(advanced);
        let ids: Vec<u64> = browser.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert!(!browser.has_more());
        assert!(!browser.load_more().await.unwrap());
    }

    #[tokio::test]
    async fn test_refine_replaces_result_set() {
        let mut search_results = HashMap::new();
        search_results.insert("alien".to_string(), vec![film(9, "Alien", 8.5, &[])]);
        let catalog = MockCatalog {
            popular_pages: vec![vec![film(1, "Popular", 8.0, &[])]],
            search_results,
            ..MockCatalog::default()
        };
        let mut browser = browser(catalog);

        browser.load_initial().await.unwrap();
        browser.refine("alien").await.unwrap();

        assert_eq!(browser.items().len(), 1);
        assert_eq!(browser.items()[0].id, 9);
    }
}
