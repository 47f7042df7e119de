use crate::error::ServiceError;
use crate::tmdb::wire::{
    ContentRatingsEnvelope, DetailEnvelope, PageEnvelope, PersonPageEnvelope, ProvidersEnvelope,
    ReleaseDatesEnvelope,
};
use crate::traits::{Catalog, DiscoverQuery, Page, Person};
use async_trait::async_trait;
use media_track_models::{MediaItem, MediaKind};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Typed client for the media catalog REST API. Every request carries the
/// static API key and the configured display language as query parameters.
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
    region: String,
    /// Vote-count floor for popular/search listings.
    search_vote_floor: u32,
    /// Looser floor for discovery candidates feeding the recommender.
    discover_vote_floor: u32,
}

/// Cast member attached to an item detail lookup.
#[derive(Debug, Clone)]
pub struct CastCredit {
    pub name: String,
    pub character: Option<String>,
}

/// Item detail with credits, from a single detail request.
#[derive(Debug, Clone)]
pub struct MediaDetail {
    pub item: MediaItem,
    pub cast: Vec<CastCredit>,
}

/// Region-scoped watch-provider availability.
#[derive(Debug, Clone, Default)]
pub struct Availability {
    pub link: Option<String>,
    pub stream: Vec<String>,
    pub rent: Vec<String>,
    pub buy: Vec<String>,
}

impl TmdbClient {
    pub fn new(
        base_url: String,
        api_key: String,
        language: String,
        region: String,
        search_vote_floor: u32,
        discover_vote_floor: u32,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            language,
            region,
            search_vote_floor,
            discover_vote_floor,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut query: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("language", self.language.clone()),
        ];
        query.extend(params.iter().cloned());

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api {
                service: "catalog",
                status,
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    fn to_page(&self, envelope: PageEnvelope, kind: MediaKind, vote_floor: u32) -> Page<MediaItem> {
        let items = envelope
            .results
            .into_iter()
            .filter_map(|entry| entry.into_media_item(kind, vote_floor))
            .collect();
        Page {
            page: envelope.page,
            total_pages: envelope.total_pages,
            items,
        }
    }

    /// Multi-kind search across films and series in one request.
    pub async fn search_multi(&self, query: &str, page: u32) -> Result<Page<MediaItem>, ServiceError> {
        let envelope: PageEnvelope = self
            .get_json(
                "/search/multi",
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await?;
        // fallback kind is irrelevant here, multi records carry their own
        Ok(self.to_page(envelope, MediaKind::Film, self.search_vote_floor))
    }

    /// Item detail with credits appended to the same response.
    pub async fn detail(&self, kind: MediaKind, id: u64) -> Result<MediaDetail, ServiceError> {
        let envelope: DetailEnvelope = self
            .get_json(
                &format!("/{}/{}", kind.api_path(), id),
                &[("append_to_response", "credits".to_string())],
            )
            .await?;

        let title = match kind {
            MediaKind::Film => envelope.title.or(envelope.name),
            MediaKind::Series => envelope.name.or(envelope.title),
        }
        .unwrap_or_default();

        let item = MediaItem {
            id: envelope.id.unwrap_or(id),
            title,
            rating: envelope.vote_average,
            poster: envelope.poster_path,
            genres: envelope.genres.into_iter().map(|g| g.name).collect(),
            overview: envelope.overview,
            kind,
            release_year: super::wire::parse_year(
                envelope
                    .release_date
                    .as_deref()
                    .or(envelope.first_air_date.as_deref()),
            ),
        };

        let cast = envelope
            .credits
            .map(|c| c.cast)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|member| {
                member.name.map(|name| CastCredit {
                    name,
                    character: member.character,
                })
            })
            .collect();

        Ok(MediaDetail { item, cast })
    }

    /// Watch-provider availability for the configured region.
    pub async fn watch_providers(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<Availability, ServiceError> {
        let envelope: ProvidersEnvelope = self
            .get_json(&format!("/{}/{}/watch/providers", kind.api_path(), id), &[])
            .await?;

        let offers = envelope.results.get(&self.region);
        debug!(
            id,
            region = %self.region,
            available = offers.is_some(),
            "Fetched watch providers"
        );
        let offers = match offers {
            Some(offers) => offers,
            None => return Ok(Availability::default()),
        };

        Ok(Availability {
            link: offers.link.clone(),
            stream: offers.flatrate.iter().map(|p| p.provider_name.clone()).collect(),
            rent: offers.rent.iter().map(|p| p.provider_name.clone()).collect(),
            buy: offers.buy.iter().map(|p| p.provider_name.clone()).collect(),
        })
    }

    /// Certification for the configured region, from the release-dates
    /// endpoint for films and the content-ratings endpoint for series.
    pub async fn certification(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<Option<String>, ServiceError> {
        match kind {
            MediaKind::Film => {
                let envelope: ReleaseDatesEnvelope = self
                    .get_json(&format!("/movie/{}/release_dates", id), &[])
                    .await?;
                Ok(envelope
                    .results
                    .into_iter()
                    .find(|r| r.iso_3166_1 == self.region)
                    .and_then(|r| {
                        r.release_dates
                            .into_iter()
                            .map(|d| d.certification)
                            .find(|c| !c.is_empty())
                    }))
            }
            MediaKind::Series => {
                let envelope: ContentRatingsEnvelope = self
                    .get_json(&format!("/tv/{}/content_ratings", id), &[])
                    .await?;
                Ok(envelope
                    .results
                    .into_iter()
                    .find(|r| r.iso_3166_1 == self.region && !r.rating.is_empty())
                    .map(|r| r.rating))
            }
        }
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn popular(&self, kind: MediaKind, page: u32) -> Result<Page<MediaItem>, ServiceError> {
        debug!(kind = %kind, page, "Fetching popular listing");
        let envelope: PageEnvelope = self
            .get_json(
                &format!("/{}/popular", kind.api_path()),
                &[("page", page.to_string())],
            )
            .await?;
        Ok(self.to_page(envelope, kind, self.search_vote_floor))
    }

    async fn search(
        &self,
        kind: MediaKind,
        query: &str,
        page: u32,
    ) -> Result<Page<MediaItem>, ServiceError> {
        debug!(kind = %kind, query, page, "Searching catalog");
        let envelope: PageEnvelope = self
            .get_json(
                &format!("/search/{}", kind.api_path()),
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await?;
        Ok(self.to_page(envelope, kind, self.search_vote_floor))
    }

    async fn search_person(&self, query: &str) -> Result<Option<Person>, ServiceError> {
        let envelope: PersonPageEnvelope = self
            .get_json("/search/person", &[("query", query.to_string())])
            .await?;
        let mut entries = envelope.results;
        entries.sort_by(|a, b| {
            b.popularity
                .partial_cmp(&a.popularity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(entries.into_iter().find_map(|entry| {
            match (entry.id, entry.name) {
                (Some(id), Some(name)) => Some(Person { id, name }),
                _ => None,
            }
        }))
    }

    async fn discover(
        &self,
        kind: MediaKind,
        query: &DiscoverQuery,
    ) -> Result<Page<MediaItem>, ServiceError> {
        let mut params: Vec<(&str, String)> = vec![
            ("sort_by", "popularity.desc".to_string()),
            ("page", query.page.max(1).to_string()),
        ];
        if !query.genre_ids.is_empty() {
            let joined = query
                .genre_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("with_genres", joined));
        }
        // Films and series use different date field names in discovery
        let (from_key, to_key) = match kind {
            MediaKind::Film => ("primary_release_date.gte", "primary_release_date.lte"),
            MediaKind::Series => ("first_air_date.gte", "first_air_date.lte"),
        };
        if let Some(from) = query.year_from {
            params.push((from_key, format!("{}-01-01", from)));
        }
        if let Some(to) = query.year_to {
            params.push((to_key, format!("{}-12-31", to)));
        }
        if let Some(cast) = query.cast_id {
            params.push(("with_cast", cast.to_string()));
        }

        debug!(kind = %kind, page = query.page, "Fetching discovery page");
        let envelope: PageEnvelope = self
            .get_json(&format!("/discover/{}", kind.api_path()), &params)
            .await?;
        Ok(self.to_page(envelope, kind, self.discover_vote_floor))
    }
}
