use serde_json::Value;
use surrealdb::{engine::any::Any, Surreal};

use crate::{
    catalog::{Catalog, CatalogType},
    config::BehaviorConfig,
    error::{Error, Result},
    helpers::db_helpers::{count_or_zero, CountResult},
    models::{
        pagination::{PageRequest, PaginationInfo},
        playlist::{PlaylistRecord, PlaylistView},
        search::{
            SearchKind, SearchPagination, SearchQuery, SearchResponse, UserSummary,
            UserSummaryRow,
        },
    },
    validators::{playlist_validator, split_csv},
};

/// Fixed page size of catalog searches.
pub const CATALOG_PAGE_SIZE: u64 = 10;
/// The catalog refuses offsets past this row.
pub const CATALOG_MAX_ROWS: u64 = 1000;

const USER_FILTER: &str = "string::lowercase(username) CONTAINS $term \
    OR string::lowercase(string::concat(first_name, ' ', last_name)) CONTAINS $term";

/// Parsed aggregated search request.
#[derive(Debug, Clone)]
pub struct LocalSearch {
    pub term: String,
    pub kinds: Vec<SearchKind>,
    pub tags: Vec<String>,
    pub songs: Vec<String>,
    pub page: PageRequest,
}

pub struct SearchService;

impl SearchService {
    /// Validates the raw query string, then runs the aggregated search.
    pub async fn search(
        db: &Surreal<Any>,
        catalog: &dyn Catalog,
        behavior: &BehaviorConfig,
        term: &str,
        query: SearchQuery,
    ) -> Result<SearchResponse> {
        let request = Self::parse_local(catalog, behavior, term, query).await?;
        Self::search_local(db, request).await
    }

    pub async fn parse_local(
        catalog: &dyn Catalog,
        behavior: &BehaviorConfig,
        term: &str,
        query: SearchQuery,
    ) -> Result<LocalSearch> {
        let tags = split_csv(query.tags.as_deref());
        let songs = split_csv(query.song_ids.as_deref());

        playlist_validator::TAGS.check(&tags)?;
        playlist_validator::SONGS.check(catalog, &songs).await?;

        let kinds = parse_kinds(query.types.as_deref())?;
        let page = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref());

        if !page.fits_store() {
            return Err(Error::Validation {
                message: "Invalid page value",
            });
        }
        if let Some(cap) = behavior.local_search_row_cap {
            if page.skip() > cap {
                return Err(Error::Validation {
                    message: "Invalid page value",
                });
            }
        }

        Ok(LocalSearch {
            term: term.to_lowercase(),
            kinds,
            tags,
            songs,
            page,
        })
    }

    /// Users and playlists are paged independently under the same page and limit.
    pub async fn search_local(db: &Surreal<Any>, request: LocalSearch) -> Result<SearchResponse> {
        let (users, total_users) = if request.kinds.contains(&SearchKind::User) {
            Self::search_users(db, &request).await?
        } else {
            (Vec::new(), 0)
        };

        let (playlists, total_playlists) = if request.kinds.contains(&SearchKind::Playlist) {
            Self::search_playlists(db, &request).await?
        } else {
            (Vec::new(), 0)
        };

        if users.is_empty() && playlists.is_empty() {
            return Err(Error::NoItemsFound);
        }

        Ok(SearchResponse {
            users,
            playlists,
            pagination: SearchPagination {
                users: PaginationInfo::new(total_users, request.page),
                playlists: PaginationInfo::new(total_playlists, request.page),
            },
        })
    }

    async fn search_users(
        db: &Surreal<Any>,
        request: &LocalSearch,
    ) -> Result<(Vec<UserSummary>, u64)> {
        let sql = format!(
            "SELECT id, username, first_name, last_name, string::concat(first_name, ' ', last_name) AS full_name \
             FROM user WHERE {USER_FILTER} ORDER BY username ASC LIMIT $limit START $start;
             SELECT count() AS total FROM user WHERE {USER_FILTER} GROUP ALL;"
        );

        let mut res = db
            .query(sql)
            .bind(("term", request.term.clone()))
            .bind(("limit", request.page.limit))
            .bind(("start", request.page.skip()))
            .await?;

        let rows: Vec<UserSummaryRow> = res.take(0)?;
        let total: Option<CountResult> = res.take(1)?;

        Ok((
            rows.into_iter().map(UserSummary::from).collect(),
            count_or_zero(total),
        ))
    }

    async fn search_playlists(
        db: &Surreal<Any>,
        request: &LocalSearch,
    ) -> Result<(Vec<PlaylistView>, u64)> {
        let mut filter =
            String::from("public = true AND string::lowercase(title) CONTAINS $term");
        if !request.tags.is_empty() {
            filter.push_str(" AND tags CONTAINSALL $tags");
        }
        if !request.songs.is_empty() {
            filter.push_str(" AND songs CONTAINSANY $songs");
        }

        let sql = format!(
            "SELECT * FROM playlist WHERE {filter} ORDER BY created_at ASC LIMIT $limit START $start;
             SELECT count() AS total FROM playlist WHERE {filter} GROUP ALL;"
        );

        let mut res = db
            .query(sql)
            .bind(("term", request.term.clone()))
            .bind(("tags", request.tags.clone()))
            .bind(("songs", request.songs.clone()))
            .bind(("limit", request.page.limit))
            .bind(("start", request.page.skip()))
            .await?;

        let rows: Vec<PlaylistRecord> = res.take(0)?;
        let total: Option<CountResult> = res.take(1)?;

        Ok((
            rows.into_iter().map(PlaylistView::from).collect(),
            count_or_zero(total),
        ))
    }

    /// Checks types and page, then proxies the query to the catalog.
    pub async fn search_catalog(
        catalog: &dyn Catalog,
        term: &str,
        types: Option<&str>,
        page: Option<&str>,
    ) -> Result<Value> {
        let (types, page) = parse_catalog_request(types, page)?;
        catalog
            .search(term, &types, page.limit, page.skip())
            .await
    }
}

fn parse_kinds(raw: Option<&str>) -> Result<Vec<SearchKind>> {
    let Some(raw) = raw else {
        return Ok(vec![SearchKind::User, SearchKind::Playlist]);
    };

    let requested = split_csv(Some(raw));
    let invalid: Vec<&str> = requested
        .iter()
        .map(String::as_str)
        .filter(|kind| kind.parse::<SearchKind>().is_err())
        .collect();

    if !invalid.is_empty() {
        return Err(Error::InvalidInput {
            reason: format!("Invalid type(s) in query: {}", invalid.join(", ")),
        });
    }

    Ok(requested
        .iter()
        .filter_map(|kind| kind.parse().ok())
        .collect())
}

/// Types are required and must all be catalog types. The page is taken by
/// absolute value and may not reach past [`CATALOG_MAX_ROWS`].
pub fn parse_catalog_request(
    types: Option<&str>,
    page: Option<&str>,
) -> Result<(Vec<CatalogType>, PageRequest)> {
    let types = split_csv(types);
    if types.is_empty() {
        return Err(Error::Validation {
            message: "Missing types",
        });
    }

    let page = PageRequest::new(
        PageRequest::from_raw(page, None).page,
        CATALOG_PAGE_SIZE,
    );
    if page.skip() > CATALOG_MAX_ROWS {
        return Err(Error::Validation {
            message: "Invalid page value",
        });
    }

    let types = types
        .iter()
        .map(|kind| kind.parse::<CatalogType>())
        .collect::<core::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::Validation {
            message: "Invalid type inserted",
        })?;

    Ok((types, page))
}
