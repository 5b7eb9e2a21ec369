use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::{
    helpers::thing_helpers::record_key,
    models::{pagination::PaginationInfo, playlist::PlaylistView},
};

/// Local collections reachable through the aggregated search.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumString, strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum SearchKind {
    User,
    Playlist,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub types: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub tags: Option<String>,
    pub song_ids: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogSearchQuery {
    pub types: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserSummaryRow {
    pub id: Thing,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<UserSummaryRow> for UserSummary {
    fn from(row: UserSummaryRow) -> Self {
        Self {
            id: record_key(&row.id),
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            full_name: row.full_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchPagination {
    pub users: PaginationInfo,
    pub playlists: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub users: Vec<UserSummary>,
    pub playlists: Vec<PlaylistView>,
    pub pagination: SearchPagination,
}
