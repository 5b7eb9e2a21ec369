use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};

use crate::{auth::ownership::Owned, helpers::thing_helpers::record_key};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaylistRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,

    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub songs: Vec<String>,
    pub owner: String,
    pub public: bool,

    // Timestamps
    pub created_at: Datetime,
    pub updated_at: Datetime,
}

impl PlaylistRecord {
    pub fn key(&self) -> String {
        self.id.as_ref().map(record_key).unwrap_or_default()
    }
}

impl Owned for PlaylistRecord {
    fn owner_id(&self) -> &str {
        &self.owner
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub songs: Vec<String>,
    pub owner: String,
    pub public: bool,
    pub created_at: Datetime,
    pub updated_at: Datetime,
}

impl From<PlaylistRecord> for PlaylistView {
    fn from(playlist: PlaylistRecord) -> Self {
        Self {
            id: playlist.key(),
            title: playlist.title,
            description: playlist.description,
            tags: playlist.tags,
            songs: playlist.songs,
            owner: playlist.owner,
            public: playlist.public,
            created_at: playlist.created_at,
            updated_at: playlist.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePlaylistPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub songs: Vec<String>,
    pub public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateVisibilityPayload {
    pub public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateInfoPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPlaylist {
    pub playlist_id: String,
}

#[derive(Debug, Clone)]
pub struct NewPlaylist {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub songs: Vec<String>,
    pub public: bool,
}
