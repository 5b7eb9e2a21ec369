use surrealdb::{engine::any::Any, sql::Thing, Surreal};

use crate::{
    helpers::thing_helpers::{create_playlist_thing, create_user_thing},
    Error, Result,
};

/// List-valued fields that behave as sets: add fails when present, remove fails when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::AsRefStr)]
pub enum MemberList {
    PlaylistSongs,
    PlaylistTags,
    FavoriteGenres,
    FavoriteArtists,
    FavoritePlaylists,
    Following,
}

impl MemberList {
    fn field(&self) -> &'static str {
        match self {
            Self::PlaylistSongs => "songs",
            Self::PlaylistTags => "tags",
            Self::FavoriteGenres => "preferences.genres",
            Self::FavoriteArtists => "preferences.artists",
            Self::FavoritePlaylists => "preferences.playlists",
            Self::Following => "preferences.following",
        }
    }

    fn on_playlist(&self) -> bool {
        matches!(self, Self::PlaylistSongs | Self::PlaylistTags)
    }

    fn record(&self, key: &str) -> Thing {
        if self.on_playlist() {
            create_playlist_thing(key)
        } else {
            create_user_thing(key)
        }
    }

    pub fn present_message(&self) -> &'static str {
        match self {
            Self::PlaylistSongs => "Song is already in this playlist",
            Self::PlaylistTags => "Tag is already in this playlist",
            Self::FavoriteGenres => "Genre already among your favourites",
            Self::FavoriteArtists => "Artist already among your favourites",
            Self::FavoritePlaylists => "Playlist already among your favourites",
            Self::Following => "User already among your following",
        }
    }

    pub fn missing_message(&self) -> &'static str {
        match self {
            Self::PlaylistSongs => "Song not found in this playlist",
            Self::PlaylistTags => "Tag not found in this playlist",
            Self::FavoriteGenres => "Genre not found among your favourites",
            Self::FavoriteArtists => "Artist not found among your favourites",
            Self::FavoritePlaylists => "Playlist not found among your favourites",
            Self::Following => "User not found among your following",
        }
    }
}

pub struct ListService;

impl ListService {
    /// Appends `value` unless already present. The membership check and the
    /// write are one conditional statement, so concurrent adds cannot duplicate.
    pub async fn add(db: &Surreal<Any>, list: MemberList, key: &str, value: String) -> Result<()> {
        let touched = Self::apply(db, list, key, value, "+=", "CONTAINSNOT").await?;

        if touched {
            Ok(())
        } else {
            Err(Error::ListMemberPresent {
                message: list.present_message(),
            })
        }
    }

    pub async fn remove(
        db: &Surreal<Any>,
        list: MemberList,
        key: &str,
        value: String,
    ) -> Result<()> {
        let touched = Self::apply(db, list, key, value, "-=", "CONTAINS").await?;

        if touched {
            Ok(())
        } else {
            Err(Error::ListMemberMissing {
                message: list.missing_message(),
            })
        }
    }

    async fn apply(
        db: &Surreal<Any>,
        list: MemberList,
        key: &str,
        value: String,
        operator: &str,
        condition: &str,
    ) -> Result<bool> {
        let field = list.field();
        let touch = if list.on_playlist() {
            ", updated_at = time::now()"
        } else {
            ""
        };

        let sql = format!(
            "UPDATE $record SET {field} {operator} $value{touch} WHERE {field} {condition} $value RETURN VALUE id"
        );

        let touched: Vec<Thing> = db
            .query(sql)
            .bind(("record", list.record(key)))
            .bind(("value", value))
            .await?
            .take(0)?;

        tracing::debug!(list = list.as_ref(), %key, operator, changed = !touched.is_empty(), "list mutation");

        Ok(!touched.is_empty())
    }
}

/// Drops repeated entries, keeping the first occurrence order.
pub fn unique(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
