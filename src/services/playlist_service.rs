use chrono::Utc;
use surrealdb::{
    engine::any::Any,
    sql::{Datetime, Thing},
    Surreal,
};

use crate::{
    auth::ownership::{can_view, ensure_owner},
    helpers::thing_helpers::{create_playlist_thing, new_record_key, record_key, PLAYLIST_TABLE},
    models::playlist::{NewPlaylist, PlaylistRecord},
    services::{
        avatar_service::{AvatarKind, AvatarStore},
        list_service::unique,
    },
    Error, Result,
};

pub const NOT_PUBLIC: &str = "The playlist isn't public";
pub const UPDATE_DENIED: &str = "You do not have permission to update this playlist";
pub const OWNER_ONLY: &str = "Only the owner of the playlist can update it";
pub const DELETE_DENIED: &str = "You do not have permission to delete this playlist";

pub struct PlaylistService;

impl PlaylistService {
    pub async fn find_by_id(db: &Surreal<Any>, playlist_id: &str) -> Result<Option<PlaylistRecord>> {
        let playlist: Option<PlaylistRecord> = db
            .query("SELECT * FROM $playlist")
            .bind(("playlist", create_playlist_thing(playlist_id)))
            .await?
            .take(0)?;

        Ok(playlist)
    }

    pub async fn get_existing(db: &Surreal<Any>, playlist_id: &str) -> Result<PlaylistRecord> {
        Self::find_by_id(db, playlist_id)
            .await?
            .ok_or_else(|| Error::PlaylistNotFound {
                id: playlist_id.to_string(),
            })
    }

    /// Loads the playlist and checks `user_id` may mutate it, denying with `message`.
    pub async fn get_owned(
        db: &Surreal<Any>,
        playlist_id: &str,
        user_id: &str,
        message: &'static str,
    ) -> Result<PlaylistRecord> {
        let playlist = Self::get_existing(db, playlist_id).await?;
        ensure_owner(&playlist, user_id, message)?;
        Ok(playlist)
    }

    /// Public playlists are visible to everyone, private ones only to their owner.
    pub async fn get_visible(
        db: &Surreal<Any>,
        playlist_id: &str,
        viewer_id: &str,
    ) -> Result<PlaylistRecord> {
        let playlist = Self::get_existing(db, playlist_id).await?;

        if !can_view(&playlist, playlist.public, viewer_id) {
            return Err(Error::Forbidden {
                message: NOT_PUBLIC,
            });
        }

        Ok(playlist)
    }

    /// Returns the new playlist id.
    pub async fn create(db: &Surreal<Any>, owner_id: &str, playlist: NewPlaylist) -> Result<String> {
        let key = new_record_key();
        let now: Datetime = Utc::now().into();

        let record = PlaylistRecord {
            id: None,
            title: playlist.title,
            description: playlist.description,
            tags: unique(playlist.tags),
            songs: unique(playlist.songs),
            owner: owner_id.to_string(),
            public: playlist.public,
            created_at: now.clone(),
            updated_at: now,
        };

        let created: Option<PlaylistRecord> = db
            .create((PLAYLIST_TABLE, key.as_str()))
            .content(record)
            .await?;

        let created = created.ok_or_else(|| Error::DbError("Could not create playlist".into()))?;
        tracing::info!(playlist_id = %key, owner = %owner_id, "playlist created");

        Ok(created.key())
    }

    /// Every playlist of `owner_id` when the viewer is the owner, only the public ones otherwise.
    pub async fn list_for_owner(
        db: &Surreal<Any>,
        owner_id: &str,
        viewer_id: &str,
    ) -> Result<Vec<PlaylistRecord>> {
        let playlists: Vec<PlaylistRecord> = db
            .query("SELECT * FROM playlist WHERE owner = $owner ORDER BY created_at ASC")
            .bind(("owner", owner_id.to_string()))
            .await?
            .take(0)?;

        if playlists.is_empty() {
            return Err(Error::NoPlaylistsFound {
                message: "No playlists found for this user",
            });
        }

        if owner_id == viewer_id {
            return Ok(playlists);
        }

        let visible: Vec<PlaylistRecord> = playlists.into_iter().filter(|p| p.public).collect();
        if visible.is_empty() {
            return Err(Error::NoPlaylistsFound {
                message: "No public playlists found for this user",
            });
        }

        Ok(visible)
    }

    /// Sets `public` when given, toggles it otherwise. Returns the new value.
    pub async fn set_visibility(
        db: &Surreal<Any>,
        playlist: &PlaylistRecord,
        public: Option<bool>,
    ) -> Result<bool> {
        let public = public.unwrap_or(!playlist.public);

        db.query("UPDATE $playlist SET public = $public, updated_at = time::now()")
            .bind(("playlist", create_playlist_thing(&playlist.key())))
            .bind(("public", public))
            .await?
            .check()?;

        Ok(public)
    }

    /// Replaces title and description. Tags are replaced only when given.
    pub async fn update_info(
        db: &Surreal<Any>,
        playlist_id: &str,
        title: String,
        description: String,
        tags: Option<Vec<String>>,
    ) -> Result<PlaylistRecord> {
        let sql = if tags.is_some() {
            "UPDATE $playlist SET title = $title, description = $description, tags = $tags, updated_at = time::now() RETURN AFTER"
        } else {
            "UPDATE $playlist SET title = $title, description = $description, updated_at = time::now() RETURN AFTER"
        };

        let updated: Option<PlaylistRecord> = db
            .query(sql)
            .bind(("playlist", create_playlist_thing(playlist_id)))
            .bind(("title", title))
            .bind(("description", description))
            .bind(("tags", tags.map(unique)))
            .await?
            .take(0)?;

        updated.ok_or_else(|| Error::PlaylistNotFound {
            id: playlist_id.to_string(),
        })
    }

    /// Removes the avatar file, then the record.
    pub async fn delete(db: &Surreal<Any>, avatars: &AvatarStore, playlist_id: &str) -> Result<()> {
        avatars.remove(AvatarKind::Playlists, playlist_id).await?;

        db.query("DELETE $playlist")
            .bind(("playlist", create_playlist_thing(playlist_id)))
            .await?
            .check()?;

        tracing::info!(%playlist_id, "playlist deleted");
        Ok(())
    }

    /// Removes every playlist of `owner_id` together with their avatars. Returns the removed ids.
    pub async fn delete_all_for_owner(
        db: &Surreal<Any>,
        avatars: &AvatarStore,
        owner_id: &str,
    ) -> Result<Vec<String>> {
        let ids: Vec<Thing> = db
            .query("SELECT VALUE id FROM playlist WHERE owner = $owner")
            .bind(("owner", owner_id.to_string()))
            .await?
            .take(0)?;

        let ids: Vec<String> = ids.iter().map(record_key).collect();
        for id in &ids {
            avatars.remove(AvatarKind::Playlists, id).await?;
        }

        db.query("DELETE playlist WHERE owner = $owner")
            .bind(("owner", owner_id.to_string()))
            .await?
            .check()?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        helpers::db_helpers::test_db::setup_db, services::user_service::tests::create_test_user,
    };

    fn new_playlist(title: &str, public: bool) -> NewPlaylist {
        NewPlaylist {
            title: title.to_string(),
            description: Some("desc".to_string()),
            tags: vec!["rock".to_string(), "rock".to_string()],
            songs: vec![],
            public,
        }
    }

    #[tokio::test]
    async fn test_private_playlist_visibility() {
        let db = setup_db().await;
        let owner = create_test_user(&db, "owner").await;
        let other = create_test_user(&db, "other").await;

        let key = PlaylistService::create(&db, &owner, new_playlist("Secret", false))
            .await
            .unwrap();

        assert!(PlaylistService::get_visible(&db, &key, &owner).await.is_ok());
        assert!(matches!(
            PlaylistService::get_visible(&db, &key, &other).await,
            Err(Error::Forbidden { message }) if message == NOT_PUBLIC
        ));

        let playlist = PlaylistService::get_existing(&db, &key).await.unwrap();
        assert_eq!(playlist.tags, vec!["rock"]);
        PlaylistService::set_visibility(&db, &playlist, None).await.unwrap();
        assert!(PlaylistService::get_visible(&db, &key, &other).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_owned_denies_other_users() {
        let db = setup_db().await;
        let owner = create_test_user(&db, "owner").await;
        let other = create_test_user(&db, "other").await;
        let key = PlaylistService::create(&db, &owner, new_playlist("Mine", true))
            .await
            .unwrap();

        assert!(PlaylistService::get_owned(&db, &key, &owner, UPDATE_DENIED).await.is_ok());
        assert!(matches!(
            PlaylistService::get_owned(&db, &key, &other, DELETE_DENIED).await,
            Err(Error::Forbidden { message }) if message == DELETE_DENIED
        ));
        assert!(matches!(
            PlaylistService::get_owned(&db, &new_record_key(), &owner, UPDATE_DENIED).await,
            Err(Error::PlaylistNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_info_keeps_tags_when_absent() {
        let db = setup_db().await;
        let owner = create_test_user(&db, "owner").await;
        let key = PlaylistService::create(&db, &owner, new_playlist("Before", true))
            .await
            .unwrap();

        let updated = PlaylistService::update_info(
            &db,
            &key,
            "After".to_string(),
            "New description".to_string(),
            None,
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "After");
        assert_eq!(updated.description.as_deref(), Some("New description"));
        assert_eq!(updated.tags, vec!["rock"]);
    }

    #[tokio::test]
    async fn test_list_for_owner() {
        let db = setup_db().await;
        let owner = create_test_user(&db, "owner").await;
        let other = create_test_user(&db, "other").await;

        assert!(matches!(
            PlaylistService::list_for_owner(&db, &owner, &owner).await,
            Err(Error::NoPlaylistsFound { message }) if message == "No playlists found for this user"
        ));

        PlaylistService::create(&db, &owner, new_playlist("Hidden", false))
            .await
            .unwrap();
        assert_eq!(
            PlaylistService::list_for_owner(&db, &owner, &owner).await.unwrap().len(),
            1
        );
        assert!(matches!(
            PlaylistService::list_for_owner(&db, &owner, &other).await,
            Err(Error::NoPlaylistsFound { message }) if message == "No public playlists found for this user"
        ));
    }
}
