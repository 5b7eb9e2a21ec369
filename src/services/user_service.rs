use chrono::Utc;
use surrealdb::{engine::any::Any, Surreal};

use crate::{
    auth::password_service,
    helpers::{
        db_helpers::is_unique_violation,
        thing_helpers::{create_user_thing, new_record_key, USER_TABLE},
    },
    models::user::{NewUser, UserRecord, UserRole, UserStatus},
    services::{
        avatar_service::{AvatarKind, AvatarStore},
        list_service::unique,
        playlist_service::PlaylistService,
    },
    Error, Result,
};

pub struct UserService;

impl UserService {
    pub async fn find_by_id(db: &Surreal<Any>, user_id: &str) -> Result<Option<UserRecord>> {
        let user: Option<UserRecord> = db
            .query("SELECT * FROM $user")
            .bind(("user", create_user_thing(user_id)))
            .await?
            .take(0)?;

        Ok(user)
    }

    pub async fn find_by_username(db: &Surreal<Any>, username: &str) -> Result<Option<UserRecord>> {
        let user: Option<UserRecord> = db
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?
            .take(0)?;

        Ok(user)
    }

    pub async fn get_existing(db: &Surreal<Any>, user_id: &str) -> Result<UserRecord> {
        Self::find_by_id(db, user_id)
            .await?
            .ok_or_else(|| Error::UserNotFound {
                id: user_id.to_string(),
            })
    }

    /// Hashes the password and stores the user. Returns the new user id.
    /// Username and email are unique; the pre-check gives the usual answer,
    /// the unique indexes catch the race between two signups.
    pub async fn create(db: &Surreal<Any>, new_user: NewUser) -> Result<String> {
        let taken: Option<surrealdb::sql::Thing> = db
            .query("SELECT VALUE id FROM user WHERE username = $username OR email = $email LIMIT 1")
            .bind(("username", new_user.username.clone()))
            .bind(("email", new_user.email.clone()))
            .await?
            .take(0)?;

        if taken.is_some() {
            return Err(Error::UserAlreadyExists);
        }

        let key = new_record_key();
        let mut preferences = new_user.preferences;
        preferences.artists = unique(preferences.artists);
        preferences.following = unique(preferences.following);
        preferences.genres = unique(preferences.genres);
        preferences.playlists = unique(preferences.playlists);

        let record = UserRecord {
            id: None,
            email: new_user.email,
            username: new_user.username,
            password: password_service::hash_password(&new_user.password)?,
            status: UserStatus::Active,
            role: UserRole::User,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            info: new_user.info,
            created_at: Utc::now().into(),
            preferences,
        };

        let created: Option<UserRecord> = db
            .create((USER_TABLE, key.as_str()))
            .content(record)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::UserAlreadyExists
                } else {
                    e.into()
                }
            })?;

        let created = created.ok_or_else(|| Error::DbError("Could not create user".into()))?;
        tracing::info!(user_id = %key, username = %created.username, "user created");

        Ok(created.key())
    }

    /// Replaces the password after checking the current one.
    pub async fn update_password(
        db: &Surreal<Any>,
        user: &UserRecord,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if !password_service::verify_password(old_password, &user.password)? {
            return Err(Error::Validation {
                message: "Old password is incorrect",
            });
        }

        let hashed = password_service::hash_password(new_password)?;

        db.query("UPDATE $user SET password = $password")
            .bind(("user", create_user_thing(&user.key())))
            .bind(("password", hashed))
            .await?
            .check()?;

        Ok(())
    }

    /// `info` is replaced only when given and non-empty.
    pub async fn update_profile(
        db: &Surreal<Any>,
        user_id: &str,
        first_name: String,
        last_name: String,
        info: Option<String>,
    ) -> Result<()> {
        let info = info.filter(|info| !info.is_empty());
        let sql = if info.is_some() {
            "UPDATE $user SET first_name = $first_name, last_name = $last_name, info = $info"
        } else {
            "UPDATE $user SET first_name = $first_name, last_name = $last_name"
        };

        db.query(sql)
            .bind(("user", create_user_thing(user_id)))
            .bind(("first_name", first_name))
            .bind(("last_name", last_name))
            .bind(("info", info))
            .await?
            .check()?;

        Ok(())
    }

    /// Removes the user avatar, every owned playlist with its avatar, then the user.
    pub async fn delete(db: &Surreal<Any>, avatars: &AvatarStore, user_id: &str) -> Result<()> {
        avatars.remove(AvatarKind::Users, user_id).await?;

        let removed = PlaylistService::delete_all_for_owner(db, avatars, user_id).await?;

        db.query("DELETE $user")
            .bind(("user", create_user_thing(user_id)))
            .await?
            .check()?;

        tracing::info!(%user_id, playlists = removed.len(), "user deleted");
        Ok(())
    }
}
