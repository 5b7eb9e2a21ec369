use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::ctx::Ctx,
    controllers::upload_controller::read_avatar,
    helpers::extractors::Payload,
    models::{
        playlist::PlaylistView,
        user::{
            CreateUserPayload, CreatedUser, NewUser, Preferences, UpdatePasswordPayload,
            UpdateProfilePayload, UserProfile,
        },
    },
    services::{
        avatar_service::AvatarKind,
        list_service::{ListService, MemberList},
        playlist_service::PlaylistService,
        user_service::UserService,
    },
    validators::{required, user_validator},
    AppState, Result,
};

pub struct UserController;

impl UserController {
    pub async fn create_user(
        State(state): State<AppState>,
        Payload(payload): Payload<CreateUserPayload>,
    ) -> Result<(StatusCode, Json<CreatedUser>)> {
        let CreateUserPayload {
            email,
            username,
            password,
            first_name,
            last_name,
            info,
            genres,
            artists,
            following,
            playlists,
        } = payload;

        user_validator::PASSWORD.check_opt(password.as_deref())?;
        user_validator::EMAIL.check_opt(email.as_deref())?;
        user_validator::USERNAME.check_opt(username.as_deref())?;
        user_validator::FIRST_NAME.check_opt(first_name.as_deref())?;
        user_validator::LAST_NAME.check_opt(last_name.as_deref())?;
        user_validator::INFO.check_opt(info.as_deref())?;
        user_validator::GENRES.check(&genres)?;
        user_validator::ARTISTS
            .check(state.catalog.as_ref(), &artists)
            .await?;
        user_validator::PLAYLISTS.check(&playlists)?;
        user_validator::FOLLOWING.check(&following)?;

        let new_user = NewUser {
            email: required(email, "Email is required")?,
            username: required(username, "Username is required")?,
            password: required(password, "Password is required")?,
            first_name: required(first_name, "First name is required")?,
            last_name: required(last_name, "Last name is required")?,
            info: info.unwrap_or_default(),
            preferences: Preferences {
                artists,
                following,
                genres: genres
                    .into_iter()
                    .map(|genre| state.behavior.favorite_genre(genre))
                    .collect(),
                playlists,
            },
        };

        let user_id = UserService::create(&state.db, new_user).await?;

        Ok((StatusCode::CREATED, Json(CreatedUser { user_id })))
    }

    pub async fn get_user(
        State(state): State<AppState>,
        _ctx: Ctx,
        Path(user_id): Path<String>,
    ) -> Result<Json<UserProfile>> {
        user_validator::USER_ID.check(&user_id)?;

        let user = UserService::get_existing(&state.db, &user_id).await?;

        Ok(Json(UserProfile::from(user)))
    }

    pub async fn get_user_playlists(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(user_id): Path<String>,
    ) -> Result<Json<Vec<PlaylistView>>> {
        user_validator::USER_ID.check(&user_id)?;

        let owner = UserService::get_existing(&state.db, &user_id).await?;
        let playlists =
            PlaylistService::list_for_owner(&state.db, &owner.key(), &ctx.user_id).await?;

        Ok(Json(playlists.into_iter().map(PlaylistView::from).collect()))
    }

    pub async fn update_password(
        State(state): State<AppState>,
        ctx: Ctx,
        Payload(payload): Payload<UpdatePasswordPayload>,
    ) -> Result<StatusCode> {
        user_validator::PASSWORD.check_opt(payload.old_password.as_deref())?;
        user_validator::PASSWORD.check_opt(payload.new_password.as_deref())?;

        let old_password = required(payload.old_password, "Old password is required")?;
        let new_password = required(payload.new_password, "New password is required")?;

        UserService::update_password(&state.db, &ctx.user, &old_password, &new_password).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn update_profile(
        State(state): State<AppState>,
        ctx: Ctx,
        Payload(payload): Payload<UpdateProfilePayload>,
    ) -> Result<StatusCode> {
        user_validator::FIRST_NAME.check_opt(payload.first_name.as_deref())?;
        user_validator::LAST_NAME.check_opt(payload.last_name.as_deref())?;
        user_validator::INFO.check_opt(payload.info.as_deref())?;

        let first_name = required(payload.first_name, "First name is required")?;
        let last_name = required(payload.last_name, "Last name is required")?;

        UserService::update_profile(&state.db, &ctx.user_id, first_name, last_name, payload.info)
            .await?;

        Ok(StatusCode::NO_CONTENT)
    }

    // -- Favourite genres

    pub async fn add_genre(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(genre_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::GENRE.check(&genre_id)?;

        let genre = state.behavior.favorite_genre(genre_id);
        ListService::add(&state.db, MemberList::FavoriteGenres, &ctx.user_id, genre).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn remove_genre(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(genre_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::GENRE.check(&genre_id)?;

        ListService::remove(&state.db, MemberList::FavoriteGenres, &ctx.user_id, genre_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    // -- Favourite artists

    pub async fn add_artist(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(artist_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::ARTIST
            .check(state.catalog.as_ref(), &artist_id)
            .await?;

        ListService::add(&state.db, MemberList::FavoriteArtists, &ctx.user_id, artist_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn remove_artist(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(artist_id): Path<String>,
    ) -> Result<StatusCode> {
        ListService::remove(&state.db, MemberList::FavoriteArtists, &ctx.user_id, artist_id)
            .await?;

        Ok(StatusCode::NO_CONTENT)
    }

    // -- Favourite playlists

    pub async fn add_playlist(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(playlist_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        let playlist = PlaylistService::get_existing(&state.db, &playlist_id).await?;
        ListService::add(
            &state.db,
            MemberList::FavoritePlaylists,
            &ctx.user_id,
            playlist.key(),
        )
        .await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn remove_playlist(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(playlist_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        ListService::remove(
            &state.db,
            MemberList::FavoritePlaylists,
            &ctx.user_id,
            playlist_id,
        )
        .await?;

        Ok(StatusCode::NO_CONTENT)
    }

    // -- Following

    pub async fn follow_user(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(user_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::USER_ID.check(&user_id)?;

        let followed = UserService::get_existing(&state.db, &user_id).await?;
        ListService::add(&state.db, MemberList::Following, &ctx.user_id, followed.key()).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn unfollow_user(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(user_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::USER_ID.check(&user_id)?;

        ListService::remove(&state.db, MemberList::Following, &ctx.user_id, user_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    // -- Avatar

    pub async fn add_avatar(
        State(state): State<AppState>,
        ctx: Ctx,
        multipart: Multipart,
    ) -> Result<StatusCode> {
        let bytes = read_avatar(multipart).await?;
        state
            .avatars
            .save(AvatarKind::Users, &ctx.user_id, &bytes)
            .await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn remove_avatar(State(state): State<AppState>, ctx: Ctx) -> Result<StatusCode> {
        state.avatars.remove(AvatarKind::Users, &ctx.user_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn delete_user(State(state): State<AppState>, ctx: Ctx) -> Result<StatusCode> {
        UserService::delete(&state.db, &state.avatars, &ctx.user_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }
}
