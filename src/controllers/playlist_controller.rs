use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{ctx::Ctx, ownership::ensure_owner},
    controllers::upload_controller::read_avatar,
    helpers::extractors::Payload,
    models::playlist::{
        CreatePlaylistPayload, CreatedPlaylist, NewPlaylist, PlaylistView, UpdateInfoPayload,
        UpdateVisibilityPayload,
    },
    services::{
        avatar_service::AvatarKind,
        list_service::{ListService, MemberList},
        playlist_service::{PlaylistService, DELETE_DENIED, OWNER_ONLY, UPDATE_DENIED},
    },
    validators::{playlist_validator, required, user_validator},
    AppState, Result,
};

pub struct PlaylistController;

impl PlaylistController {
    pub async fn create_playlist(
        State(state): State<AppState>,
        ctx: Ctx,
        Payload(payload): Payload<CreatePlaylistPayload>,
    ) -> Result<(StatusCode, Json<CreatedPlaylist>)> {
        playlist_validator::TITLE.check_opt(payload.title.as_deref())?;
        playlist_validator::DESCRIPTION.check_opt(payload.description.as_deref())?;
        playlist_validator::TAGS.check(&payload.tags)?;
        playlist_validator::SONGS
            .check(state.catalog.as_ref(), &payload.songs)
            .await?;

        let title = required(payload.title, "Title is required")?;
        playlist_validator::OWNER.check(&ctx.user_id)?;

        let playlist = NewPlaylist {
            title,
            description: payload.description,
            tags: payload.tags,
            songs: payload.songs,
            public: payload.public.unwrap_or(true),
        };

        let playlist_id = PlaylistService::create(&state.db, &ctx.user_id, playlist).await?;

        Ok((StatusCode::CREATED, Json(CreatedPlaylist { playlist_id })))
    }

    pub async fn get_playlist(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(playlist_id): Path<String>,
    ) -> Result<Json<PlaylistView>> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        let playlist = PlaylistService::get_visible(&state.db, &playlist_id, &ctx.user_id).await?;

        Ok(Json(PlaylistView::from(playlist)))
    }

    /// Without a body the visibility is toggled.
    pub async fn update_visibility(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(playlist_id): Path<String>,
        payload: Option<Payload<UpdateVisibilityPayload>>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        let playlist =
            PlaylistService::get_owned(&state.db, &playlist_id, &ctx.user_id, UPDATE_DENIED)
                .await?;
        let requested = payload.and_then(|Payload(payload)| payload.public);

        let public = PlaylistService::set_visibility(&state.db, &playlist, requested).await?;
        tracing::debug!(%playlist_id, public, "playlist visibility changed");

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn update_info(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(playlist_id): Path<String>,
        Payload(payload): Payload<UpdateInfoPayload>,
    ) -> Result<Json<PlaylistView>> {
        user_validator::PLAYLIST.check(&playlist_id)?;
        playlist_validator::TITLE.check_opt(payload.title.as_deref())?;
        playlist_validator::DESCRIPTION.check_opt(payload.description.as_deref())?;
        if let Some(tags) = &payload.tags {
            playlist_validator::TAGS.check(tags)?;
        }

        let playlist = PlaylistService::get_existing(&state.db, &playlist_id).await?;

        let message = "Title and description are required";
        let title = required(payload.title, message)?;
        let description = required(payload.description, message)?;

        ensure_owner(&playlist, &ctx.user_id, UPDATE_DENIED)?;

        let updated = PlaylistService::update_info(
            &state.db,
            &playlist.key(),
            title,
            description,
            payload.tags,
        )
        .await?;

        Ok(Json(PlaylistView::from(updated)))
    }

    pub async fn delete_playlist(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(playlist_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        let playlist =
            PlaylistService::get_owned(&state.db, &playlist_id, &ctx.user_id, DELETE_DENIED)
                .await?;
        PlaylistService::delete(&state.db, &state.avatars, &playlist.key()).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    // -- Songs

    pub async fn add_song(
        State(state): State<AppState>,
        ctx: Ctx,
        Path((playlist_id, song_id)): Path<(String, String)>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;
        playlist_validator::SONG
            .check(state.catalog.as_ref(), &song_id)
            .await?;

        let playlist =
            PlaylistService::get_owned(&state.db, &playlist_id, &ctx.user_id, OWNER_ONLY).await?;
        ListService::add(&state.db, MemberList::PlaylistSongs, &playlist.key(), song_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn remove_song(
        State(state): State<AppState>,
        ctx: Ctx,
        Path((playlist_id, song_id)): Path<(String, String)>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        let playlist =
            PlaylistService::get_owned(&state.db, &playlist_id, &ctx.user_id, UPDATE_DENIED).await?;
        ListService::remove(&state.db, MemberList::PlaylistSongs, &playlist.key(), song_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    // -- Tags

    pub async fn add_tag(
        State(state): State<AppState>,
        ctx: Ctx,
        Path((playlist_id, tag)): Path<(String, String)>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;
        playlist_validator::TAG.check(&tag)?;

        let playlist =
            PlaylistService::get_owned(&state.db, &playlist_id, &ctx.user_id, OWNER_ONLY).await?;
        ListService::add(&state.db, MemberList::PlaylistTags, &playlist.key(), tag).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn remove_tag(
        State(state): State<AppState>,
        ctx: Ctx,
        Path((playlist_id, tag)): Path<(String, String)>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        let playlist =
            PlaylistService::get_owned(&state.db, &playlist_id, &ctx.user_id, UPDATE_DENIED).await?;
        ListService::remove(&state.db, MemberList::PlaylistTags, &playlist.key(), tag).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    // -- Avatar

    pub async fn add_avatar(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(playlist_id): Path<String>,
        multipart: Multipart,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        let playlist =
            PlaylistService::get_owned(&state.db, &playlist_id, &ctx.user_id, UPDATE_DENIED)
                .await?;
        let bytes = read_avatar(multipart).await?;
        state
            .avatars
            .save(AvatarKind::Playlists, &playlist.key(), &bytes)
            .await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn remove_avatar(
        State(state): State<AppState>,
        ctx: Ctx,
        Path(playlist_id): Path<String>,
    ) -> Result<StatusCode> {
        user_validator::PLAYLIST.check(&playlist_id)?;

        let playlist =
            PlaylistService::get_owned(&state.db, &playlist_id, &ctx.user_id, UPDATE_DENIED)
                .await?;
        state
            .avatars
            .remove(AvatarKind::Playlists, &playlist.key())
            .await?;

        Ok(StatusCode::NO_CONTENT)
    }
}
