use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::{
    controllers::{playlist_controller::PlaylistController, upload_controller::AVATAR_BODY_LIMIT},
    AppState,
};

pub struct PlaylistRoutes;

impl PlaylistRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/", post(PlaylistController::create_playlist))
            .route(
                "/{playlist_id}",
                get(PlaylistController::get_playlist).delete(PlaylistController::delete_playlist),
            )
            .route(
                "/{playlist_id}/visibility",
                patch(PlaylistController::update_visibility),
            )
            .route("/{playlist_id}/info", patch(PlaylistController::update_info))
            .route(
                "/{playlist_id}/songs/{song_id}",
                post(PlaylistController::add_song).delete(PlaylistController::remove_song),
            )
            .route(
                "/{playlist_id}/tags/{tag}",
                post(PlaylistController::add_tag).delete(PlaylistController::remove_tag),
            )
            .route(
                "/{playlist_id}/avatar",
                post(PlaylistController::add_avatar)
                    .delete(PlaylistController::remove_avatar)
                    .layer(DefaultBodyLimit::max(AVATAR_BODY_LIMIT)),
            )
    }
}
