use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::{
    controllers::{upload_controller::AVATAR_BODY_LIMIT, user_controller::UserController},
    AppState,
};

pub struct UserRoutes;

impl UserRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route(
                "/",
                post(UserController::create_user).delete(UserController::delete_user),
            )
            .route("/password", patch(UserController::update_password))
            .route("/profile", patch(UserController::update_profile))
            .route(
                "/avatar",
                post(UserController::add_avatar)
                    .delete(UserController::remove_avatar)
                    .layer(DefaultBodyLimit::max(AVATAR_BODY_LIMIT)),
            )
            .route(
                "/genre/{genre_id}",
                post(UserController::add_genre).delete(UserController::remove_genre),
            )
            .route(
                "/artist/{artist_id}",
                post(UserController::add_artist).delete(UserController::remove_artist),
            )
            .route(
                "/playlist/{playlist_id}",
                post(UserController::add_playlist).delete(UserController::remove_playlist),
            )
            .route(
                "/following/{user_id}",
                post(UserController::follow_user).delete(UserController::unfollow_user),
            )
            .route("/{user_id}", get(UserController::get_user))
            .route("/{user_id}/playlists", get(UserController::get_user_playlists))
    }
}
