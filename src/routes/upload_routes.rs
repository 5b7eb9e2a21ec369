use axum::{routing::get, Router};

use crate::{controllers::upload_controller::UploadController, AppState};

pub struct UploadRoutes;

impl UploadRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route(
                "/avatars/users/{file_name}",
                get(UploadController::serve_user_avatar),
            )
            .route(
                "/avatars/playlists/{file_name}",
                get(UploadController::serve_playlist_avatar),
            )
    }
}
