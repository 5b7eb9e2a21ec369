use axum::{routing::get, Router};

use crate::{controllers::search_controller::SearchController, AppState};

pub struct SearchRoutes;

impl SearchRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/spotify/genres", get(SearchController::genres))
            .route("/spotify/{query}", get(SearchController::search_catalog))
            .route(
                "/spotify/{kind}/{id}",
                get(SearchController::show_catalog_element),
            )
            .route("/{query}", get(SearchController::search))
    }
}
