use axum::{routing::post, Router};

use crate::{controllers::auth_controller::login_handler, AppState};

pub struct AuthRoutes;

impl AuthRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new().route("/login", post(login_handler))
    }
}
