use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use surrealdb::{engine::any::Any, Surreal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;
use uuid::Uuid;

use crate::{
    auth::token_service::AuthConfig,
    catalog::Catalog,
    config::BehaviorConfig,
    routes::{
        auth_routes::AuthRoutes, playlist_routes::PlaylistRoutes, search_routes::SearchRoutes,
        upload_routes::UploadRoutes, user_routes::UserRoutes,
    },
    services::avatar_service::AvatarStore,
};

pub use self::error::{Error, Result};

pub mod auth;
pub mod catalog;
pub mod config;
pub mod controllers;
pub mod error;
pub mod helpers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[derive(Clone)]
pub struct AppState {
    pub db: Surreal<Any>,
    pub catalog: Arc<dyn Catalog>,
    pub avatars: AvatarStore,
    pub auth_config: AuthConfig,
    pub behavior: BehaviorConfig,
}

/// Full router: the JSON API under `/api` and the avatar files under `/uploads`.
pub fn app(state: AppState) -> Router {
    let routes_api = Router::new()
        .nest("/auth", AuthRoutes::routes())
        .nest("/users", UserRoutes::routes())
        .nest("/playlists", PlaylistRoutes::routes())
        .nest("/search", SearchRoutes::routes());

    Router::new()
        .nest("/api", routes_api)
        .nest("/uploads", UploadRoutes::routes())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4();
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    tracing::info!("{} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                    let status = response.status();
                    let latency_ms = latency.as_millis();

                    match status.as_u16() {
                        200..=299 => tracing::info!("{} ({}ms)", status, latency_ms),
                        400..=499 => tracing::warn!("{} ({}ms)", status, latency_ms),
                        500..=599 => tracing::error!("{} ({}ms)", status, latency_ms),
                        _ => tracing::info!("{} ({}ms)", status, latency_ms),
                    }
                }),
        )
        .layer(CorsLayer::very_permissive())
}
