use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::{
    auth::ctx::Ctx,
    models::search::{CatalogSearchQuery, SearchQuery, SearchResponse},
    services::search_service::SearchService,
    AppState, Result,
};

pub struct SearchController;

impl SearchController {
    pub async fn search(
        State(state): State<AppState>,
        _ctx: Ctx,
        Path(term): Path<String>,
        Query(query): Query<SearchQuery>,
    ) -> Result<Json<SearchResponse>> {
        let response = SearchService::search(
            &state.db,
            state.catalog.as_ref(),
            &state.behavior,
            &term,
            query,
        )
        .await?;

        Ok(Json(response))
    }

    pub async fn search_catalog(
        State(state): State<AppState>,
        _ctx: Ctx,
        Path(term): Path<String>,
        Query(query): Query<CatalogSearchQuery>,
    ) -> Result<Json<Value>> {
        let body = SearchService::search_catalog(
            state.catalog.as_ref(),
            &term,
            query.types.as_deref(),
            query.page.as_deref(),
        )
        .await?;

        Ok(Json(body))
    }

    pub async fn show_catalog_element(
        State(state): State<AppState>,
        _ctx: Ctx,
        Path((kind, id)): Path<(String, String)>,
    ) -> Result<Json<Value>> {
        let element = state.catalog.get_element(&id, &kind).await?;

        Ok(Json(element))
    }

    pub async fn genres(State(state): State<AppState>, _ctx: Ctx) -> Json<&'static [&'static str]> {
        Json(state.catalog.genres())
    }
}
