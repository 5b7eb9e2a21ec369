use axum::{extract::State, Json};

use crate::{
    auth::models::{LoginPayload, TokenResponse},
    helpers::extractors::Payload,
    services::auth_service::AuthService,
    AppState, Result,
};

pub async fn login_handler(
    State(state): State<AppState>,
    Payload(payload): Payload<LoginPayload>,
) -> Result<Json<TokenResponse>> {
    let response = AuthService::login_user(
        &state.db,
        &state.auth_config,
        &payload.username,
        &payload.password,
    )
    .await?;

    Ok(Json(response))
}
