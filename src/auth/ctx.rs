use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    auth::token_service::TokenService,
    helpers::thing_helpers::is_valid_id,
    models::user::UserRecord,
    services::user_service::UserService,
    AppState, Error, Result,
};

/// Authenticated caller, resolved from the bearer token on every protected handler.
#[derive(Debug, Clone)]
pub struct Ctx {
    pub user_id: String,
    pub exp: usize,
    pub user: UserRecord,
}

impl Ctx {
    pub fn new(user_id: String, exp: usize, user: UserRecord) -> Self {
        Self { user_id, exp, user }
    }

    pub async fn resolve(parts: &Parts, state: &AppState) -> Result<Self> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(Error::AuthFailNoToken)?;

        let claims = TokenService::validate_token(token, &state.auth_config)?;

        if !is_valid_id(&claims.sub) {
            return Err(Error::AuthFailSubjectMalformed { sub: claims.sub });
        }
        let user_id = claims.sub;

        let user = UserService::find_by_id(&state.db, &user_id)
            .await?
            .ok_or_else(|| Error::UserNotFound {
                id: user_id.clone(),
            })?;

        Ok(Self::new(user_id, claims.exp, user))
    }
}

impl FromRequestParts<AppState> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        if let Some(ctx) = parts.extensions.get::<Ctx>() {
            return Ok(ctx.clone());
        }

        let ctx = Self::resolve(parts, state).await?;
        tracing::debug!(user_id = %ctx.user_id, "request authenticated");
        parts.extensions.insert(ctx.clone());

        Ok(ctx)
    }
}
