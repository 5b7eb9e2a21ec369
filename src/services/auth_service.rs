use surrealdb::{engine::any::Any, Surreal};

use crate::{
    auth::{
        models::TokenResponse,
        password_service,
        token_service::{AuthConfig, TokenService},
    },
    error::{Error, Result},
    services::user_service::UserService,
};

pub struct AuthService;

impl AuthService {
    pub async fn login_user(
        db: &Surreal<Any>,
        config: &AuthConfig,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse> {
        let user = UserService::find_by_username(db, username)
            .await?
            .ok_or(Error::LoginFailUsername)?;

        if !password_service::verify_password(password, &user.password)? {
            return Err(Error::LoginFailPassword);
        }

        let user_id = user.key();
        let token = TokenService::create_token(user_id.clone(), config)?;
        tracing::info!(%user_id, "user logged in");

        Ok(TokenResponse { token, user_id })
    }
}
