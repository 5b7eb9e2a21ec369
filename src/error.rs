use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub type Result<T> = core::result::Result<T, Error>;

const INTERNAL_MESSAGE: &str = "It's not you, it's us";

#[derive(Clone, Debug, strum_macros::AsRefStr)]
pub enum Error {
    // -- Config errors.
    ConfigMissingEnv(&'static str),
    ConfigWrongFormat(&'static str),

    // -- Auth errors.
    AuthFailNoToken,
    AuthFailTokenExpired,
    AuthFailTokenInvalid,
    AuthFailSubjectMalformed { sub: String },
    LoginFailUsername,
    LoginFailPassword,
    TokenCreationError(String),

    // -- Request errors.
    Validation { message: &'static str },
    InvalidInput { reason: String },
    Forbidden { message: &'static str },

    // -- Model errors.
    UserNotFound { id: String },
    UserAlreadyExists,
    PlaylistNotFound { id: String },
    NoPlaylistsFound { message: &'static str },
    NoItemsFound,
    ListMemberPresent { message: &'static str },
    ListMemberMissing { message: &'static str },

    // -- Catalog errors.
    InvalidCatalogType { kind: String },
    CatalogFailure { message: String },

    // -- Upload errors.
    AvatarUploadFailed { reason: String },

    // -- Internal errors.
    DbError(String),
    PasswordHashError(String),
    IoError(String),
}

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, client_error) = self.client_status_and_error();

        match client_error {
            ClientError::INTERNAL_ERROR => tracing::error!("{} - {}", client_error.as_ref(), self),
            _ => tracing::debug!("{} - {}", client_error.as_ref(), self),
        }

        let response_body = serde_json::json!({
            "error": {
                "message": self.client_message(),
            }
        });

        (status_code, Json(response_body)).into_response()
    }
}

impl Error {
    pub fn client_status_and_error(&self) -> (StatusCode, ClientError) {
        match self {
            Self::Validation { .. }
            | Self::InvalidInput { .. }
            | Self::ListMemberPresent { .. }
            | Self::InvalidCatalogType { .. }
            | Self::AvatarUploadFailed { .. } => {
                (StatusCode::BAD_REQUEST, ClientError::VALIDATION_ERROR)
            }

            Self::AuthFailNoToken
            | Self::AuthFailTokenExpired
            | Self::AuthFailTokenInvalid
            | Self::LoginFailUsername
            | Self::LoginFailPassword => (StatusCode::UNAUTHORIZED, ClientError::UNAUTHORIZED),

            Self::Forbidden { .. } => (StatusCode::FORBIDDEN, ClientError::FORBIDDEN),

            Self::UserNotFound { .. }
            | Self::PlaylistNotFound { .. }
            | Self::NoPlaylistsFound { .. }
            | Self::NoItemsFound
            | Self::ListMemberMissing { .. } => (StatusCode::NOT_FOUND, ClientError::NOT_FOUND),

            Self::UserAlreadyExists => (StatusCode::CONFLICT, ClientError::CONFLICT),

            Self::CatalogFailure { .. } => {
                (StatusCode::FAILED_DEPENDENCY, ClientError::DEPENDENCY_FAILURE)
            }

            Self::ConfigMissingEnv(_)
            | Self::ConfigWrongFormat(_)
            | Self::AuthFailSubjectMalformed { .. }
            | Self::TokenCreationError(_)
            | Self::DbError(_)
            | Self::PasswordHashError(_)
            | Self::IoError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::INTERNAL_ERROR,
            ),
        }
    }

    /// Message placed in the `{ error: { message } }` body. Internal faults never leak details.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Forbidden { message }
            | Self::NoPlaylistsFound { message }
            | Self::ListMemberPresent { message }
            | Self::ListMemberMissing { message } => message.to_string(),
            Self::InvalidInput { reason } | Self::AvatarUploadFailed { reason } => reason.clone(),

            Self::AuthFailNoToken => "No Token inserted".to_string(),
            Self::AuthFailTokenExpired => "Token has expired".to_string(),
            Self::AuthFailTokenInvalid => "Invalid Token".to_string(),
            Self::LoginFailUsername => "Invalid Username".to_string(),
            Self::LoginFailPassword => "Invalid Password".to_string(),

            Self::UserNotFound { .. } => "User not found".to_string(),
            Self::PlaylistNotFound { .. } => "Playlist not found".to_string(),
            Self::NoItemsFound => "No items found".to_string(),
            Self::UserAlreadyExists => "Username or email already exists".to_string(),

            Self::InvalidCatalogType { kind } => format!("{kind} is not a valid type"),
            Self::CatalogFailure { message } => {
                format!("Failed dependency: External service failure. {message}")
            }

            Self::ConfigMissingEnv(_)
            | Self::ConfigWrongFormat(_)
            | Self::AuthFailSubjectMalformed { .. }
            | Self::TokenCreationError(_)
            | Self::DbError(_)
            | Self::PasswordHashError(_)
            | Self::IoError(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, strum_macros::AsRefStr)]
#[allow(non_camel_case_types)]
pub enum ClientError {
    VALIDATION_ERROR,
    UNAUTHORIZED,
    FORBIDDEN,
    NOT_FOUND,
    CONFLICT,
    DEPENDENCY_FAILURE,
    INTERNAL_ERROR,
}

impl From<surrealdb::Error> for Error {
    fn from(err: surrealdb::Error) -> Self {
        Error::DbError(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(err: bcrypt::BcryptError) -> Self {
        Error::PasswordHashError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Error::AuthFailTokenExpired,
            _ => Error::AuthFailTokenInvalid,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}
