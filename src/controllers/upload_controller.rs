use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::{
    services::avatar_service::{validate_upload, AvatarKind, MAX_AVATAR_BYTES},
    AppState, Error, Result,
};

/// Request body limit of avatar routes, leaving room for the multipart framing.
pub const AVATAR_BODY_LIMIT: usize = MAX_AVATAR_BYTES + 64 * 1024;

pub struct UploadController;

impl UploadController {
    pub async fn serve_user_avatar(
        State(state): State<AppState>,
        Path(file_name): Path<String>,
        request: Request,
    ) -> Response {
        Self::serve(&state, AvatarKind::Users, &file_name, request).await
    }

    pub async fn serve_playlist_avatar(
        State(state): State<AppState>,
        Path(file_name): Path<String>,
        request: Request,
    ) -> Response {
        Self::serve(&state, AvatarKind::Playlists, &file_name, request).await
    }

    async fn serve(state: &AppState, kind: AvatarKind, file_name: &str, request: Request) -> Response {
        let path = state.avatars.resolve(kind, file_name).await;

        match ServeFile::new(path).oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }
}

/// Reads the `avatar` field of a multipart upload and checks its type and size.
pub async fn read_avatar(mut multipart: Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart.next_field().await.map_err(upload_failure)? {
        if field.name() != Some("avatar") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(upload_failure)?;

        validate_upload(file_name.as_deref(), content_type.as_deref(), bytes.len())?;
        return Ok(bytes.to_vec());
    }

    Err(Error::AvatarUploadFailed {
        reason: "No file uploaded".to_string(),
    })
}

fn upload_failure(err: MultipartError) -> Error {
    let reason = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        "File too large"
    } else {
        "Invalid file upload"
    };

    tracing::debug!("multipart rejected: {}", err.body_text());
    Error::AvatarUploadFailed {
        reason: reason.to_string(),
    }
}
