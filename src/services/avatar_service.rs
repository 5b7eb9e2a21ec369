use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

pub const DEFAULT_AVATAR: &str = "0.jpg";
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
const ACCEPTED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];
const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AvatarKind {
    Users,
    Playlists,
}

/// Avatar images on disk, one `<id>.jpg` per user or playlist.
#[derive(Debug, Clone)]
pub struct AvatarStore {
    root: PathBuf,
}

impl AvatarStore {
    /// `upload_dir` is the public uploads root; avatars live under `<upload_dir>/avatars`.
    pub fn new(upload_dir: impl AsRef<Path>) -> Self {
        Self {
            root: upload_dir.as_ref().join("avatars"),
        }
    }

    pub async fn init(&self) -> Result<()> {
        for kind in [AvatarKind::Users, AvatarKind::Playlists] {
            tokio::fs::create_dir_all(self.dir(kind)).await?;
        }
        Ok(())
    }

    pub fn dir(&self, kind: AvatarKind) -> PathBuf {
        self.root.join(kind.as_ref())
    }

    /// File of `id`. Ids that are not a plain file name never map to a path.
    pub fn path(&self, kind: AvatarKind, id: &str) -> Result<PathBuf> {
        if !is_plain_file_name(id) {
            return Err(Error::InvalidInput {
                reason: format!("Invalid avatar id: {id}"),
            });
        }

        Ok(self.dir(kind).join(format!("{id}.jpg")))
    }

    pub async fn save(&self, kind: AvatarKind, id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(kind, id)?;
        tokio::fs::create_dir_all(self.dir(kind)).await?;
        tokio::fs::write(path, bytes).await?;
        tracing::debug!(kind = kind.as_ref(), %id, size = bytes.len(), "avatar saved");
        Ok(())
    }

    /// Missing files are not an error.
    pub async fn remove(&self, kind: AvatarKind, id: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path(kind, id)?).await {
            Ok(()) => {
                tracing::debug!(kind = kind.as_ref(), %id, "avatar removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, kind: AvatarKind, id: &str) -> bool {
        match self.path(kind, id) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Requested file when it exists, the default avatar otherwise. Names that
    /// could escape the avatar directory always resolve to the default.
    pub async fn resolve(&self, kind: AvatarKind, file_name: &str) -> PathBuf {
        let dir = self.dir(kind);
        let default = dir.join(DEFAULT_AVATAR);

        if !is_plain_file_name(file_name) {
            return default;
        }

        let requested = dir.join(file_name);
        match tokio::fs::metadata(&requested).await {
            Ok(meta) if meta.is_file() => requested,
            _ => default,
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Accepts jpeg, png and gif up to [`MAX_AVATAR_BYTES`].
pub fn validate_upload(
    file_name: Option<&str>,
    content_type: Option<&str>,
    size: usize,
) -> Result<()> {
    let type_ok = content_type.is_some_and(|ct| ACCEPTED_CONTENT_TYPES.contains(&ct));
    let extension_ok = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()));

    if !type_ok || !extension_ok {
        return Err(Error::AvatarUploadFailed {
            reason: "Invalid file type. Only JPEG, PNG, and GIF files are allowed.".to_string(),
        });
    }

    if size > MAX_AVATAR_BYTES {
        return Err(Error::AvatarUploadFailed {
            reason: "File too large".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_resolve_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(tmp.path());
        store.init().await.unwrap();

        let default = store.resolve(AvatarKind::Users, "abc.jpg").await;
        assert!(default.ends_with("avatars/users/0.jpg"));

        store.save(AvatarKind::Users, "abc", b"jpeg").await.unwrap();
        assert!(store.exists(AvatarKind::Users, "abc").await);
        assert!(store
            .resolve(AvatarKind::Users, "abc.jpg")
            .await
            .ends_with("avatars/users/abc.jpg"));

        store.remove(AvatarKind::Users, "abc").await.unwrap();
        assert!(!store.exists(AvatarKind::Users, "abc").await);

        // second remove is a no-op
        store.remove(AvatarKind::Users, "abc").await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(tmp.path());
        store.init().await.unwrap();

        let resolved = store.resolve(AvatarKind::Playlists, "../users/x.jpg").await;
        assert!(resolved.ends_with("avatars/playlists/0.jpg"));
    }

    #[tokio::test]
    async fn test_ids_outside_the_avatar_dir_are_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(tmp.path().join("uploads"));
        store.init().await.unwrap();

        for id in ["../../../escaped", "a/b", "..", ""] {
            assert!(matches!(
                store.save(AvatarKind::Playlists, id, b"img").await,
                Err(Error::InvalidInput { .. })
            ));
            assert!(store.remove(AvatarKind::Playlists, id).await.is_err());
            assert!(!store.exists(AvatarKind::Playlists, id).await);
        }
        assert!(!tmp.path().join("escaped.jpg").exists());
    }

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload(Some("me.PNG"), Some("image/png"), 1024).is_ok());
        assert!(validate_upload(Some("me.txt"), Some("text/plain"), 10).is_err());
        assert!(validate_upload(Some("me.jpg"), None, 10).is_err());
        assert!(matches!(
            validate_upload(Some("me.gif"), Some("image/gif"), MAX_AVATAR_BYTES + 1),
            Err(Error::AvatarUploadFailed { .. })
        ));
    }
}
