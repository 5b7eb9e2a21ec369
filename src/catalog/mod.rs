use async_trait::async_trait;
use serde_json::Value;

use crate::{Error, Result};

pub mod gateway;
pub mod genres;

pub use gateway::SpotifyGateway;
pub use genres::GENRES;

/// Element kinds the external catalog can look up by id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum CatalogType {
    Album,
    Artist,
    Audiobook,
    Episode,
    Playlist,
    Show,
    Track,
}

impl CatalogType {
    pub fn parse(kind: &str) -> Result<Self> {
        kind.parse().map_err(|_| Error::InvalidCatalogType {
            kind: kind.to_string(),
        })
    }

    /// Path segment of the element endpoint (`tracks`, `artists`...).
    pub fn collection(&self) -> String {
        format!("{}s", self.as_ref())
    }
}

#[async_trait]
pub trait Catalog: Send + Sync {
    /// Upstream search body, passed through unchanged.
    async fn search(
        &self,
        query: &str,
        types: &[CatalogType],
        limit: u64,
        offset: u64,
    ) -> Result<Value>;

    async fn fetch_element(&self, id: &str, kind: CatalogType) -> Result<Value>;

    /// Existence probe. Any upstream failure reads as "does not exist".
    async fn validate_id(&self, id: &str, kind: CatalogType) -> bool;

    async fn get_element(&self, id: &str, kind: &str) -> Result<Value> {
        let kind = CatalogType::parse(kind)?;
        self.fetch_element(id, kind).await
    }

    fn genres(&self) -> &'static [&'static str] {
        GENRES
    }
}
