use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use crate::{auth::token_service::AuthConfig, Error, Result};

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_CATALOG_API_URL: &str = "https://api.spotify.com/v1";

pub fn get_env(name: &'static str) -> Result<String> {
    env::var(name).map_err(|_| Error::ConfigMissingEnv(name))
}

pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parses `name` when it is set; an unparsable value is a config error, not a silent default.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::ConfigWrongFormat(name)),
        Err(_) => Ok(None),
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub behavior: BehaviorConfig,
    pub upload_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = get_env_or("BIND_HOST", "0.0.0.0");
        let port: u16 = get_env_parse("PORT")?.unwrap_or(8080);
        let bind_addr = format!("{host}:{port}")
            .parse()
            .map_err(|_| Error::ConfigWrongFormat("BIND_HOST"))?;

        Ok(Self {
            db: DbConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
            behavior: BehaviorConfig::from_env()?,
            upload_dir: PathBuf::from(get_env_or("UPLOAD_DIR", "uploads")),
            bind_addr,
        })
    }
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<(String, String)>,
}

impl DbConfig {
    pub fn from_env() -> Result<Self> {
        let credentials = match (env::var("DB_USER"), env::var("DB_PASSWORD")) {
            (Ok(user), Ok(password)) => Some((user, password)),
            _ => None,
        };

        Ok(Self {
            url: get_env("DB_URL")?,
            namespace: get_env("DB_NS")?,
            database: get_env("DB_NAME")?,
            credentials,
        })
    }
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: get_env("CLIENT_ID")?,
            client_secret: get_env("CLIENT_SECRET")?,
            token_url: get_env_or("URL_SPOTIFY_TOKEN", DEFAULT_TOKEN_URL),
            api_url: get_env_or("SPOTIFY_API_URL", DEFAULT_CATALOG_API_URL),
        })
    }
}

/// Switches for the two behaviours that differ between the favourite-genre and
/// playlist-tag paths, and between catalog and local search paging.
#[derive(Clone, Debug)]
pub struct BehaviorConfig {
    pub lowercase_favorite_genres: bool,
    pub local_search_row_cap: Option<u64>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            lowercase_favorite_genres: true,
            local_search_row_cap: None,
        }
    }
}

impl BehaviorConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            lowercase_favorite_genres: get_env_parse("LOWERCASE_FAVORITE_GENRES")?
                .unwrap_or(defaults.lowercase_favorite_genres),
            local_search_row_cap: get_env_parse("LOCAL_SEARCH_ROW_CAP")?,
        })
    }

    /// Normalizes a favourite genre before it is stored. Playlist tags never go through here.
    pub fn favorite_genre(&self, genre: String) -> String {
        if self.lowercase_favorite_genres {
            genre.to_lowercase()
        } else {
            genre
        }
    }
}
