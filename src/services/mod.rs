pub mod auth_service;
pub mod avatar_service;
pub mod list_service;
pub mod playlist_service;
pub mod search_service;
pub mod user_service;
