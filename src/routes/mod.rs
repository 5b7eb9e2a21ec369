pub mod auth_routes;
pub mod playlist_routes;
pub mod search_routes;
pub mod upload_routes;
pub mod user_routes;
