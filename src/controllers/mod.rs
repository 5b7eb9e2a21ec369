pub mod auth_controller;
pub mod playlist_controller;
pub mod search_controller;
pub mod upload_controller;
pub mod user_controller;
