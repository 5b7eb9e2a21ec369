pub mod ctx;
pub mod models;
pub mod ownership;
pub mod password_service;
pub mod token_service;
