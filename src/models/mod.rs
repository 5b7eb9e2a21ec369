pub mod pagination;
pub mod playlist;
pub mod search;
pub mod user;
