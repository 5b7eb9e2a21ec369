pub mod db_helpers;
pub mod extractors;
pub mod thing_helpers;
