use serde::Deserialize;
use surrealdb::{engine::any::Any, Surreal};

use crate::Result;

const SCHEMA: &str = r#"
    DEFINE INDEX IF NOT EXISTS user_email_unique ON TABLE user FIELDS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS user_username_unique ON TABLE user FIELDS username UNIQUE;
    DEFINE INDEX IF NOT EXISTS playlist_owner ON TABLE playlist FIELDS owner;
"#;

/// Applies the indexes the service relies on. Safe to run on every start.
pub async fn define_schema(db: &Surreal<Any>) -> Result<()> {
    db.query(SCHEMA).await?.check()?;
    tracing::debug!("Schema indexes defined");
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CountResult {
    pub total: u64,
}

/// Reads a `SELECT count() AS total ... GROUP ALL` result. No matching rows yields no row at all.
pub fn count_or_zero(count: Option<CountResult>) -> u64 {
    count.map(|c| c.total).unwrap_or(0)
}

/// Unique index violations surface as query errors mentioning the index content.
pub fn is_unique_violation(err: &surrealdb::Error) -> bool {
    err.to_string().contains("already contains")
}
