#![allow(unused)]

use anyhow::Result;
use serde_json::json;

/// Smoke run against a live server (`cargo run` first).
#[tokio::test]
#[ignore]
async fn quick_dev() -> Result<()> {
    let hc = httpc_test::new_client("http://localhost:8080")?;

    hc.do_post(
        "/api/users",
        json!({
            "email": "demo@example.com",
            "username": "demo",
            "password": "Secret12!",
            "firstName": "Demo",
            "lastName": "User",
        }),
    )
    .await?
    .print()
    .await?;

    let login = hc
        .do_post(
            "/api/auth/login",
            json!({ "username": "demo", "password": "Secret12!" }),
        )
        .await?;
    login.print().await?;

    hc.do_get("/uploads/avatars/users/0.jpg").await?.print().await?;

    Ok(())
}
