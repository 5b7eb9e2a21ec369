use std::sync::Arc;

use mixtape_api::{
    app,
    catalog::SpotifyGateway,
    config::AppConfig,
    helpers::db_helpers::define_schema,
    services::avatar_service::AvatarStore,
    AppState, Result,
};
use surrealdb::{engine::any, opt::auth::Root};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    tracing::info!("Starting Mixtape API...");

    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database at: {}", config.db.url);

    let db = any::connect(&config.db.url).await?;
    db.use_ns(&config.db.namespace)
        .use_db(&config.db.database)
        .await?;
    if let Some((username, password)) = &config.db.credentials {
        db.signin(Root { username, password }).await?;
    }
    define_schema(&db).await?;

    tracing::info!("Database connected successfully!");

    let avatars = AvatarStore::new(&config.upload_dir);
    avatars.init().await?;

    let app_state = AppState {
        db,
        catalog: Arc::new(SpotifyGateway::new(config.catalog)),
        avatars,
        auth_config: config.auth,
        behavior: config.behavior,
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app(app_state)).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mixtape_api=debug,tower_http=info,info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}
