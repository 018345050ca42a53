use std::sync::Arc;

use matchday::api::router::create_router;
use matchday::config::AppConfig;
use matchday::store::{MemoryStore, PgStore, Store};
use matchday::{db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_json);

    let addr = format!("{}:{}", config.host, config.port);

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let pool = db::init_pool(url, config.db_max_connections).await?;
            tracing::info!("Database connected, migrations applied");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data will not persist)");
            Arc::new(MemoryStore::new())
        }
    };

    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set, admin routes are unauthenticated");
    }

    let metrics_handle = matchday::metrics::init_metrics();

    let state = AppState {
        store,
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
