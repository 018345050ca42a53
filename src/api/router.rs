use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_admin;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Player-facing routes; the acting player is always an explicit path parameter
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        // Fixtures
        .route("/api/fixtures", get(handlers::fixtures::list))
        .route("/api/fixtures/:id", get(handlers::fixtures::detail))
        // Standings
        .route("/api/leaderboard", get(handlers::leaderboard::list))
        // Players
        .route("/api/players", post(handlers::players::register))
        .route(
            "/api/players/:id",
            get(handlers::players::detail).put(handlers::players::update),
        )
        // Predictions
        .route("/api/players/:id/predictions", get(handlers::predictions::history))
        .route(
            "/api/players/:id/predictions/:fixture_id",
            put(handlers::predictions::submit),
        );

    // Administrator routes; require Bearer token when ADMIN_TOKEN is set
    let admin = Router::new()
        .route("/api/admin/players", get(handlers::admin::list_players))
        .route("/api/admin/players/:id/suspension", put(handlers::admin::set_suspension))
        .route("/api/admin/players/:id/admin", put(handlers::admin::set_admin))
        .route("/api/admin/fixtures", post(handlers::admin::create_fixture))
        .route("/api/admin/fixtures/:id", delete(handlers::admin::delete_fixture))
        .route("/api/admin/fixtures/:id/outcome", put(handlers::admin::set_outcome))
        .route("/api/admin/fixtures/:id/scoring", get(handlers::admin::scoring_view))
        .route("/api/admin/fixtures/:id/score", post(handlers::admin::score_fixture))
        .route("/api/admin/scoring/outstanding", post(handlers::admin::score_outstanding))
        .route("/api/admin/submissions", get(handlers::admin::submissions))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
