use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod localizations;

pub use localizations::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health probe plus the localization
/// CRUD surface, with permissive CORS and request tracing.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new().route("/health", get(health));

    let api = Router::new()
        .route(
            "/api/localizations",
            get(localizations::list).post(localizations::create),
        )
        .route("/api/localizations/bulk-update", post(localizations::bulk_update))
        .route(
            "/api/localizations/:id",
            get(localizations::get_one)
                .put(localizations::update)
                .delete(localizations::delete),
        )
        .with_state(state);

    public.merge(api).layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
