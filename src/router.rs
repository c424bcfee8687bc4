use std::sync::Arc;

use axum::{response::Redirect, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};
use web::AppState;

async fn http_get_root() -> Redirect {
    Redirect::to("/restaurants")
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(web::routers::routers(&state))
        .nest_service("/uploads", ServeDir::new(&state.config.uploads.dir))
        .fallback(http_get_root)
        .with_state(state)
        .layer(axum::middleware::from_fn(web::middleware::method_override))
        .layer(axum::middleware::from_fn(web::errors::error_redirect))
        .layer(TraceLayer::new_for_http())
}
