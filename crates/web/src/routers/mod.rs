mod auth;
mod comments;
mod favorites;
mod followships;
mod likes;
mod restaurants;
mod users;

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    Router,
};

use crate::AppState;

/// Where a successful toggle sends the browser: back to the referring page,
/// or the restaurant listing when there is none.
pub(crate) fn back(headers: &HeaderMap) -> &str {
    headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/restaurants")
}

pub fn routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth::auth())
        .merge(comments::comments(state))
        .merge(favorites::favorites(state))
        .merge(followships::followships(state))
        .merge(likes::likes(state))
        .merge(restaurants::restaurants(state))
        .merge(users::users(state))
}
