use std::sync::Arc;

use axum::{
    extract::{Path, State},
    handler::Handler,
    http::HeaderMap,
    middleware::from_fn_with_state,
    response::{IntoResponse, Redirect},
    routing::{delete, post},
    Extension, Router,
};
use db::{
    models::{Followship, Session, User},
    types::DbId,
};

use crate::{errors::AppError, middleware::auth_middleware, routers::back, AppState};

pub async fn http_post_following(
    state: State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let following = User::by_id(&DbId::from(user_id), &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("User didn't exist!")))?;
    let follower = session.user(&state.db_pool).await?;

    if !Followship::create(&follower, &following, &state.db_pool).await? {
        return Err(AppError::AlreadyExists(String::from(
            "You are already following this user!",
        )));
    }

    Ok(Redirect::to(back(&headers)))
}

pub async fn http_delete_following(
    state: State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let follower = session.user(&state.db_pool).await?;

    if !Followship::delete(&follower, &DbId::from(user_id), &state.db_pool).await? {
        return Err(AppError::NotFound(String::from(
            "You haven't followed this user!",
        )));
    }

    Ok(Redirect::to(back(&headers)))
}

pub fn followships(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/following/:user_id",
            post(http_post_following.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/following/:user_id",
            delete(
                http_delete_following.layer(from_fn_with_state(Arc::clone(state), auth_middleware)),
            ),
        )
}
