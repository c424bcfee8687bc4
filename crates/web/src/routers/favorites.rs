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
    models::{Favorite, Restaurant, Session},
    types::DbId,
};

use crate::{errors::AppError, middleware::auth_middleware, routers::back, AppState};

pub async fn http_post_favorite(
    state: State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = Restaurant::by_id(&DbId::from(restaurant_id), &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("Restaurant didn't exist!")))?;
    let user = session.user(&state.db_pool).await?;

    if !Favorite::create(&user, &restaurant, &state.db_pool).await? {
        return Err(AppError::AlreadyExists(String::from(
            "You have favorited this restaurant!",
        )));
    }

    Ok(Redirect::to(back(&headers)))
}

pub async fn http_delete_favorite(
    state: State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = Restaurant::by_id(&DbId::from(restaurant_id), &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("Restaurant didn't exist!")))?;
    let user = session.user(&state.db_pool).await?;

    if !Favorite::delete(&user, &restaurant, &state.db_pool).await? {
        return Err(AppError::NotFound(String::from(
            "You haven't favorited this restaurant",
        )));
    }

    Ok(Redirect::to(back(&headers)))
}

pub fn favorites(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/favorite/:restaurant_id",
            post(http_post_favorite.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/favorite/:restaurant_id",
            delete(
                http_delete_favorite.layer(from_fn_with_state(Arc::clone(state), auth_middleware)),
            ),
        )
}
