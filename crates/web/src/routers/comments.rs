use std::sync::Arc;

use axum::{
    extract::{Path, State},
    handler::Handler,
    http::HeaderMap,
    middleware::from_fn_with_state,
    response::{IntoResponse, Redirect},
    routing::{delete, post},
    Extension, Form, Router,
};
use db::{
    models::{Comment, Restaurant, Session},
    types::DbId,
};
use serde::Deserialize;

use crate::{
    errors::AppError,
    middleware::{admin_middleware, auth_middleware},
    routers::back,
    AppState,
};

#[derive(Deserialize)]
pub struct CommentBody {
    restaurant_id: String,
    text: String,
}

pub async fn http_post_comment(
    state: State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
    Form(body): Form<CommentBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.text.trim().is_empty() {
        return Err(AppError::Validation(String::from("Comment text is required!")));
    }

    let restaurant = Restaurant::by_id(&DbId::from(body.restaurant_id), &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("Restaurant didn't exist!")))?;
    let user = session.user(&state.db_pool).await?;

    Comment::create(body.text, &user, &restaurant, &state.db_pool).await?;

    Ok(Redirect::to(back(&headers)))
}

pub async fn http_delete_comment(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comment = Comment::by_id(&DbId::from(id), &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("Comment didn't exist!")))?;

    comment.delete(&state.db_pool).await?;

    Ok(Redirect::to(&format!(
        "/restaurants/{}",
        comment.restaurant_id
    )))
}

pub fn comments(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/comments",
            post(http_post_comment.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/comments/:id",
            delete(
                http_delete_comment.layer(from_fn_with_state(Arc::clone(state), admin_middleware)),
            ),
        )
}
