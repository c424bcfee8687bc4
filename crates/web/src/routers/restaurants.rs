use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    handler::Handler,
    middleware::from_fn_with_state,
    response::{Html, IntoResponse},
    routing::get,
    Extension, Router,
};
use axum_extra::extract::cookie::CookieJar;
use db::{
    models::{Favorite, Like, Restaurant, Session},
    pagination::PaginationQuery,
    types::DbId,
};
use tera::Context;

use crate::{
    entities::restaurants::{RestaurantCard, RestaurantPage},
    errors::AppError,
    flash,
    middleware::auth_middleware,
    AppState, TEMPLATES,
};

pub async fn http_get_restaurants(
    state: State<Arc<AppState>>,
    Query(pagination): Query<PaginationQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let restaurants = Restaurant::list(pagination.into(), &state.db_pool).await?;
    let restaurants = RestaurantCard::build_from_vec(restaurants);

    let (jar, flash) = flash::take(jar);
    let mut context = Context::new();
    context.insert("title", "Plateful");
    context.insert("flash", &flash);
    context.insert("restaurants", &restaurants);
    Ok((jar, Html(TEMPLATES.render("restaurants.html", &context)?)))
}

pub async fn http_get_restaurant(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = Restaurant::by_id(&DbId::from(id), &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("Restaurant didn't exist!")))?;
    let viewer = session.user(&state.db_pool).await?;

    let (comments, is_favorited, is_liked) = futures::try_join!(
        restaurant.comments(&state.db_pool),
        Favorite::exists(&viewer, &restaurant, &state.db_pool),
        Like::exists(&viewer, &restaurant, &state.db_pool),
    )?;
    let restaurant = RestaurantPage::build(restaurant, comments, is_favorited, is_liked);

    let (jar, flash) = flash::take(jar);
    let mut context = Context::new();
    context.insert("title", "Plateful");
    context.insert("flash", &flash);
    context.insert("restaurant", &restaurant);
    Ok((jar, Html(TEMPLATES.render("restaurant.html", &context)?)))
}

pub fn restaurants(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/restaurants",
            get(http_get_restaurants.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/restaurants/:id",
            get(http_get_restaurant.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
}
