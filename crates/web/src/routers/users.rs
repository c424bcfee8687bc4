use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    handler::Handler,
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Redirect},
    routing::{get, put},
    Extension, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use db::{
    models::{Followship, Session, User, UserUpdate},
    types::DbId,
};
use tera::Context;

use crate::{
    entities::users::{rank_users, Profile, UserCard},
    errors::AppError,
    flash,
    middleware::auth_middleware,
    uploads, AppState, TEMPLATES,
};

pub async fn http_get_top_users(
    state: State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let viewer = session.user(&state.db_pool).await?;
    let (users, followships, following_ids) = futures::try_join!(
        User::all(&state.db_pool),
        Followship::all(&state.db_pool),
        viewer.following_ids(&state.db_pool),
    )?;
    let viewer_followings = following_ids.into_iter().collect::<HashSet<DbId>>();
    let users = rank_users(users, &followships, &viewer_followings);

    let (jar, flash) = flash::take(jar);
    let mut context = Context::new();
    context.insert("title", "Plateful");
    context.insert("flash", &flash);
    context.insert("users", &users);
    Ok((jar, Html(TEMPLATES.render("top_users.html", &context)?)))
}

pub async fn http_get_user(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let target = User::by_id(&DbId::from(id), &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("User didn't exist!")))?;
    let viewer = session.user(&state.db_pool).await?;

    let (comments, favorited_restaurants, followers, followings, following_ids) = futures::try_join!(
        target.comments(&state.db_pool),
        target.favorited_restaurants(&state.db_pool),
        target.followers(&state.db_pool),
        target.followings(&state.db_pool),
        viewer.following_ids(&state.db_pool),
    )?;
    let viewer_followings = following_ids.into_iter().collect::<HashSet<DbId>>();
    let user_profile = Profile::build(
        target,
        comments,
        favorited_restaurants,
        followers,
        followings,
        &viewer_followings,
    );

    let (jar, flash) = flash::take(jar);
    let mut context = Context::new();
    context.insert("title", "Plateful");
    context.insert("flash", &flash);
    context.insert("user_profile", &user_profile);
    Ok((jar, Html(TEMPLATES.render("profile.html", &context)?)))
}

pub async fn http_get_edit_user(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let user = User::by_id(&DbId::from(id), &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("User didn't exist!")))?;

    let (jar, flash) = flash::take(jar);
    let mut context = Context::new();
    context.insert("title", "Plateful");
    context.insert("flash", &flash);
    context.insert("user", &UserCard::build(user));
    Ok((jar, Html(TEMPLATES.render("edit_profile.html", &context)?)))
}

pub async fn http_put_user(
    state: State<Arc<AppState>>,
    Path(id): Path<String>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let id = DbId::from(id);
    let user = User::by_id(&id, &state.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(String::from("User didn't exist!")))?;

    let mut name: Option<String> = None;
    let mut image: Option<String> = None;
    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("name") => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    name = Some(value);
                }
            }
            Some("image") => {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    image = Some(
                        uploads::store(
                            file_name.as_deref(),
                            content_type.as_deref(),
                            &bytes,
                            &state.config.uploads,
                        )
                        .await?,
                    );
                }
            }
            _ => {}
        }
    }

    // Omitted fields keep their prior values
    user.update(
        UserUpdate {
            name,
            image: image.map(Some),
            updated: Some(Some(Utc::now())),
        },
        &state.db_pool,
    )
    .await?;

    Ok((
        flash::success(jar, "Profile updated!"),
        Redirect::to(&format!("/users/{id}")),
    ))
}

pub fn users(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/top",
            get(http_get_top_users.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/users/:id",
            get(http_get_user.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/users/:id/edit",
            get(http_get_edit_user.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
        .route(
            "/users/:id",
            put(http_put_user.layer(from_fn_with_state(Arc::clone(state), auth_middleware))),
        )
}
