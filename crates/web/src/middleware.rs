use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use db::models::Session;

use crate::{errors::AppError, AppState};

/// HTML forms can only POST; a `?_method=DELETE`/`?_method=PUT` query
/// parameter rewrites the method before routing.
pub async fn method_override<B>(mut request: Request<B>, next: Next<B>) -> Response {
    if request.method() == Method::POST {
        let target = request
            .uri()
            .query()
            .and_then(|query| {
                query
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("_method="))
            })
            .and_then(|method| match method {
                "DELETE" | "delete" => Some(Method::DELETE),
                "PUT" | "put" => Some(Method::PUT),
                _ => None,
            });

        if let Some(method) = target {
            *request.method_mut() = method;
        }
    }

    next.run(request).await
}

pub async fn auth_middleware<B>(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, AppError> {
    if let Some(token) = jar.get("token") {
        if let Some(session) = Session::by_token(token.value(), &state.db_pool).await? {
            request.extensions_mut().insert(session);
            return Ok(next.run(request).await);
        }
    }

    Ok(Redirect::to("/signin").into_response())
}

pub async fn admin_middleware<B>(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, AppError> {
    if let Some(token) = jar.get("token") {
        if let Some(session) = Session::by_token(token.value(), &state.db_pool).await? {
            if !session.user(&state.db_pool).await?.admin {
                return Ok(Redirect::to("/restaurants").into_response());
            }

            request.extensions_mut().insert(session);
            return Ok(next.run(request).await);
        }
    }

    Ok(Redirect::to("/signin").into_response())
}
