use axum::{
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::flash;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    AlreadyExists(String),
    Validation(String),
    Internal(anyhow::Error),
}

/// Carried through response extensions so `error_redirect` can turn a domain
/// failure into a flash message on the referring page.
#[derive(Clone)]
pub struct FlashError(pub String);

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        match self {
            AppError::Internal(err) => {
                log::error!("Error from route, {:#?}", err);
                (status_code, format!("Error: {}", err)).into_response()
            }
            AppError::NotFound(message)
            | AppError::AlreadyExists(message)
            | AppError::Validation(message) => {
                let mut response = status_code.into_response();
                response.extensions_mut().insert(FlashError(message));
                response
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

/// The generalized error handler: any domain failure raised below becomes a
/// flash message plus a redirect back to the referring page.
pub async fn error_redirect<B>(request: Request<B>, next: Next<B>) -> Response {
    let back = request
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/restaurants")
        .to_string();

    let response = next.run(request).await;
    let message = response.extensions().get::<FlashError>().cloned();
    match message {
        Some(FlashError(message)) => {
            (flash::error(CookieJar::new(), &message), Redirect::to(&back)).into_response()
        }
        None => response,
    }
}
