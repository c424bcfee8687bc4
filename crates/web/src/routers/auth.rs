use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use db::models::{Session, User};
use serde::Deserialize;
use tera::Context;

use crate::{errors::AppError, flash, AppState, TEMPLATES};

pub async fn http_get_sign_up(jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);
    let mut context = Context::new();
    context.insert("title", "Plateful");
    context.insert("flash", &flash);
    Ok((jar, Html(TEMPLATES.render("signup.html", &context)?)))
}

#[derive(Deserialize)]
pub struct SignUpBody {
    name: String,
    email: String,
    password: String,
    password_check: String,
}

fn validate_sign_up(body: &SignUpBody) -> Result<(), AppError> {
    if body.password != body.password_check {
        return Err(AppError::Validation(String::from("Passwords do not match!")));
    }
    Ok(())
}

pub async fn http_post_sign_up(
    state: State<Arc<AppState>>,
    jar: CookieJar,
    Form(body): Form<SignUpBody>,
) -> Result<impl IntoResponse, AppError> {
    validate_sign_up(&body)?;

    let password = body.password;
    let password_hash = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await?;

    let password_hash = match password_hash {
        Ok(hash) => hash,
        Err(_) => return Err(anyhow!("password hashing failed").into()),
    };

    if User::create(body.name, body.email, password_hash, &state.db_pool)
        .await?
        .is_none()
    {
        return Err(AppError::AlreadyExists(String::from("Email already exists!")));
    }

    Ok((flash::success(jar, "Account registered!"), Redirect::to("/signin")))
}

pub async fn http_get_sign_in(
    state: State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = jar.get("token") {
        if Session::by_token(token.value(), &state.db_pool)
            .await?
            .is_some()
        {
            return Ok(Redirect::to("/restaurants").into_response());
        }
    }

    let (jar, flash) = flash::take(jar);
    let mut context = Context::new();
    context.insert("title", "Plateful");
    context.insert("flash", &flash);
    Ok((jar, Html(TEMPLATES.render("signin.html", &context)?)).into_response())
}

#[derive(Deserialize)]
pub struct SignInBody {
    email: String,
    password: String,
}

pub async fn http_post_sign_in(
    state: State<Arc<AppState>>,
    jar: CookieJar,
    Form(body): Form<SignInBody>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(user) = User::by_email(&body.email, &state.db_pool).await? {
        let parsed_hash = PasswordHash::new(&user.password_encrypted)
            .map_err(|err| anyhow!("corrupt password hash: {err}"))?;
        if Argon2::default()
            .verify_password(body.password.as_bytes(), &parsed_hash)
            .is_ok()
        {
            let session = Session::create(user.id, &state.db_pool).await?;
            let jar = jar.add(
                Cookie::build("token", session.token)
                    .path("/")
                    .finish(),
            );
            return Ok((flash::success(jar, "Signed in!"), Redirect::to("/restaurants"))
                .into_response());
        }
    }

    Ok((
        flash::error(jar, "Email or password incorrect!"),
        Redirect::to("/signin"),
    )
        .into_response())
}

pub async fn http_get_logout(
    state: State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = jar.get("token") {
        if let Some(session) = Session::by_token(token.value(), &state.db_pool).await? {
            session.delete(&state.db_pool).await?;
        }
    }

    let mut token_removal = Cookie::named("token");
    token_removal.set_path("/");
    let jar = jar.remove(token_removal);

    Ok((flash::success(jar, "Signed out!"), Redirect::to("/signin")))
}

pub fn auth() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", get(http_get_sign_up))
        .route("/signup", post(http_post_sign_up))
        .route("/signin", get(http_get_sign_in))
        .route("/signin", post(http_post_sign_in))
        .route("/logout", get(http_get_logout))
}

#[cfg(test)]
mod tests {
    use super::{validate_sign_up, SignUpBody};
    use crate::errors::AppError;

    #[test]
    fn mismatched_password_check_is_rejected() {
        let result = validate_sign_up(&SignUpBody {
            name: String::from("alice"),
            email: String::from("alice@example.com"),
            password: String::from("abc123"),
            password_check: String::from("abc124"),
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn matching_passwords_pass() {
        let result = validate_sign_up(&SignUpBody {
            name: String::from("alice"),
            email: String::from("alice@example.com"),
            password: String::from("abc123"),
            password_check: String::from("abc123"),
        });
        assert!(result.is_ok());
    }
}
