use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};

use kudos_db::Database;
use kudos_types::forms::{LoginForm, SignupForm};

use crate::session::{self, FlashKind};
use crate::{internal_error, pages, password};

/// Shared application state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub cookie_key: Key,
}

// Lets SignedCookieJar pull its signing key out of the shared state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}

pub async fn register_form(jar: SignedCookieJar) -> Response {
    let (jar, flash) = session::take_flash(jar);
    let page = pages::register_page(&SignupForm::default(), &Default::default(), flash.as_ref());
    (jar, page).into_response()
}

pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response, StatusCode> {
    let mut errors = form.validate();
    if errors.is_empty() {
        let digest = password::hash_password(&form.password).map_err(internal_error)?;

        let inserted = state
            .db
            .create_user(
                &form.username,
                &digest,
                &form.email,
                &form.first_name,
                &form.last_name,
            )
            .map_err(internal_error)?;

        if inserted {
            let jar = session::sign_in(jar, &form.username);
            let jar = session::flash(jar, FlashKind::Success, "Sign up successful!");
            let to = format!("/users/{}", form.username);
            return Ok((jar, Redirect::to(&to)).into_response());
        }

        // Insert hit the primary-key constraint and was rolled back.
        errors.push("username", "Username already taken");
    }

    let (jar, flash) = session::take_flash(jar);
    let page = pages::register_page(&form, &errors, flash.as_ref());
    Ok((jar, page).into_response())
}

pub async fn login_form(jar: SignedCookieJar) -> Response {
    let (jar, flash) = session::take_flash(jar);
    let page = pages::login_page(&LoginForm::default(), &Default::default(), flash.as_ref());
    (jar, page).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, StatusCode> {
    let mut errors = form.validate();
    if errors.is_empty() {
        let user = state
            .db
            .get_user_by_username(&form.username)
            .map_err(internal_error)?;

        if let Some(user) = user {
            let verified = password::verify_password(&form.password, &user.password)
                .map_err(internal_error)?;
            if verified {
                let jar = session::sign_in(jar, &user.username);
                let jar = session::flash(jar, FlashKind::Success, "Login successful!");
                let to = format!("/users/{}", user.username);
                return Ok((jar, Redirect::to(&to)).into_response());
            }
        }

        // Same message for unknown username and wrong password.
        errors.push("username", "Invalid username/password");
    }

    let (jar, flash) = session::take_flash(jar);
    let page = pages::login_page(&form, &errors, flash.as_ref());
    Ok((jar, page).into_response())
}

pub async fn logout(jar: SignedCookieJar) -> Response {
    if session::current_user(&jar).is_none() {
        return session::require_login_redirect(jar);
    }
    let jar = session::sign_out(jar);
    let jar = session::flash(jar, FlashKind::Success, "Logged out successfully!");
    (jar, Redirect::to("/login")).into_response()
}
