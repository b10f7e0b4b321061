use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::auth::AppState;
use crate::session::{self, FlashKind};
use crate::{internal_error, pages};

pub async fn home(jar: SignedCookieJar) -> Redirect {
    match session::current_user(&jar) {
        Some(username) => Redirect::to(&format!("/users/{}", username)),
        None => Redirect::to("/login"),
    }
}

pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: SignedCookieJar,
) -> Result<Response, StatusCode> {
    if session::current_user(&jar).is_none() {
        return Ok(session::require_login_redirect(jar));
    }

    let user = state
        .db
        .get_user_by_username(&username)
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let feedback = state
        .db
        .list_feedback_for_user(&username)
        .map_err(internal_error)?;

    let (jar, flash) = session::take_flash(jar);
    let page = pages::profile_page(&user, &feedback, flash.as_ref());
    Ok((jar, page).into_response())
}

pub async fn delete_account(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: SignedCookieJar,
) -> Result<Response, StatusCode> {
    let Some(current) = session::current_user(&jar) else {
        return Ok(session::require_login_redirect(jar));
    };

    if current != username {
        let jar = session::flash(
            jar,
            FlashKind::Danger,
            "You can only delete your own account.",
        );
        let to = format!("/users/{}", current);
        return Ok((jar, Redirect::to(&to)).into_response());
    }

    let deleted = state.db.delete_user(&current).map_err(internal_error)?;
    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }

    let jar = session::sign_out(jar);
    let jar = session::flash(jar, FlashKind::Info, "Account deleted");
    Ok((jar, Redirect::to("/register")).into_response())
}
