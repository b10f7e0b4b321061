use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use kudos_db::models::FeedbackRow;
use kudos_types::forms::FeedbackForm;

use crate::auth::AppState;
use crate::session::{self, FlashKind};
use crate::{internal_error, pages};

pub async fn add_form(
    Path(username): Path<String>,
    jar: SignedCookieJar,
) -> Result<Response, StatusCode> {
    let Some(current) = session::current_user(&jar) else {
        return Ok(session::require_login_redirect(jar));
    };
    if current != username {
        return Ok(not_yours(jar, &current));
    }

    let (jar, flash) = session::take_flash(jar);
    let action = format!("/users/{}/feedback/add", current);
    let page = pages::feedback_page(
        "Add Feedback",
        &action,
        &FeedbackForm::default(),
        &Default::default(),
        flash.as_ref(),
    );
    Ok((jar, page).into_response())
}

pub async fn add(
    State(state): State<AppState>,
    Path(username): Path<String>,
    jar: SignedCookieJar,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, StatusCode> {
    let Some(current) = session::current_user(&jar) else {
        return Ok(session::require_login_redirect(jar));
    };
    if current != username {
        return Ok(not_yours(jar, &current));
    }

    let errors = form.validate();
    if !errors.is_empty() {
        let action = format!("/users/{}/feedback/add", current);
        let page = pages::feedback_page("Add Feedback", &action, &form, &errors, None);
        return Ok((jar, page).into_response());
    }

    state
        .db
        .insert_feedback(&form.title, &form.content, &current)
        .map_err(internal_error)?;

    let jar = session::flash(jar, FlashKind::Success, "Feedback added");
    Ok((jar, redirect_to_profile(&current)).into_response())
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Result<Response, StatusCode> {
    let Some(current) = session::current_user(&jar) else {
        return Ok(session::require_login_redirect(jar));
    };

    let row = load_feedback(&state, id)?;
    if row.username != current {
        return Ok(not_yours(jar, &current));
    }

    let form = FeedbackForm {
        title: row.title,
        content: row.content,
    };
    let (jar, flash) = session::take_flash(jar);
    let action = format!("/feedback/{}/update", id);
    let page = pages::feedback_page(
        "Edit Feedback",
        &action,
        &form,
        &Default::default(),
        flash.as_ref(),
    );
    Ok((jar, page).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, StatusCode> {
    let Some(current) = session::current_user(&jar) else {
        return Ok(session::require_login_redirect(jar));
    };

    let row = load_feedback(&state, id)?;
    if row.username != current {
        return Ok(not_yours(jar, &current));
    }

    let errors = form.validate();
    if !errors.is_empty() {
        let action = format!("/feedback/{}/update", id);
        let page = pages::feedback_page("Edit Feedback", &action, &form, &errors, None);
        return Ok((jar, page).into_response());
    }

    state
        .db
        .update_feedback(id, &form.title, &form.content)
        .map_err(internal_error)?;

    let jar = session::flash(jar, FlashKind::Info, "Feedback edited");
    Ok((jar, redirect_to_profile(&current)).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: SignedCookieJar,
) -> Result<Response, StatusCode> {
    let Some(current) = session::current_user(&jar) else {
        return Ok(session::require_login_redirect(jar));
    };

    let row = load_feedback(&state, id)?;
    if row.username != current {
        return Ok(not_yours(jar, &current));
    }

    state.db.delete_feedback(id).map_err(internal_error)?;

    let jar = session::flash(jar, FlashKind::Info, "Feedback deleted");
    Ok((jar, redirect_to_profile(&current)).into_response())
}

fn load_feedback(state: &AppState, id: i64) -> Result<FeedbackRow, StatusCode> {
    state
        .db
        .get_feedback(id)
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)
}

/// Ownership check failed: bounce to the actor's own profile, change nothing.
fn not_yours(jar: SignedCookieJar, current: &str) -> Response {
    let jar = session::flash(
        jar,
        FlashKind::Danger,
        "You can only manage your own feedback.",
    );
    (jar, redirect_to_profile(current)).into_response()
}

fn redirect_to_profile(username: &str) -> Redirect {
    Redirect::to(&format!("/users/{}", username))
}
