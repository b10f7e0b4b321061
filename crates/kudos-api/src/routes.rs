use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::{feedback, users};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(users::home))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/users/{username}", get(users::profile))
        .route(
            "/users/{username}/delete",
            get(users::delete_account).post(users::delete_account),
        )
        .route(
            "/users/{username}/feedback/add",
            get(feedback::add_form).post(feedback::add),
        )
        .route(
            "/feedback/{id}/update",
            get(feedback::update_form).post(feedback::update),
        )
        .route("/feedback/{id}/delete", post(feedback::delete))
        .with_state(state)
}
