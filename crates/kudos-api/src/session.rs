use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

const SESSION_COOKIE: &str = "kudos_session";
const FLASH_COOKIE: &str = "kudos_flash";

/// One-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Info,
    Danger,
}

impl FlashKind {
    pub fn css_class(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Info => "info",
            FlashKind::Danger => "danger",
        }
    }

    fn parse(s: &str) -> FlashKind {
        match s {
            "success" => FlashKind::Success,
            "info" => FlashKind::Info,
            _ => FlashKind::Danger,
        }
    }
}

/// Username of the authenticated user, if the signed session cookie is
/// present and its signature checks out. Anonymous otherwise.
pub fn current_user(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

pub fn sign_in(jar: SignedCookieJar, username: &str) -> SignedCookieJar {
    jar.add(make_cookie(SESSION_COOKIE, username.to_string()))
}

pub fn sign_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(removal_cookie(SESSION_COOKIE))
}

/// Queue a flash notice for the next rendered page.
pub fn flash(jar: SignedCookieJar, kind: FlashKind, message: &str) -> SignedCookieJar {
    let value = format!("{}\t{}", kind.css_class(), message);
    jar.add(make_cookie(FLASH_COOKIE, value))
}

/// Pop the pending flash notice, removing its cookie so it shows once.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = match cookie.value().split_once('\t') {
        Some((kind, message)) => Flash {
            kind: FlashKind::parse(kind),
            message: message.to_string(),
        },
        None => Flash {
            kind: FlashKind::Info,
            message: cookie.value().to_string(),
        },
    };
    (jar.remove(removal_cookie(FLASH_COOKIE)), Some(flash))
}

/// Standard response for a session-gated route hit while Anonymous.
pub fn require_login_redirect(jar: SignedCookieJar) -> Response {
    let jar = flash(jar, FlashKind::Danger, "Please login first!");
    (jar, Redirect::to("/login")).into_response()
}

fn make_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value)).path("/").http_only(true).build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").http_only(true).build()
}
