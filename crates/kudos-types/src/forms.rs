use std::collections::BTreeMap;

use serde::Deserialize;

/// Per-field validation errors collected while checking a submitted form.
/// Empty means the form is valid. Route handlers may attach extra errors
/// (username taken, invalid credentials) before re-rendering.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl SignupForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "username", &self.username);
        check_max_len(&mut errors, "username", &self.username, 20);
        check_required(&mut errors, "password", &self.password);
        check_max_len(&mut errors, "password", &self.password, 55);
        check_required(&mut errors, "email", &self.email);
        check_email(&mut errors, "email", &self.email);
        check_max_len(&mut errors, "email", &self.email, 50);
        check_required(&mut errors, "first_name", &self.first_name);
        check_max_len(&mut errors, "first_name", &self.first_name, 30);
        check_required(&mut errors, "last_name", &self.last_name);
        check_max_len(&mut errors, "last_name", &self.last_name, 30);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "username", &self.username);
        check_max_len(&mut errors, "username", &self.username, 20);
        check_required(&mut errors, "password", &self.password);
        check_max_len(&mut errors, "password", &self.password, 55);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "title", &self.title);
        check_max_len(&mut errors, "title", &self.title, 100);
        check_required(&mut errors, "content", &self.content);
        errors
    }
}

fn check_required(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "This field is required.");
    }
}

fn check_max_len(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(field, format!("Must be at most {} characters.", max));
    }
}

/// Minimal shape check: nonempty local part, one '@', dot in the domain.
fn check_email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        return; // required check already fired
    }
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
        }
        None => false,
    };
    if !valid {
        errors.push(field, "Invalid email address.");
    }
}
