use axum::response::Html;

use kudos_db::models::{FeedbackRow, UserRow};
use kudos_types::forms::{FeedbackForm, FieldErrors, LoginForm, SignupForm};

use crate::session::Flash;

/// Escape text for interpolation into HTML bodies and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> Html<String> {
    let notice = match flash {
        Some(f) => format!(
            r#"<p class="flash {}">{}</p>"#,
            f.kind.css_class(),
            escape(&f.message)
        ),
        None => String::new(),
    };
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{notice}\n{body}\n</body>\n</html>\n",
        title = escape(title),
    ))
}

fn field_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!(r#"<ul class="errors">{}</ul>"#, items)
}

fn text_input(label: &str, name: &str, kind: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        "<p><label for=\"{name}\">{label}</label>\n\
         <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">{errors}</p>",
        label = escape(label),
        value = escape(value),
        errors = field_errors(errors.field(name)),
    )
}

pub fn register_page(form: &SignupForm, errors: &FieldErrors, flash: Option<&Flash>) -> Html<String> {
    let body = format!(
        "<h1>Sign Up</h1>\n<form method=\"post\" action=\"/register\">\n{}{}{}{}{}\
         <button type=\"submit\">Register</button>\n</form>\n\
         <p><a href=\"/login\">Already have an account? Log in</a></p>",
        text_input("Username", "username", "text", &form.username, errors),
        text_input("Password", "password", "password", "", errors),
        text_input("Email", "email", "text", &form.email, errors),
        text_input("First Name", "first_name", "text", &form.first_name, errors),
        text_input("Last Name", "last_name", "text", &form.last_name, errors),
    );
    layout("Sign Up", flash, &body)
}

pub fn login_page(form: &LoginForm, errors: &FieldErrors, flash: Option<&Flash>) -> Html<String> {
    let body = format!(
        "<h1>Login</h1>\n<form method=\"post\" action=\"/login\">\n{}{}\
         <button type=\"submit\">Login</button>\n</form>\n\
         <p><a href=\"/register\">New here? Sign up</a></p>",
        text_input("Username", "username", "text", &form.username, errors),
        text_input("Password", "password", "password", "", errors),
    );
    layout("Login", flash, &body)
}

/// Shared form page for adding and editing feedback; `action` is the
/// submit target, which differs between the two.
pub fn feedback_page(
    heading: &str,
    action: &str,
    form: &FeedbackForm,
    errors: &FieldErrors,
    flash: Option<&Flash>,
) -> Html<String> {
    let body = format!(
        "<h1>{heading}</h1>\n<form method=\"post\" action=\"{action}\">\n{title}\
         <p><label for=\"content\">Content</label>\n\
         <textarea id=\"content\" name=\"content\">{content}</textarea>{content_errors}</p>\
         <button type=\"submit\">Save</button>\n</form>",
        heading = escape(heading),
        action = escape(action),
        title = text_input("Title", "title", "text", &form.title, errors),
        content = escape(&form.content),
        content_errors = field_errors(errors.field("content")),
    );
    layout(heading, flash, &body)
}

pub fn profile_page(user: &UserRow, feedback: &[FeedbackRow], flash: Option<&Flash>) -> Html<String> {
    let username = escape(&user.username);
    let mut items = String::new();
    for row in feedback {
        items.push_str(&format!(
            "<li><h3>{title}</h3><p>{content}</p>\n\
             <a href=\"/feedback/{id}/update\">Edit</a>\n\
             <form method=\"post\" action=\"/feedback/{id}/delete\">\
             <button type=\"submit\">Delete</button></form></li>\n",
            title = escape(&row.title),
            content = escape(&row.content),
            id = row.id,
        ));
    }
    if items.is_empty() {
        items.push_str("<li>No feedback yet.</li>");
    }

    let body = format!(
        "<h1>{first} {last} ({username})</h1>\n<p>{email}</p>\n\
         <form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>\n\
         <p><a href=\"/users/{username}/feedback/add\">Add feedback</a></p>\n\
         <h2>Feedback</h2>\n<ul>\n{items}</ul>\n\
         <form method=\"post\" action=\"/users/{username}/delete\">\
         <button type=\"submit\">Delete account</button></form>",
        first = escape(&user.first_name),
        last = escape(&user.last_name),
        email = escape(&user.email),
    );
    layout(&user.username, flash, &body)
}
