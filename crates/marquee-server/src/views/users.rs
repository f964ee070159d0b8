//! Registration, login and profile pages

use super::{context, form_context, Field, Views};
use crate::error::AppError;
use axum::response::Html;
use marquee_core::{FieldErrors, User};

pub fn register(views: &Views, username: &str, errors: &FieldErrors) -> Result<Html<String>, AppError> {
    let fields = [
        Field::text("username", "Username", username, errors),
        Field::password("password", "Password", errors),
    ];
    views.render(
        "users/register.html.tera",
        &form_context("Register", &fields, errors),
    )
}

/// Login form. Failures carry one page-level message, never per-field ones.
pub fn login(views: &Views, username: &str, error: Option<&str>) -> Result<Html<String>, AppError> {
    let errors = FieldErrors::new();
    let fields = [
        Field::text("username", "Username", username, &errors),
        Field::password("password", "Password", &errors),
    ];
    let mut context = form_context("Login", &fields, &errors);
    context.insert("error", &error);
    views.render("users/login.html.tera", &context)
}

pub fn profile(views: &Views, user: Option<&User>) -> Result<Html<String>, AppError> {
    let mut context = context("Profile");
    context.insert("user", &user);
    if let Some(user) = user {
        context.insert("member_since", &user.created_at.format("%Y-%m-%d").to_string());
    }
    views.render("users/profile.html.tera", &context)
}
