//! Celebrity pages

use super::{context, form_context, Field, Views};
use crate::error::AppError;
use axum::response::Html;
use marquee_core::resolver::CelebrityWithCast;
use marquee_core::{Celebrity, CelebrityForm, FieldErrors};

fn fields<'a>(form: &'a CelebrityForm, errors: &'a FieldErrors) -> [Field<'a>; 3] {
    [
        Field::text("name", "Name", &form.name, errors),
        Field::text("occupation", "Occupation", &form.occupation, errors),
        Field::text("catch_phrase", "Catch phrase", &form.catch_phrase, errors),
    ]
}

pub fn index(
    views: &Views,
    celebrities: &[Celebrity],
    search: Option<&str>,
) -> Result<Html<String>, AppError> {
    let mut context = context("Celebrities");
    context.insert("celebrities", celebrities);
    context.insert("search", search.unwrap_or(""));
    views.render("celebrities/index.html.tera", &context)
}

pub fn new(
    views: &Views,
    form: &CelebrityForm,
    errors: &FieldErrors,
) -> Result<Html<String>, AppError> {
    let context = form_context("New celebrity", &fields(form, errors), errors);
    views.render("celebrities/new.html.tera", &context)
}

pub fn show(views: &Views, resolved: &CelebrityWithCast) -> Result<Html<String>, AppError> {
    let mut context = context(&resolved.celebrity.name);
    context.insert("resolved", resolved);
    views.render("celebrities/show.html.tera", &context)
}

pub fn edit(
    views: &Views,
    celebrity_id: &str,
    form: &CelebrityForm,
    errors: &FieldErrors,
) -> Result<Html<String>, AppError> {
    let mut context = form_context("Edit celebrity", &fields(form, errors), errors);
    context.insert("celebrity_id", celebrity_id);
    views.render("celebrities/edit.html.tera", &context)
}
