//! Cast pages

use super::{context, form_context, Field, Views};
use crate::error::AppError;
use axum::response::Html;
use marquee_core::resolver::CastListing;
use marquee_core::{CastForm, Celebrity, FieldErrors, Movie};

pub fn index(views: &Views, listing: &CastListing) -> Result<Html<String>, AppError> {
    let mut context = context("Cast");
    context.insert("listing", listing);
    views.render("cast/index.html.tera", &context)
}

pub fn new(
    views: &Views,
    form: &CastForm,
    errors: &FieldErrors,
    movies: &[Movie],
    celebrities: &[Celebrity],
) -> Result<Html<String>, AppError> {
    let fields = [
        Field::select(
            "movie",
            "Movie",
            movies.iter().map(|m| (m.id.as_str(), m.title.as_str())),
            &form.movie,
            errors,
        ),
        Field::select(
            "celebrity",
            "Celebrity",
            celebrities.iter().map(|c| (c.id.as_str(), c.name.as_str())),
            &form.celebrity,
            errors,
        ),
    ];
    views.render(
        "cast/new.html.tera",
        &form_context("New cast member", &fields, errors),
    )
}
