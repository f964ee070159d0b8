//! Movie pages

use super::{context, form_context, Field, Views};
use crate::error::AppError;
use axum::response::Html;
use marquee_core::resolver::{CastedCelebrity, MovieSummary, MovieWithCast};
use marquee_core::{Celebrity, FieldErrors, MovieForm};

fn fields<'a>(form: &'a MovieForm, errors: &'a FieldErrors) -> [Field<'a>; 3] {
    [
        Field::text("title", "Title", &form.title, errors),
        Field::text("genre", "Genre", &form.genre, errors),
        Field::textarea("plot", "Plot", &form.plot, errors),
    ]
}

pub fn index(
    views: &Views,
    movies: &[MovieSummary],
    search: Option<&str>,
) -> Result<Html<String>, AppError> {
    let mut context = context("Movies");
    context.insert("movies", movies);
    context.insert("search", search.unwrap_or(""));
    views.render("movies/index.html.tera", &context)
}

pub fn new(
    views: &Views,
    form: &MovieForm,
    errors: &FieldErrors,
    celebrities: &[Celebrity],
) -> Result<Html<String>, AppError> {
    let mut context = form_context("New movie", &fields(form, errors), errors);
    context.insert("celebrities", celebrities);
    views.render("movies/new.html.tera", &context)
}

pub fn show(views: &Views, resolved: &MovieWithCast) -> Result<Html<String>, AppError> {
    let mut context = context(&resolved.movie.title);
    context.insert("resolved", resolved);
    views.render("movies/show.html.tera", &context)
}

/// Edit form, with the current cast and a form to add one more
pub fn edit(
    views: &Views,
    movie_id: &str,
    form: &MovieForm,
    errors: &FieldErrors,
    cast: &[CastedCelebrity],
    celebrities: &[Celebrity],
) -> Result<Html<String>, AppError> {
    let no_errors = FieldErrors::new();
    let cast_fields = [Field::select(
        "celebrity",
        "Add celebrity",
        celebrities.iter().map(|c| (c.id.as_str(), c.name.as_str())),
        "",
        &no_errors,
    )];

    let mut context = form_context("Edit movie", &fields(form, errors), errors);
    context.insert("movie_id", movie_id);
    context.insert("cast", cast);
    context.insert("cast_fields", &cast_fields);
    views.render("movies/edit.html.tera", &context)
}
