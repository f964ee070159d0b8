//! Movie handlers

use crate::error::AppError;
use crate::{views, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use marquee_core::resolver;
use marquee_core::{CelebrityStore, FieldErrors, MovieForm, MovieStore, SearchQuery};
use tracing::info;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let movies = resolver::list_movies_with_cast(state.store.as_ref(), query.title.as_deref()).await?;
    views::movies::index(&state.views, &movies, query.title.as_deref())
}

pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let celebrities = state.store.list_celebrities().await?;
    views::movies::new(
        &state.views,
        &MovieForm::default(),
        &FieldErrors::new(),
        &celebrities,
    )
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<MovieForm>,
) -> Result<Response, AppError> {
    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            let celebrities = state.store.list_celebrities().await?;
            let page = views::movies::new(&state.views, &form, &errors, &celebrities)?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let movie = state.store.create_movie(new).await?;
    info!("Movie created: {} ({})", movie.title, movie.id);

    Ok(Redirect::to(&format!("/movies/{}", movie.id)).into_response())
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let resolved = resolver::resolve_movie_with_cast(state.store.as_ref(), &id).await?;
    views::movies::show(&state.views, &resolved)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let resolved = resolver::resolve_movie_with_cast(state.store.as_ref(), &id).await?;
    let celebrities = state.store.list_celebrities().await?;
    views::movies::edit(
        &state.views,
        &id,
        &MovieForm::from(&resolved.movie),
        &FieldErrors::new(),
        &resolved.cast,
        &celebrities,
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Result<Response, AppError> {
    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            // Re-render against the stored movie so an unknown id is still a 404
            let resolved = resolver::resolve_movie_with_cast(state.store.as_ref(), &id).await?;
            let celebrities = state.store.list_celebrities().await?;
            let page = views::movies::edit(
                &state.views,
                &id,
                &form,
                &errors,
                &resolved.cast,
                &celebrities,
            )?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let movie = state.store.update_movie(&id, new).await?;
    info!("Movie updated: {} ({})", movie.title, movie.id);

    Ok(Redirect::to(&format!("/movies/{}", movie.id)).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.store.delete_movie(&id).await?;
    info!("Movie deleted: {}", id);
    Ok(Redirect::to("/movies"))
}
