//! Cast handlers

use crate::error::AppError;
use crate::{views, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use marquee_core::{cast, resolver};
use marquee_core::{CastForm, CastStore, CatalogError, CelebrityStore, FieldErrors, MovieStore};
use tracing::info;

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let listing = resolver::resolve_cast_listing(state.store.as_ref()).await?;
    views::cast::index(&state.views, &listing)
}

async fn render_new(
    state: &AppState,
    form: &CastForm,
    errors: &FieldErrors,
) -> Result<Html<String>, AppError> {
    let movies = state.store.list_movies().await?;
    let celebrities = state.store.list_celebrities().await?;
    views::cast::new(&state.views, form, errors, &movies, &celebrities)
}

pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_new(&state, &CastForm::default(), &FieldErrors::new()).await
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CastForm>,
) -> Result<Response, AppError> {
    let result = match form.validate() {
        Ok(new) => cast::add_cast(state.store.as_ref(), new).await,
        Err(errors) => Err(errors.into()),
    };

    match result {
        Ok(_) => Ok(Redirect::to("/cast").into_response()),
        Err(CatalogError::Validation(errors)) => {
            let page = render_new(&state, &form, &errors).await?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.store.delete_cast(&id).await?;
    info!("Cast deleted: {}", id);
    Ok(Redirect::to("/cast"))
}
