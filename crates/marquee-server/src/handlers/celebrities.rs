//! Celebrity handlers

use crate::error::AppError;
use crate::{views, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use marquee_core::resolver;
use marquee_core::{CatalogError, CelebrityForm, CelebrityStore, FieldErrors, SearchQuery};
use tracing::info;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let celebrities = state
        .store
        .find_celebrities(query.name.as_deref())
        .await?;
    views::celebrities::index(&state.views, &celebrities, query.name.as_deref())
}

pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    views::celebrities::new(&state.views, &CelebrityForm::default(), &FieldErrors::new())
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<CelebrityForm>,
) -> Result<Response, AppError> {
    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            let page = views::celebrities::new(&state.views, &form, &errors)?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let celebrity = state.store.create_celebrity(new).await?;
    info!("Celebrity created: {} ({})", celebrity.name, celebrity.id);

    Ok(Redirect::to(&format!("/celebrities/{}", celebrity.id)).into_response())
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let resolved = resolver::resolve_celebrity_with_cast(state.store.as_ref(), &id).await?;
    views::celebrities::show(&state.views, &resolved)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let celebrity = state
        .store
        .get_celebrity(&id)
        .await?
        .ok_or_else(|| CatalogError::not_found("celebrity", &id))?;
    views::celebrities::edit(
        &state.views,
        &id,
        &CelebrityForm::from(&celebrity),
        &FieldErrors::new(),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CelebrityForm>,
) -> Result<Response, AppError> {
    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            if state.store.get_celebrity(&id).await?.is_none() {
                return Err(CatalogError::not_found("celebrity", &id).into());
            }
            let page = views::celebrities::edit(&state.views, &id, &form, &errors)?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let celebrity = state.store.update_celebrity(&id, new).await?;
    info!("Celebrity updated: {} ({})", celebrity.name, celebrity.id);

    Ok(Redirect::to(&format!("/celebrities/{}", celebrity.id)).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.store.delete_celebrity(&id).await?;
    info!("Celebrity deleted: {}", id);
    Ok(Redirect::to("/celebrities"))
}
