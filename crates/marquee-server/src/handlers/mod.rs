//! HTTP handlers

pub mod auth;
pub mod cast;
pub mod celebrities;
pub mod movies;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

use crate::error::AppError;
use crate::{views, AppState};
use axum::{extract::State, response::Html};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    views::home(&state.views)
}

pub async fn health() -> &'static str {
    "ok"
}
