//! HTTP error responses
//!
//! `AppError` turns into a bare status carrying an [`ErrorMessage`]; the
//! [`render_error_page`] middleware fills in the HTML body with the app's
//! templates.

use crate::{views, AppState};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use marquee_core::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

/// Message shown on the error page of a failed request
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Catalog(CatalogError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Catalog(CatalogError::Validation(_))
            | AppError::Catalog(CatalogError::DuplicateUsername(_)) => StatusCode::BAD_REQUEST,
            AppError::Catalog(CatalogError::AuthenticationFailed) => StatusCode::UNAUTHORIZED,
            AppError::Catalog(CatalogError::Storage(_))
            | AppError::Catalog(CatalogError::Internal(_))
            | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
            "Something went wrong. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorMessage(message));
        response
    }
}

/// Render the error page for responses produced by [`AppError`]
pub async fn render_error_page(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorMessage(message)) = response.extensions_mut().remove::<ErrorMessage>() else {
        return response;
    };
    let status = response.status();
    match views::error_page(&state.views, status, &message) {
        Ok(page) => (status, page).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            (status, message).into_response()
        }
    }
}
