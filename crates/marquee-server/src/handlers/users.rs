//! User handlers

use crate::error::AppError;
use crate::extractors::RequireAuthenticated;
use crate::{views, AppState};
use axum::{extract::State, response::Html};
use marquee_core::UserStore;

pub async fn profile(
    State(state): State<AppState>,
    session: RequireAuthenticated,
) -> Result<Html<String>, AppError> {
    let user = state.store.get_user(&session.user_id).await?;
    views::users::profile(&state.views, user.as_ref())
}
