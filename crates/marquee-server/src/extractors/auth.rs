//! Auth guard for session-protected routes
//!
//! The session token travels in the `marquee_session` cookie. Presence of a
//! live session is the only signal checked: the user record behind it is not
//! re-read here.

use crate::error::AppError;
use crate::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

pub const SESSION_COOKIE: &str = "marquee_session";

/// Session token from the request's cookies, if any
pub fn session_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Cookie starting a session
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Ask the browser to drop the session cookie
pub fn clear_session_cookie(cookies: &Cookies) {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
}

/// User id of the live session behind the request's cookie
async fn current_user_id(parts: &mut Parts, state: &AppState) -> Result<Option<String>, Response> {
    let cookies = Cookies::from_request_parts(parts, state)
        .await
        .map_err(IntoResponse::into_response)?;
    match session_token(&cookies) {
        Some(token) => state
            .sessions
            .get_session(&token)
            .await
            .map_err(|e| AppError::from(e).into_response()),
        None => Ok(None),
    }
}

/// Passes only when a session exists; otherwise redirects to `/login`
#[derive(Debug, Clone)]
pub struct RequireAuthenticated {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAuthenticated {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match current_user_id(parts, state).await {
            Ok(Some(user_id)) => Ok(RequireAuthenticated { user_id }),
            Ok(None) => Err(Redirect::to("/login").into_response()),
            Err(rejection) => Err(rejection),
        }
    }
}

/// Passes only when no session exists; otherwise redirects to `/profile`
#[derive(Debug, Clone, Copy)]
pub struct RequireAnonymous;

#[async_trait]
impl FromRequestParts<AppState> for RequireAnonymous {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match current_user_id(parts, state).await {
            Ok(None) => Ok(RequireAnonymous),
            Ok(Some(_)) => Err(Redirect::to("/profile").into_response()),
            Err(rejection) => Err(rejection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("t0k");
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "t0k");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), None);
    }
}
