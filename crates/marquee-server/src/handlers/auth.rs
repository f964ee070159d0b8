//! Authentication handlers

use crate::error::AppError;
use crate::extractors::auth::{clear_session_cookie, session_cookie, session_token};
use crate::extractors::RequireAnonymous;
use crate::{views, AppState};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use marquee_core::{CatalogError, FieldErrors, LoginForm, RegisterForm, SessionStore};
use tower_cookies::Cookies;
use tracing::{info, warn};

/// Shown for every failed login, whichever credential was wrong
pub const LOGIN_FAILED: &str = "Wrong username or password. Try again.";

pub const USERNAME_TAKEN: &str = "Username already exists. Try a different one.";

pub async fn register_form(
    State(state): State<AppState>,
    _: RequireAnonymous,
) -> Result<Html<String>, AppError> {
    views::users::register(&state.views, "", &FieldErrors::new())
}

pub async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    info!("Registration attempt for: {}", form.username);

    match state.auth_service.register(&form).await {
        Ok(user) => {
            let token = state.sessions.create_session(&user.id).await?;
            cookies.add(session_cookie(&token));
            info!("Registration successful for: {}", user.username);
            Ok(Redirect::to("/profile").into_response())
        }
        Err(CatalogError::DuplicateUsername(_)) => {
            let errors = FieldErrors::single("username", USERNAME_TAKEN);
            let page = views::users::register(&state.views, &form.username, &errors)?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(CatalogError::Validation(errors)) => {
            let page = views::users::register(&state.views, &form.username, &errors)?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_form(
    State(state): State<AppState>,
    _: RequireAnonymous,
) -> Result<Html<String>, AppError> {
    views::users::login(&state.views, "", None)
}

pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    info!("Login attempt for: {}", form.username);

    match state.auth_service.login(&form).await {
        Ok(user) => {
            let token = state.sessions.create_session(&user.id).await?;
            cookies.add(session_cookie(&token));
            info!("Login successful for: {}", user.username);
            Ok(Redirect::to("/profile").into_response())
        }
        Err(CatalogError::AuthenticationFailed) => {
            warn!("Login failed for: {}", form.username);
            let page = views::users::login(&state.views, &form.username, Some(LOGIN_FAILED))?;
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Redirect, AppError> {
    if let Some(token) = session_token(&cookies) {
        state.sessions.destroy_session(&token).await?;
    }
    clear_session_cookie(&cookies);

    Ok(Redirect::to("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{body_text, get, post, redirect_target, session_from, TestApp};
    use marquee_core::UserStore;

    async fn register(app: &TestApp, username: &str, password: &str) -> Response {
        app.post(
            "/register",
            &format!("username={username}&password={password}"),
        )
        .await
    }

    #[tokio::test]
    async fn test_register_signs_in_and_redirects_to_profile() {
        let app = TestApp::new();

        let response = register(&app, "jane", "secret1").await;

        assert_eq!(redirect_target(&response), "/profile");
        let token = session_from(&response).expect("session cookie");

        let response = app.send(get("/profile", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Hello, jane"));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let app = TestApp::new();
        register(&app, "jane", "secret1").await;

        let response = register(&app, "jane", "another1").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(session_from(&response).is_none());
        assert!(body_text(response).await.contains(USERNAME_TAKEN));

        let user = app.store.get_user_by_username("jane").await.unwrap().unwrap();
        let form = LoginForm {
            username: "jane".to_string(),
            password: "secret1".to_string(),
        };
        let logged_in = app.state.auth_service.login(&form).await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let app = TestApp::new();

        let response = register(&app, "jane", "123").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("at least 6 characters"));
        assert!(app.store.get_user_by_username("jane").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_failures_look_the_same() {
        let app = TestApp::new();
        register(&app, "jane", "secret1").await;

        let wrong_password = app.post("/login", "username=jane&password=wrong11").await;
        let unknown_user = app.post("/login", "username=ghost&password=secret1").await;

        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
        assert!(session_from(&wrong_password).is_none());
        assert!(body_text(wrong_password).await.contains(LOGIN_FAILED));
        assert!(body_text(unknown_user).await.contains(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn test_login_success() {
        let app = TestApp::new();
        register(&app, "jane", "secret1").await;

        let response = app.post("/login", "username=jane&password=secret1").await;

        assert_eq!(redirect_target(&response), "/profile");
        assert!(session_from(&response).is_some());
    }

    #[tokio::test]
    async fn test_profile_requires_session() {
        let app = TestApp::new();

        let response = app.get("/profile").await;
        assert_eq!(redirect_target(&response), "/login");

        let response = app.send(get("/profile", Some("not-a-session"))).await;
        assert_eq!(redirect_target(&response), "/login");
    }

    #[tokio::test]
    async fn test_signed_in_user_is_sent_away_from_login_and_register() {
        let app = TestApp::new();
        let token = session_from(&register(&app, "jane", "secret1").await).unwrap();

        let response = app.send(get("/login", Some(&token))).await;
        assert_eq!(redirect_target(&response), "/profile");

        let response = app.send(get("/register", Some(&token))).await;
        assert_eq!(redirect_target(&response), "/profile");

        assert_eq!(app.get("/login").await.status(), StatusCode::OK);
        assert_eq!(app.get("/register").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let app = TestApp::new();
        let token = session_from(&register(&app, "jane", "secret1").await).unwrap();

        let response = app.send(post("/logout", "", Some(&token))).await;
        assert_eq!(redirect_target(&response), "/login");

        let response = app.send(get("/profile", Some(&token))).await;
        assert_eq!(redirect_target(&response), "/login");
    }

    #[tokio::test]
    async fn test_unrelated_cookies_are_not_a_session() {
        let app = TestApp::new();
        register(&app, "jane", "secret1").await;

        let request = axum::http::Request::builder()
            .uri("/profile")
            .header(axum::http::header::COOKIE, "theme=dark; lang=en")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.send(request).await;

        assert_eq!(redirect_target(&response), "/login");
    }

    #[tokio::test]
    async fn test_logout_clears_session_cookie() {
        let app = TestApp::new();
        let token = session_from(&register(&app, "jane", "secret1").await).unwrap();

        let response = app.send(post("/logout", "", Some(&token))).await;

        let cleared = response
            .headers()
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.starts_with(&format!("{}=;", crate::extractors::auth::SESSION_COOKIE)));
        assert!(cleared);
        assert!(session_from(&response).is_none());
    }
}
