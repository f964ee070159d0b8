//! Authentication service

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use marquee_core::{
    CatalogError, CatalogStore, LoginForm, NewUser, RegisterForm, Result, User, UserStore,
};
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AuthService {
    store: Arc<dyn CatalogStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// An existing username is reported before field validation runs, so a
    /// taken name always yields `DuplicateUsername`.
    pub async fn register(&self, form: &RegisterForm) -> Result<User> {
        let username = form.username.trim();

        if !username.is_empty() && self.store.get_user_by_username(username).await?.is_some() {
            warn!("Registration rejected, username taken: {}", username);
            return Err(CatalogError::DuplicateUsername(username.to_string()));
        }

        form.validate()?;

        let password_hash = hash_password(&form.password)?;
        let user = self
            .store
            .create_user(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Check credentials. Unknown users and wrong passwords fail identically.
    pub async fn login(&self, form: &LoginForm) -> Result<User> {
        let user = self
            .store
            .get_user_by_username(form.username.trim())
            .await?;

        if let Some(user) = user {
            if verify_password(&form.password, &user.password_hash)? {
                return Ok(user);
            }
        }

        Err(CatalogError::AuthenticationFailed)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CatalogError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| CatalogError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::MemoryStore;

    fn service() -> (AuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (AuthService::new(store.clone()), store)
    }

    fn register_form(username: &str, password: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn login_form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (auth, _) = service();

        let user = auth.register(&register_form("jane", "secret1")).await.unwrap();
        assert_ne!(user.password_hash, "secret1");

        let logged_in = auth.login(&login_form("jane", "secret1")).await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_creates_nothing() {
        let (auth, store) = service();
        let first = auth.register(&register_form("jane", "secret1")).await.unwrap();

        let result = auth.register(&register_form("jane", "another1")).await;
        assert!(matches!(result, Err(CatalogError::DuplicateUsername(_))));

        let stored = store.get_user_by_username("jane").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        // The original password still works, so the account was not replaced
        assert!(auth.login(&login_form("jane", "secret1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_registration_is_field_level() {
        let (auth, store) = service();

        let result = auth.register(&register_form("jane", "123")).await;
        match result {
            Err(CatalogError::Validation(errors)) => assert!(errors.get("password").is_some()),
            other => panic!("expected validation error, got {:?}", other.map(|u| u.id)),
        }
        assert!(store.get_user_by_username("jane").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (auth, _) = service();
        auth.register(&register_form("jane", "secret1")).await.unwrap();

        let wrong_password = auth.login(&login_form("jane", "nope123")).await.unwrap_err();
        let unknown_user = auth.login(&login_form("john", "secret1")).await.unwrap_err();

        assert!(matches!(wrong_password, CatalogError::AuthenticationFailed));
        assert!(matches!(unknown_user, CatalogError::AuthenticationFailed));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }
}
