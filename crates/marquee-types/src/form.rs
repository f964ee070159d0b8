//! Form payloads submitted by the browser and their field validation

use crate::{NewCast, NewCelebrity, NewMovie};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").expect("valid username pattern"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// Per-field validation messages, keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set holding a single message
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Trim a submitted value, recording an error when it is blank
fn required(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, format!("{field} is required"));
    }
    value.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieForm {
    pub title: String,
    pub genre: String,
    pub plot: String,
}

impl MovieForm {
    pub fn validate(&self) -> Result<NewMovie, FieldErrors> {
        let mut errors = FieldErrors::new();
        let new = NewMovie {
            title: required(&mut errors, "title", &self.title),
            genre: required(&mut errors, "genre", &self.genre),
            plot: required(&mut errors, "plot", &self.plot),
        };
        errors.into_result(new)
    }
}

impl From<&crate::Movie> for MovieForm {
    fn from(movie: &crate::Movie) -> Self {
        Self {
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            plot: movie.plot.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrityForm {
    pub name: String,
    pub occupation: String,
    pub catch_phrase: String,
}

impl CelebrityForm {
    pub fn validate(&self) -> Result<NewCelebrity, FieldErrors> {
        let mut errors = FieldErrors::new();
        let new = NewCelebrity {
            name: required(&mut errors, "name", &self.name),
            occupation: required(&mut errors, "occupation", &self.occupation),
            catch_phrase: required(&mut errors, "catch_phrase", &self.catch_phrase),
        };
        errors.into_result(new)
    }
}

impl From<&crate::Celebrity> for CelebrityForm {
    fn from(celebrity: &crate::Celebrity) -> Self {
        Self {
            name: celebrity.name.clone(),
            occupation: celebrity.occupation.clone(),
            catch_phrase: celebrity.catch_phrase.clone(),
        }
    }
}

/// Cast form. Field names follow the select inputs: `movie` and `celebrity` hold ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CastForm {
    pub movie: String,
    pub celebrity: String,
}

impl CastForm {
    /// Checks presence only. Whether the ids resolve is up to the store.
    pub fn validate(&self) -> Result<NewCast, FieldErrors> {
        let mut errors = FieldErrors::new();
        let new = NewCast {
            movie_id: required(&mut errors, "movie", &self.movie),
            celebrity_id: required(&mut errors, "celebrity", &self.celebrity),
        };
        errors.into_result(new)
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = required(&mut errors, "username", &self.username);
        if !username.is_empty() && !USERNAME_PATTERN.is_match(&username) {
            errors.add(
                "username",
                "username must be 3 to 32 letters, digits, '.', '_' or '-'",
            );
        }

        if self.password.is_empty() {
            errors.add("password", "password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }

        errors.into_result(())
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Query string of the listing pages (`?title=` / `?name=`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub name: Option<String>,
}
