//! Catalog entity types

use serde::{Deserialize, Serialize};

/// A movie in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub plot: String,
}

/// Editable movie fields, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
    pub plot: String,
}

impl Movie {
    pub fn from_new(id: String, new: NewMovie) -> Self {
        Self {
            id,
            title: new.title,
            genre: new.genre,
            plot: new.plot,
        }
    }
}

/// A celebrity in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebrity {
    pub id: String,
    pub name: String,
    pub occupation: String,
    pub catch_phrase: String,
}

/// Editable celebrity fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCelebrity {
    pub name: String,
    pub occupation: String,
    pub catch_phrase: String,
}

impl Celebrity {
    pub fn from_new(id: String, new: NewCelebrity) -> Self {
        Self {
            id,
            name: new.name,
            occupation: new.occupation,
            catch_phrase: new.catch_phrase,
        }
    }
}

/// One appearance of one celebrity in one movie.
///
/// Both references are plain ids; the joined records are produced by the
/// resolver and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub id: String,
    pub movie_id: String,
    pub celebrity_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCast {
    pub movie_id: String,
    pub celebrity_id: String,
}

impl Cast {
    pub fn from_new(id: String, new: NewCast) -> Self {
        Self {
            id,
            movie_id: new.movie_id,
            celebrity_id: new.celebrity_id,
        }
    }
}
