//! Relationship resolver
//!
//! Movies and celebrities are linked through cast records. Nothing about the
//! relationship is stored on either entity, so every view that needs it is
//! computed here from the store, in full, on every call:
//!
//! - movie detail: Movie -> Cast[] -> Celebrity
//! - celebrity detail: Celebrity -> Cast[] -> Movie
//! - cast listing: Cast -> (Movie, Celebrity)
//! - movie listing: Movie -> Cast[] (ids only)
//!
//! A cast record whose movie or celebrity has been deleted is an orphan.
//! Orphans are left in storage and omitted from every resolved view. The
//! cast listing reports them separately so they can still be removed.

use crate::ports::{CastStore, CatalogStore, CelebrityStore, MovieStore};
use crate::search;
use crate::{CatalogError, Result};
use futures::future::try_join_all;
use marquee_types::{Cast, Celebrity, Movie};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// A cast record with its celebrity populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastedCelebrity {
    pub cast_id: String,
    pub celebrity: Celebrity,
}

/// A cast record with its movie populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastedMovie {
    pub cast_id: String,
    pub movie: Movie,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieWithCast {
    pub movie: Movie,
    pub cast: Vec<CastedCelebrity>,
}

impl MovieWithCast {
    pub fn celebrities(&self) -> impl Iterator<Item = &Celebrity> {
        self.cast.iter().map(|c| &c.celebrity)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CelebrityWithCast {
    pub celebrity: Celebrity,
    pub cast: Vec<CastedMovie>,
}

impl CelebrityWithCast {
    /// Movies this celebrity appears in, one per cast record
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.cast.iter().map(|c| &c.movie)
    }
}

/// A cast record with both sides populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastEntry {
    pub id: String,
    pub movie: Movie,
    pub celebrity: Celebrity,
}

/// Listing row: a movie and its raw cast records
#[derive(Debug, Clone, Serialize)]
pub struct MovieSummary {
    pub movie: Movie,
    pub cast: Vec<Cast>,
}

pub async fn resolve_movie_with_cast(
    store: &dyn CatalogStore,
    movie_id: &str,
) -> Result<MovieWithCast> {
    let movie = store
        .get_movie(movie_id)
        .await?
        .ok_or_else(|| CatalogError::not_found("movie", movie_id))?;

    let links = store.list_cast_by_movie(movie_id).await?;
    let resolved = try_join_all(links.into_iter().map(|link| async move {
        let celebrity = store.get_celebrity(&link.celebrity_id).await?;
        if celebrity.is_none() {
            debug!("Omitting cast {}: celebrity {} is gone", link.id, link.celebrity_id);
        }
        Ok::<_, CatalogError>(celebrity.map(|celebrity| CastedCelebrity {
            cast_id: link.id,
            celebrity,
        }))
    }))
    .await?;

    Ok(MovieWithCast {
        movie,
        cast: resolved.into_iter().flatten().collect(),
    })
}

pub async fn resolve_celebrity_with_cast(
    store: &dyn CatalogStore,
    celebrity_id: &str,
) -> Result<CelebrityWithCast> {
    let celebrity = store
        .get_celebrity(celebrity_id)
        .await?
        .ok_or_else(|| CatalogError::not_found("celebrity", celebrity_id))?;

    let links = store.list_cast_by_celebrity(celebrity_id).await?;
    let resolved = try_join_all(links.into_iter().map(|link| async move {
        let movie = store.get_movie(&link.movie_id).await?;
        if movie.is_none() {
            debug!("Omitting cast {}: movie {} is gone", link.id, link.movie_id);
        }
        Ok::<_, CatalogError>(movie.map(|movie| CastedMovie {
            cast_id: link.id,
            movie,
        }))
    }))
    .await?;

    Ok(CelebrityWithCast {
        celebrity,
        cast: resolved.into_iter().flatten().collect(),
    })
}

/// The cast listing: resolved records, plus orphans kept apart
#[derive(Debug, Clone, Default, Serialize)]
pub struct CastListing {
    pub entries: Vec<CastEntry>,
    pub orphans: Vec<Cast>,
}

pub async fn resolve_cast_listing(store: &dyn CatalogStore) -> Result<CastListing> {
    let links = store.list_cast().await?;
    let resolved = try_join_all(links.into_iter().map(|link| async move {
        let (movie, celebrity) = futures::try_join!(
            store.get_movie(&link.movie_id),
            store.get_celebrity(&link.celebrity_id)
        )?;
        Ok::<_, CatalogError>(match (movie, celebrity) {
            (Some(movie), Some(celebrity)) => Ok(CastEntry {
                id: link.id,
                movie,
                celebrity,
            }),
            _ => {
                debug!("Omitting orphaned cast {}", link.id);
                Err(link)
            }
        })
    }))
    .await?;

    let mut listing = CastListing::default();
    for item in resolved {
        match item {
            Ok(entry) => listing.entries.push(entry),
            Err(orphan) => listing.orphans.push(orphan),
        }
    }
    Ok(listing)
}

/// Every cast record with both its movie and celebrity
pub async fn resolve_all_cast_full(store: &dyn CatalogStore) -> Result<Vec<CastEntry>> {
    Ok(resolve_cast_listing(store).await?.entries)
}

/// Movies matching `title` (see [`search::matches`]), each with its cast
/// records. Records whose celebrity is gone are left out.
pub async fn list_movies_with_cast(
    store: &dyn CatalogStore,
    title: Option<&str>,
) -> Result<Vec<MovieSummary>> {
    let (movies, celebrities) = futures::try_join!(
        store.find_movies(search::normalize(title)),
        store.list_celebrities()
    )?;
    let known: HashSet<String> = celebrities.into_iter().map(|c| c.id).collect();
    let known = &known;

    try_join_all(movies.into_iter().map(|movie| async move {
        let cast = store
            .list_cast_by_movie(&movie.id)
            .await?
            .into_iter()
            .filter(|link| known.contains(&link.celebrity_id))
            .collect();
        Ok::<_, CatalogError>(MovieSummary { movie, cast })
    }))
    .await
}
