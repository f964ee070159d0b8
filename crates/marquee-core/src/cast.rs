//! Cast record creation with reference checks

use crate::ports::{CastStore, CatalogStore, CelebrityStore, MovieStore};
use crate::Result;
use marquee_types::{Cast, FieldErrors, NewCast};
use tracing::info;

/// Create a cast record after checking that both ends exist.
///
/// The check and the insert are not atomic: a movie or celebrity deleted in
/// between leaves an orphan, which the resolver omits on read.
pub async fn add_cast(store: &dyn CatalogStore, cast: NewCast) -> Result<Cast> {
    let (movie, celebrity) = futures::try_join!(
        store.get_movie(&cast.movie_id),
        store.get_celebrity(&cast.celebrity_id)
    )?;

    let mut errors = FieldErrors::new();
    if movie.is_none() {
        errors.add("movie", "movie does not exist");
    }
    if celebrity.is_none() {
        errors.add("celebrity", "celebrity does not exist");
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let cast = store.create_cast(cast).await?;
    info!(
        "Cast {} created: movie={}, celebrity={}",
        cast.id, cast.movie_id, cast.celebrity_id
    );
    Ok(cast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogError, MemoryStore};
    use marquee_types::{NewCelebrity, NewMovie};

    #[tokio::test]
    async fn test_add_cast_checks_references() {
        let store = MemoryStore::new();
        let movie = store
            .create_movie(NewMovie {
                title: "Heat".to_string(),
                genre: "Crime".to_string(),
                plot: "Cops and robbers".to_string(),
            })
            .await
            .unwrap();

        let result = add_cast(
            &store,
            NewCast {
                movie_id: movie.id.clone(),
                celebrity_id: "missing".to_string(),
            },
        )
        .await;

        match result {
            Err(CatalogError::Validation(errors)) => {
                assert_eq!(errors.get("celebrity"), Some("celebrity does not exist"));
                assert_eq!(errors.get("movie"), None);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.list_cast().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_cast_persists() {
        let store = MemoryStore::new();
        let movie = store
            .create_movie(NewMovie {
                title: "Heat".to_string(),
                genre: "Crime".to_string(),
                plot: "Cops and robbers".to_string(),
            })
            .await
            .unwrap();
        let celebrity = store
            .create_celebrity(NewCelebrity {
                name: "Al Pacino".to_string(),
                occupation: "Actor".to_string(),
                catch_phrase: "Hoo-ah".to_string(),
            })
            .await
            .unwrap();

        let cast = add_cast(
            &store,
            NewCast {
                movie_id: movie.id.clone(),
                celebrity_id: celebrity.id.clone(),
            },
        )
        .await
        .unwrap();

        assert_eq!(store.list_cast_by_movie(&movie.id).await.unwrap(), vec![cast]);
    }
}
