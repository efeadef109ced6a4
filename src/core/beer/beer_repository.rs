//! Types and functions for storing and loading beers.

use super::beer_entity::Beer;
use crate::infra::{
    database::DbPool,
    error::{ApiResult, ClientError, InternalError},
};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::{instrument, Instrument};

/// Anything that can store and load beers.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BeerRepository: Send + Sync {
    /// Finds the beer with the given name.
    async fn find_by_name(&mut self, name: &str) -> ApiResult<Option<Beer>>;

    /// Finds the beer with the given id.
    async fn find_by_id(&mut self, id: i64) -> ApiResult<Option<Beer>>;

    /// Lists all beers.
    async fn find_all(&mut self) -> ApiResult<Vec<Beer>>;

    /// Inserts or replaces a beer, assigning an id if it has none.
    async fn save(&mut self, beer: Beer) -> ApiResult<Beer>;

    /// Deletes the beer with the given id.
    async fn delete_by_id(&mut self, id: i64) -> ApiResult<()>;
}

/// A beer repository backed by postgres.
#[derive(Clone, Debug)]
pub struct PgBeerRepository {
    db: DbPool,
}

impl PgBeerRepository {
    /// Creates a new repository.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl BeerRepository for PgBeerRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&mut self, name: &str) -> ApiResult<Option<Beer>> {
        tracing::info!("Reading beer");
        let beer = sqlx::query_as::<_, Beer>(
            r#"
            SELECT id, name, brand, max, quantity, type FROM beers
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .instrument(tracing::info_span!("fetch_optional"))
        .await?;
        tracing::info!("Found beer: {:?}", beer);
        Ok(beer)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&mut self, id: i64) -> ApiResult<Option<Beer>> {
        tracing::info!("Reading beer");
        let beer = sqlx::query_as::<_, Beer>(
            r#"
            SELECT id, name, brand, max, quantity, type FROM beers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .instrument(tracing::info_span!("fetch_optional"))
        .await?;
        tracing::info!("Found beer: {:?}", beer);
        Ok(beer)
    }

    #[instrument(skip(self))]
    async fn find_all(&mut self) -> ApiResult<Vec<Beer>> {
        tracing::info!("Listing beers");
        let beers = sqlx::query_as::<_, Beer>(
            r#"
            SELECT id, name, brand, max, quantity, type FROM beers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .instrument(tracing::info_span!("fetch_all"))
        .await?;
        tracing::info!("Listed {} beers", beers.len());
        Ok(beers)
    }

    #[instrument(skip(self))]
    async fn save(&mut self, beer: Beer) -> ApiResult<Beer> {
        tracing::info!("Saving beer {:?}", beer);
        let query = match beer.id {
            None => sqlx::query_as::<_, Beer>(
                r#"
                INSERT INTO beers (name, brand, max, quantity, type)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, name, brand, max, quantity, type
                "#,
            ),
            Some(id) => sqlx::query_as::<_, Beer>(
                r#"
                INSERT INTO beers (id, name, brand, max, quantity, type)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    brand = EXCLUDED.brand,
                    max = EXCLUDED.max,
                    quantity = EXCLUDED.quantity,
                    type = EXCLUDED.type
                RETURNING id, name, brand, max, quantity, type
                "#,
            )
            .bind(id),
        };
        let saved = query
            .bind(beer.name)
            .bind(beer.brand)
            .bind(beer.max)
            .bind(beer.quantity)
            .bind(beer.beer_type)
            .fetch_one(&self.db)
            .await?;
        tracing::info!("Saved beer {:?}", saved);
        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&mut self, id: i64) -> ApiResult<()> {
        tracing::info!("Deleting beer {:?}", id);
        let rows = sqlx::query(
            r#"
            DELETE FROM beers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        if rows.rows_affected() == 0 {
            tracing::warn!("Beer not found");
            return Err(ClientError::NotFound)?;
        }

        tracing::info!("Deleted beer");

        Ok(())
    }
}

/// A beer repository that keeps everything in memory.
///
/// Clones share the same store.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBeerRepository {
    store: Arc<Mutex<InMemoryStore>>,
}

#[derive(Debug, Default)]
struct InMemoryStore {
    beers: BTreeMap<i64, Beer>,
    last_id: i64,
}

impl InMemoryBeerRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> ApiResult<MutexGuard<'_, InMemoryStore>> {
        let store = self
            .store
            .lock()
            .map_err(|e| InternalError::PoisonedLock(e.to_string()))?;
        Ok(store)
    }
}

#[async_trait::async_trait]
impl BeerRepository for InMemoryBeerRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&mut self, name: &str) -> ApiResult<Option<Beer>> {
        let beer = self
            .store()?
            .beers
            .values()
            .find(|beer| beer.name == name)
            .cloned();
        tracing::info!("Found beer: {:?}", beer);
        Ok(beer)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&mut self, id: i64) -> ApiResult<Option<Beer>> {
        let beer = self.store()?.beers.get(&id).cloned();
        tracing::info!("Found beer: {:?}", beer);
        Ok(beer)
    }

    #[instrument(skip(self))]
    async fn find_all(&mut self) -> ApiResult<Vec<Beer>> {
        let beers: Vec<Beer> = self.store()?.beers.values().cloned().collect();
        tracing::info!("Listed {} beers", beers.len());
        Ok(beers)
    }

    #[instrument(skip(self))]
    async fn save(&mut self, mut beer: Beer) -> ApiResult<Beer> {
        let mut store = self.store()?;
        let id = match beer.id {
            Some(id) => id,
            None => store.last_id + 1,
        };
        let name_taken = store
            .beers
            .values()
            .any(|other| other.name == beer.name && other.id != Some(id));
        if name_taken {
            tracing::warn!("Beer name {} is taken", beer.name);
            return Err(ClientError::Conflict)?;
        }
        store.last_id = store.last_id.max(id);
        beer.id = Some(id);
        store.beers.insert(id, beer.clone());
        tracing::info!("Saved beer {:?}", beer);
        Ok(beer)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&mut self, id: i64) -> ApiResult<()> {
        if self.store()?.beers.remove(&id).is_none() {
            tracing::warn!("Beer not found");
            return Err(ClientError::NotFound)?;
        }
        tracing::info!("Deleted beer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::beer::beer_entity::tests::brahma;

    fn unsaved(name: &str) -> Beer {
        Beer {
            id: None,
            name: name.to_string(),
            ..brahma()
        }
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let mut repo = InMemoryBeerRepository::new();
        let first = repo.save(unsaved("Brahma")).await.unwrap();
        let second = repo.save(unsaved("Skol")).await.unwrap();
        assert_eq!(Some(1), first.id);
        assert_eq!(Some(2), second.id);
    }

    #[tokio::test]
    async fn save_keeps_given_id_and_moves_sequence_past_it() {
        let mut repo = InMemoryBeerRepository::new();
        let given = repo.save(Beer { id: Some(10), ..brahma() }).await.unwrap();
        let next = repo.save(unsaved("Skol")).await.unwrap();
        assert_eq!(Some(10), given.id);
        assert_eq!(Some(11), next.id);
    }

    #[tokio::test]
    async fn save_replaces_existing_beer() {
        let mut repo = InMemoryBeerRepository::new();
        let mut beer = repo.save(brahma()).await.unwrap();
        beer.quantity = 20;
        repo.save(beer).await.unwrap();
        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(20, found.quantity);
        assert_eq!(1, repo.find_all().await.unwrap().len());
    }

    #[tokio::test]
    async fn save_rejects_taken_name() {
        let mut repo = InMemoryBeerRepository::new();
        repo.save(brahma()).await.unwrap();
        let result = repo.save(unsaved("Brahma")).await;
        assert!(matches!(
            result,
            Err(crate::infra::error::ApiError::ClientError(
                ClientError::Conflict
            ))
        ));
    }

    #[tokio::test]
    async fn find_by_name_and_id() {
        let mut repo = InMemoryBeerRepository::new();
        repo.save(brahma()).await.unwrap();
        assert_eq!(Some(brahma()), repo.find_by_name("Brahma").await.unwrap());
        assert_eq!(None, repo.find_by_name("Skol").await.unwrap());
        assert_eq!(Some(brahma()), repo.find_by_id(1).await.unwrap());
        assert_eq!(None, repo.find_by_id(2).await.unwrap());
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let mut repo = InMemoryBeerRepository::new();
        let mut clone = repo.clone();
        clone.save(brahma()).await.unwrap();
        assert_eq!(1, repo.find_all().await.unwrap().len());
    }

    #[tokio::test]
    async fn delete_unknown_id_fails() {
        let mut repo = InMemoryBeerRepository::new();
        assert!(repo.delete_by_id(1).await.is_err());
        repo.save(brahma()).await.unwrap();
        repo.delete_by_id(1).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[ignore = "needs a postgres DATABASE_URL"]
    async fn pg_save_inserts_then_updates(db: DbPool) {
        let mut repo = PgBeerRepository::new(db);

        let mut beer = repo.save(unsaved("Brahma")).await.unwrap();
        let id = beer.id.unwrap();
        assert_eq!(Some(beer.clone()), repo.find_by_name("Brahma").await.unwrap());

        beer.quantity = 20;
        let updated = repo.save(beer).await.unwrap();
        assert_eq!(Some(id), updated.id);
        assert_eq!(20, repo.find_by_id(id).await.unwrap().unwrap().quantity);
        assert_eq!(1, repo.find_all().await.unwrap().len());

        let skol = repo.save(unsaved("Skol")).await.unwrap();
        assert_ne!(Some(id), skol.id);
        assert_eq!(2, repo.find_all().await.unwrap().len());
    }
}
