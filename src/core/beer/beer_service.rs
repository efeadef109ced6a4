//! A service for managing the beer stock.
//!
//! Every operation takes the repository to work against as its first argument
//! and does at most one read and one write through it.

use super::{
    beer_dto::BeerDto,
    beer_entity::Beer,
    beer_error::BeerError,
    beer_mapper::{to_dto, to_model},
    beer_repository::BeerRepository,
};
use crate::infra::{error::ApiResult, validation::Valid};
use tracing::instrument;

/// Registers a new beer.
///
/// Fails if a beer with the same name exists. Any id sent by the client is
/// ignored; the repository assigns a fresh one.
#[instrument(skip(repository))]
pub async fn create_beer<R: BeerRepository>(
    repository: &mut R,
    beer_dto: Valid<BeerDto>,
) -> ApiResult<BeerDto> {
    let beer_dto = beer_dto.into_inner();
    verify_if_is_already_registered(repository, &beer_dto.name).await?;
    let beer = Beer {
        id: None,
        ..to_model(beer_dto)
    };
    let saved = repository.save(beer).await?;
    tracing::info!("Registered beer {:?}", saved.id);
    Ok(to_dto(saved))
}

/// Finds a beer by its name.
#[instrument(skip(repository))]
pub async fn find_by_name<R: BeerRepository>(repository: &mut R, name: &str) -> ApiResult<BeerDto> {
    let beer = repository
        .find_by_name(name)
        .await?
        .ok_or_else(|| BeerError::NameNotFound(name.to_string()))?;
    Ok(to_dto(beer))
}

/// Lists all beers.
#[instrument(skip(repository))]
pub async fn list_all<R: BeerRepository>(repository: &mut R) -> ApiResult<Vec<BeerDto>> {
    let beers = repository.find_all().await?;
    Ok(beers.into_iter().map(to_dto).collect())
}

/// Deletes a beer.
#[instrument(skip(repository))]
pub async fn delete_by_id<R: BeerRepository>(repository: &mut R, id: i64) -> ApiResult<()> {
    verify_if_exists(repository, id).await?;
    repository.delete_by_id(id).await
}

/// Adds `quantity` to a beer's stock.
///
/// Fails if the stock would exceed the beer's capacity.
#[instrument(skip(repository))]
pub async fn increment<R: BeerRepository>(
    repository: &mut R,
    id: i64,
    quantity: i32,
) -> ApiResult<BeerDto> {
    let mut beer = verify_if_exists(repository, id).await?;
    if let Err(e) = beer.increment(quantity) {
        tracing::warn!("Rejected increment: {}", e);
        return Err(e.into());
    }
    let saved = repository.save(beer).await?;
    Ok(to_dto(saved))
}

/// Removes `quantity` from a beer's stock.
///
/// Fails if the stock would go below zero.
#[instrument(skip(repository))]
pub async fn decrement<R: BeerRepository>(
    repository: &mut R,
    id: i64,
    quantity: i32,
) -> ApiResult<BeerDto> {
    let mut beer = verify_if_exists(repository, id).await?;
    if let Err(e) = beer.decrement(quantity) {
        tracing::warn!("Rejected decrement: {}", e);
        return Err(e.into());
    }
    let saved = repository.save(beer).await?;
    Ok(to_dto(saved))
}

async fn verify_if_is_already_registered<R: BeerRepository>(
    repository: &mut R,
    name: &str,
) -> ApiResult<()> {
    if repository.find_by_name(name).await?.is_some() {
        tracing::warn!("Beer {} is already registered", name);
        return Err(BeerError::AlreadyRegistered(name.to_string()).into());
    }
    Ok(())
}

async fn verify_if_exists<R: BeerRepository>(repository: &mut R, id: i64) -> ApiResult<Beer> {
    let beer = repository
        .find_by_id(id)
        .await?
        .ok_or(BeerError::IdNotFound(id))?;
    Ok(beer)
}
