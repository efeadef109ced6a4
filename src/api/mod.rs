//! The REST API.

use crate::{core::beer::beer_repository::BeerRepository, infra::state::AppState};
use axum::Router;

pub mod beer;

/// Constructs the full REST API.
pub fn api<R>(state: AppState<R>) -> Router
where
    R: BeerRepository + Clone + 'static,
{
    Router::new()
        .merge(beer::beer_api::routes())
        .with_state(state)
}
