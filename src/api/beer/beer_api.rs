//! The beer API implementation.

use crate::{
    core::beer::{
        beer_dto::{BeerDto, QuantityDto},
        beer_repository::BeerRepository,
        beer_service,
    },
    infra::{
        error::{ApiResult, ErrorBody},
        extract::{Json, Path},
        state::AppState,
        validation::Valid,
    },
};
use axum::{
    extract::State,
    routing::{get, patch},
    Router,
};
use http::StatusCode;
use tracing::instrument;

/// The beer API endpoints.
///
/// The `:beer` segment is a name when fetching and an id otherwise.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: BeerRepository + Clone + 'static,
{
    Router::new()
        .route("/v1/beers", get(list_beers::<R>).post(create_beer::<R>))
        .route(
            "/v1/beers/:beer",
            get(find_by_name::<R>).delete(delete_by_id::<R>),
        )
        .route("/v1/beers/:beer/increment", patch(increment::<R>))
        .route("/v1/beers/:beer/decrement", patch(decrement::<R>))
}

/// Registers a new beer.
#[utoipa::path(
    post,
    path = "/api/v1/beers",
    request_body = BeerDto,
    responses(
        (status = 201, description = "Created", body = BeerDto),
        (status = 400, description = "Already registered", body = ErrorBody),
        (status = 422, description = "Unprocessable Entity", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
async fn create_beer<R: BeerRepository + Clone>(
    State(state): State<AppState<R>>,
    Json(beer_dto): Json<BeerDto>,
) -> ApiResult<(StatusCode, Json<BeerDto>)> {
    let beer_dto = Valid::new(beer_dto)?;
    let mut beers = state.beers().clone();
    let beer = beer_service::create_beer(&mut beers, beer_dto).await?;
    Ok((StatusCode::CREATED, Json(beer)))
}

/// Gets a beer by name.
#[utoipa::path(
    get,
    path = "/api/v1/beers/{name}",
    params(("name" = String, Path, description = "The beer's name")),
    responses(
        (status = 200, description = "Ok", body = BeerDto),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
async fn find_by_name<R: BeerRepository + Clone>(
    Path(name): Path<String>,
    State(state): State<AppState<R>>,
) -> ApiResult<Json<BeerDto>> {
    let mut beers = state.beers().clone();
    let beer = beer_service::find_by_name(&mut beers, &name).await?;
    Ok(Json(beer))
}

/// Lists all beers.
#[utoipa::path(
    get,
    path = "/api/v1/beers",
    responses(
        (status = 200, description = "Success", body = [BeerDto]),
        (status = 500, description = "Internal error", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
async fn list_beers<R: BeerRepository + Clone>(
    State(state): State<AppState<R>>,
) -> ApiResult<Json<Vec<BeerDto>>> {
    let mut beers = state.beers().clone();
    let beers = beer_service::list_all(&mut beers).await?;
    Ok(Json(beers))
}

/// Deletes a beer.
#[utoipa::path(
    delete,
    path = "/api/v1/beers/{id}",
    params(("id" = i64, Path, description = "The beer's id")),
    responses(
        (status = 204, description = "No Content"),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
async fn delete_by_id<R: BeerRepository + Clone>(
    Path(id): Path<i64>,
    State(state): State<AppState<R>>,
) -> ApiResult<StatusCode> {
    let mut beers = state.beers().clone();
    beer_service::delete_by_id(&mut beers, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Adds to a beer's stock.
#[utoipa::path(
    patch,
    path = "/api/v1/beers/{id}/increment",
    params(("id" = i64, Path, description = "The beer's id")),
    request_body = QuantityDto,
    responses(
        (status = 200, description = "Ok", body = BeerDto),
        (status = 400, description = "Stock exceeded", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 422, description = "Unprocessable Entity", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
async fn increment<R: BeerRepository + Clone>(
    Path(id): Path<i64>,
    State(state): State<AppState<R>>,
    Json(quantity): Json<QuantityDto>,
) -> ApiResult<Json<BeerDto>> {
    let quantity = Valid::new(quantity)?.into_inner().quantity;
    let mut beers = state.beers().clone();
    let beer = beer_service::increment(&mut beers, id, quantity).await?;
    Ok(Json(beer))
}

/// Removes from a beer's stock.
#[utoipa::path(
    patch,
    path = "/api/v1/beers/{id}/decrement",
    params(("id" = i64, Path, description = "The beer's id")),
    request_body = QuantityDto,
    responses(
        (status = 200, description = "Ok", body = BeerDto),
        (status = 400, description = "Stock exceeded", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 422, description = "Unprocessable Entity", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(state))]
async fn decrement<R: BeerRepository + Clone>(
    Path(id): Path<i64>,
    State(state): State<AppState<R>>,
    Json(quantity): Json<QuantityDto>,
) -> ApiResult<Json<BeerDto>> {
    let quantity = Valid::new(quantity)?.into_inner().quantity;
    let mut beers = state.beers().clone();
    let beer = beer_service::decrement(&mut beers, id, quantity).await?;
    Ok(Json(beer))
}
