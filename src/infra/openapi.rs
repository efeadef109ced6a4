//! OpenAPI configuration.

use crate::api::beer::beer_api;
use crate::core::beer::{beer_dto, beer_entity};
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    paths(
        beer_api::create_beer,
        beer_api::find_by_name,
        beer_api::list_beers,
        beer_api::delete_by_id,
        beer_api::increment,
        beer_api::decrement,
    ),
    components(
        schemas(
            beer_dto::BeerDto,
            beer_dto::QuantityDto,
            beer_entity::BeerType,
            crate::infra::error::ErrorBody
        )
    )
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_beer_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/beers",
            "/api/v1/beers/{name}",
            "/api/v1/beers/{id}",
            "/api/v1/beers/{id}/increment",
            "/api/v1/beers/{id}/decrement",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
