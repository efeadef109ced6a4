//! The data transfer representations of a beer.

use super::beer_entity::BeerType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A beer as seen by API clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_quantity_within_max"))]
pub struct BeerDto {
    /// The beer's id. Ignored on creation; the repository assigns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The beer's name, unique across the stock.
    #[schema(example = "Brahma")]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// The brewer.
    #[schema(example = "Ambev")]
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    /// How many bottles fit in the stock.
    #[schema(example = 50)]
    #[validate(range(min = 0, max = 500))]
    pub max: i32,
    /// How many bottles are in stock.
    #[schema(example = 10)]
    #[validate(range(min = 0, max = 100))]
    pub quantity: i32,
    /// The kind of beer.
    #[serde(rename = "type")]
    pub beer_type: BeerType,
}

fn validate_quantity_within_max(beer: &BeerDto) -> Result<(), ValidationError> {
    if beer.quantity > beer.max {
        return Err(ValidationError::new("quantity_exceeds_max"));
    }
    Ok(())
}

/// An amount to add to or remove from a beer's stock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct QuantityDto {
    /// The amount.
    #[schema(example = 10)]
    #[validate(range(min = 1, max = 100))]
    pub quantity: i32,
}
