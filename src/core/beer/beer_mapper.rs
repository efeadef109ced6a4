//! Conversions between [`Beer`] and [`BeerDto`].

use super::{beer_dto::BeerDto, beer_entity::Beer};

/// Converts an API representation into an entity.
pub fn to_model(dto: BeerDto) -> Beer {
    Beer {
        id: dto.id,
        name: dto.name,
        brand: dto.brand,
        max: dto.max,
        quantity: dto.quantity,
        beer_type: dto.beer_type,
    }
}

/// Converts an entity into its API representation.
pub fn to_dto(beer: Beer) -> BeerDto {
    BeerDto {
        id: beer.id,
        name: beer.name,
        brand: beer.brand,
        max: beer.max,
        quantity: beer.quantity,
        beer_type: beer.beer_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::beer::beer_entity::tests::brahma;

    #[test]
    fn entity_survives_a_trip_through_the_dto() {
        assert_eq!(brahma(), to_model(to_dto(brahma())));
    }

    #[test]
    fn unsaved_beer_keeps_missing_id() {
        let dto = BeerDto {
            id: None,
            ..to_dto(brahma())
        };
        assert_eq!(None, to_model(dto).id);
    }
}
