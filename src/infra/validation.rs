//! Utilities for validating constraints on types.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// A type that cannot be instatiated without validating the value within.
/// That is, if you have a [`Valid<T>`], `T` is guaranteed to be valid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Valid<T> {
    value: T,
}

impl<T> Valid<T> {
    /// Constructs a new validated value.
    pub fn new(value: T) -> Result<Valid<T>, ValidationErrors>
    where
        T: Validate,
    {
        value.validate().map(|_| Valid { value })
    }

    /// Returns the validated value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<'de, T: Deserialize<'de> + Validate> Deserialize<'de> for Valid<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: T = T::deserialize(deserializer)?;
        Valid::new(value).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Valid;
    use crate::core::beer::beer_dto::{BeerDto, QuantityDto};

    #[test]
    pub fn valid_beer_succeeds() {
        let data = r#"
            {
                "name": "Brahma",
                "brand": "Ambev",
                "max": 50,
                "quantity": 10,
                "type": "LAGER"
            }
        "#;
        let value = serde_json::from_str::<Valid<BeerDto>>(data);
        assert!(value.is_ok());
    }

    #[test]
    pub fn empty_name_fails() {
        let data = r#"
            {
                "name": "",
                "brand": "Ambev",
                "max": 50,
                "quantity": 10,
                "type": "LAGER"
            }
        "#;
        let value = serde_json::from_str::<Valid<BeerDto>>(data);
        assert!(value.is_err());
    }

    #[test]
    pub fn quantity_above_max_fails() {
        let data = r#"
            {
                "name": "Brahma",
                "brand": "Ambev",
                "max": 5,
                "quantity": 10,
                "type": "LAGER"
            }
        "#;
        let value = serde_json::from_str::<Valid<BeerDto>>(data);
        assert!(value.is_err());
    }

    #[test]
    pub fn zero_quantity_adjustment_fails() {
        let value = serde_json::from_str::<Valid<QuantityDto>>(r#"{ "quantity": 0 }"#);
        assert!(value.is_err());
        let value = serde_json::from_str::<Valid<QuantityDto>>(r#"{ "quantity": 1 }"#);
        assert!(value.is_ok());
    }
}
