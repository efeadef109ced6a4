//! The persisted beer entity.

use super::beer_error::BeerError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The kind of beer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "beer_type", rename_all = "UPPERCASE")]
pub enum BeerType {
    Lager,
    Malzbier,
    Witbier,
    Weiss,
    Ale,
    Ipa,
    Stout,
}

/// A beer as stored by a repository.
///
/// `id` is `None` until the beer has been saved for the first time.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Beer {
    pub id: Option<i64>,
    pub name: String,
    pub brand: String,
    pub max: i32,
    pub quantity: i32,
    #[sqlx(rename = "type")]
    pub beer_type: BeerType,
}

impl Beer {
    /// Adds `amount` to the stock.
    ///
    /// Fails without touching the stock if the result would exceed `max`.
    pub fn increment(&mut self, amount: i32) -> Result<(), BeerError> {
        self.adjust(i64::from(self.quantity) + i64::from(amount))
    }

    /// Removes `amount` from the stock.
    ///
    /// Fails without touching the stock if the result would be negative.
    /// Emptying the stock exactly is allowed.
    pub fn decrement(&mut self, amount: i32) -> Result<(), BeerError> {
        self.adjust(i64::from(self.quantity) - i64::from(amount))
    }

    fn adjust(&mut self, requested: i64) -> Result<(), BeerError> {
        match i32::try_from(requested) {
            Ok(quantity) if (0..=self.max).contains(&quantity) => {
                self.quantity = quantity;
                Ok(())
            }
            _ => Err(BeerError::StockExceeded {
                name: self.name.clone(),
                requested,
                max: self.max,
            }),
        }
    }
}
