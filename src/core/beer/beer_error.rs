//! Business rule violations for the beer stock.

/// A stock rule that an operation would break.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BeerError {
    /// A beer with the same name exists already.
    #[error("beer with name {0} already registered in the system")]
    AlreadyRegistered(String),
    /// No beer has the given name.
    #[error("beer with name {0} not found in the system")]
    NameNotFound(String),
    /// No beer has the given id.
    #[error("beer with id {0} not found in the system")]
    IdNotFound(i64),
    /// The adjusted quantity would leave the `[0, max]` range.
    #[error("quantity {requested} of beer {name} is outside the stock capacity of 0 to {max}")]
    StockExceeded {
        /// Name of the beer being adjusted.
        name: String,
        /// The quantity the adjustment would have resulted in.
        requested: i64,
        /// The beer's capacity.
        max: i32,
    },
}
