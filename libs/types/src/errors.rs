//! Error taxonomy for the matching engine
//!
//! Every kind is detected before any book mutation; a returned error
//! therefore guarantees zero side effects for the failed call.

use thiserror::Error;

/// Rejection reasons surfaced by order intake and modification.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderError {
    #[error("invalid order type")]
    InvalidOrderType,

    #[error("invalid side")]
    InvalidSide,

    #[error("insufficient quantity to calculate price")]
    InsufficientQuantity,

    #[error("invalid quantity")]
    InvalidQuantity,

    #[error("invalid price")]
    InvalidPrice,

    #[error("invalid time-in-force")]
    InvalidTimeInForce,

    #[error("order already exists")]
    OrderExists,

    #[error("limit FOK order not fillable")]
    LimitFokNotFillable,
}
