//! Core value types for the limit order book engine
//!
//! The matching engine treats these as frozen collaborators: inert data
//! declarations with no matching logic of their own.
//!
//! # Modules
//! - `ids`: unique order identifiers
//! - `numeric`: fixed-point decimal types (Price, Quantity)
//! - `order`: order snapshot and its tag enums (Side, OrderType, TimeInForce)
//! - `errors`: error taxonomy

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
}
