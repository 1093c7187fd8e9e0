//! Crossing detection logic
//!
//! Determines when a resting price level is matchable by an incoming
//! limit order.

use types::numeric::Price;
use types::order::Side;

/// True when a level at `level_price` is acceptable to a limit taker on
/// `taker_side` with limit `limit_price`.
///
/// - Buy: the level must not cost more than the limit (level ≤ limit).
/// - Sell: the level must not pay less than the limit (level ≥ limit).
pub fn acceptable(taker_side: Side, limit_price: Price, level_price: Price) -> bool {
    match taker_side {
        Side::BUY => level_price <= limit_price,
        Side::SELL => level_price >= limit_price,
    }
}
