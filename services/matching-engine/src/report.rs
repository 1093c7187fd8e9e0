//! Result shapes for book operations
//!
//! Success and failure are kept apart: operations return
//! `Result<ExecutionReport, OrderError>`, and the optional fields below
//! are explicit options rather than nullable data beside an error flag.

use serde::{Deserialize, Serialize};
use types::numeric::{Price, Quantity};
use types::order::Order;

/// Outcome of a market or limit submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Orders this call fully consumed: makers taken off the book, plus a
    /// synthesized taker entry when the incoming limit order fully fills
    /// (priced at the volume-weighted average of its fills).
    pub done: Vec<Order>,

    /// The one order left partially consumed by this call: a maker whose
    /// head-of-queue size outlived the taker, or the taker's own rested
    /// remainder when it matched partially.
    pub partial: Option<Order>,

    /// Quantity traded against `partial`.
    pub partial_quantity_processed: Quantity,

    /// Quantity the call could not execute (for a limit order, the rested
    /// remainder; for a market order, unfilled demand).
    pub quantity_left: Quantity,
}

impl ExecutionReport {
    /// Total quantity this call executed.
    pub fn processed(&self, requested: Quantity) -> Quantity {
        requested.saturating_sub(self.quantity_left)
    }
}

/// Aggregated volume per price level, best to worst, per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depth {
    /// Ask levels from best (lowest price) to worst (highest).
    pub asks: Vec<(Price, Quantity)>,
    /// Bid levels from best (highest price) to worst (lowest).
    pub bids: Vec<(Price, Quantity)>,
}

/// Cost estimate for a hypothetical market order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketPriceEstimate {
    /// The book can absorb the full quantity at this total notional.
    Exact(Price),
    /// Liquidity runs out before the full quantity; `available` is the
    /// notional for what the book can absorb.
    Partial { available: Price },
}

impl MarketPriceEstimate {
    /// The accumulated notional, complete or partial.
    pub fn price(&self) -> Price {
        match self {
            MarketPriceEstimate::Exact(price) => *price,
            MarketPriceEstimate::Partial { available } => *available,
        }
    }

    /// True when the book held enough liquidity for the full quantity.
    pub fn is_exact(&self) -> bool {
        matches!(self, MarketPriceEstimate::Exact(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_accessors() {
        let exact = MarketPriceEstimate::Exact(Price::from_u64(500));
        assert!(exact.is_exact());
        assert_eq!(exact.price(), Price::from_u64(500));

        let partial = MarketPriceEstimate::Partial {
            available: Price::from_u64(120),
        };
        assert!(!partial.is_exact());
        assert_eq!(partial.price(), Price::from_u64(120));
    }

    #[test]
    fn test_report_serialization() {
        use types::ids::OrderId;
        use types::order::Side;

        let maker = Order::new(
            OrderId::new("m"),
            Side::SELL,
            Quantity::from_u64(5),
            Price::from_u64(10),
            1_000,
        );
        let report = ExecutionReport {
            done: vec![maker.clone()],
            partial: Some(maker.with_quantity(Quantity::from_u64(2))),
            partial_quantity_processed: Quantity::from_u64(3),
            quantity_left: Quantity::zero(),
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: ExecutionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);

        let depth = Depth {
            asks: vec![(Price::from_u64(101), Quantity::from_u64(3))],
            bids: vec![(Price::from_u64(99), Quantity::from_u64(2))],
        };
        let json = serde_json::to_string(&depth).unwrap();
        let back: Depth = serde_json::from_str(&json).unwrap();
        assert_eq!(depth, back);
    }

    #[test]
    fn test_report_processed() {
        let report = ExecutionReport {
            done: Vec::new(),
            partial: None,
            partial_quantity_processed: Quantity::zero(),
            quantity_left: Quantity::from_u64(3),
        };
        assert_eq!(report.processed(Quantity::from_u64(10)), Quantity::from_u64(7));
    }
}
