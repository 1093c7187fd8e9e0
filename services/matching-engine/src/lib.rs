//! Central limit order book matching engine
//!
//! Accepts market and limit orders (GTC, IOC, FOK), matches them against
//! resting liquidity under strict price-then-time priority, and keeps the
//! book queryable (depth, order lookup, market-price estimation).
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced
//! - Deterministic matching (same inputs → same outputs)
//! - The id index and the per-price queues always agree
//! - Validation failures never mutate the book
//!
//! The engine is synchronous and single-writer: each public operation is
//! one indivisible critical section, and callers under concurrency must
//! serialize access to a book instance.

pub mod book;
pub mod crossing;
pub mod engine;
pub mod report;

pub use engine::{OrderBook, OrderPatch};
pub use report::{Depth, ExecutionReport, MarketPriceEstimate};
