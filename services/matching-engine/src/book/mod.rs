//! Order book infrastructure module
//!
//! Contains the per-price FIFO queue and the one-direction side view.

pub mod queue;
pub mod side;

pub use queue::OrderQueue;
pub use side::OrderSide;
