//! Trade type representing an executed match between two orders.

use serde::{Deserialize, Serialize};

/// A trade produced by the matching engine.
///
/// ## Price and timestamp
///
/// The execution price is always the sell (ask) side's limit price, and
/// the timestamp is carried over from the buy order. Both rules keep a
/// replay of the same order sequence byte-for-byte identical; the matcher
/// never consults the wall clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade identifier; starts at 0 and increments by 1 per trade
    pub trade_id: u64,

    /// ID of the buy order in this match
    pub buy_order_id: u64,

    /// ID of the sell order in this match
    pub sell_order_id: u64,

    /// Executed quantity in integer units, always positive
    pub quantity: u64,

    /// Execution price in fixed-point ticks (the ask side's price)
    pub price: u64,

    /// Timestamp inherited from the buy order, nanoseconds
    pub timestamp: u64,
}

impl Trade {
    pub fn new(
        trade_id: u64,
        buy_order_id: u64,
        sell_order_id: u64,
        quantity: u64,
        price: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            trade_id,
            buy_order_id,
            sell_order_id,
            quantity,
            price,
            timestamp,
        }
    }

    /// Notional value of this trade: price × quantity.
    ///
    /// The result is in fixed-point ticks (price scale); divide by
    /// [`crate::types::price::SCALE`] for the display value.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}
