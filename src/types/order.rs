//! Order types for the matching engine.
//!
//! ## Fields
//!
//! Prices are fixed-point ticks (see [`crate::types::price`]); quantities
//! are plain integer units. The `quantity` field is decremented in place
//! while the order rests in the book, so a resting order always carries
//! its *remaining* quantity.

use serde::{Deserialize, Serialize};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid) - wants to purchase the asset
    Buy,
    /// Sell order (ask) - wants to sell the asset
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Wire name of the side, matching the REST `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    /// Parse the REST `type` field ("BUY" / "SELL").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BUY" => Some(Side::Buy),
            "SELL" => Some(Side::Sell),
            _ => None,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// Created by a caller, then owned by the book while resting. The book is
/// the only mutator: matching decrements `quantity`, and a fully filled
/// or cancelled order leaves the book entirely.
///
/// # Example
///
/// ```
/// use matchbook::types::{Order, Side};
///
/// // Buy 100 units at 99.50
/// let order = Order::new(1, Side::Buy, 100, 9_950_000_000, "client1", 0);
/// assert_eq!(order.side, Side::Buy);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier (assigned by the caller)
    pub order_id: u64,

    /// Buy or Sell
    pub side: Side,

    /// Remaining quantity in integer units.
    /// Decremented in place as the order is matched.
    pub quantity: u64,

    /// Limit price in fixed-point ticks (scaled by 10^8)
    pub price: u64,

    /// Opaque client identifier; never consulted by matching
    pub client_id: String,

    /// Arrival timestamp, nanoseconds. Stamped onto trades; priority
    /// within a price level is FIFO insertion order, not this value.
    pub timestamp: u64,
}

impl Order {
    /// Create a new limit order.
    pub fn new(
        order_id: u64,
        side: Side,
        quantity: u64,
        price: u64,
        client_id: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            order_id,
            side,
            quantity,
            price,
            client_id: client_id.into(),
            timestamp,
        }
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Fill a portion of this order, clamped to the remaining quantity.
    ///
    /// Returns the quantity actually filled. The clamp makes a negative
    /// remainder unrepresentable.
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual = fill_qty.min(self.quantity);
        self.quantity -= actual;
        actual
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
