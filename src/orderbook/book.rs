//! Limit order book: ladders, index, and trade log.
//!
//! ## Architecture
//!
//! The book uses a hybrid data structure:
//!
//! - **Slab**: address-stable storage for O(1) order operations
//! - **BTreeMap**: sorted price levels for best bid/ask lookup
//! - **HashMap**: order ID to slab key mapping for O(1) cancel
//!
//! ## Price Ordering
//!
//! - **Bids** (buy orders): keyed by `Reverse(price)`, best bid first
//! - **Asks** (sell orders): keyed by price, best ask first
//!
//! ## Consistency
//!
//! After every completed operation: a price key exists in a ladder iff its
//! queue is non-empty, every resting order is indexed exactly once, and
//! the running depth counters equal the sum of level totals. The matching
//! loop in [`crate::engine`] additionally restores the non-crossed
//! property `best_bid < best_ask`.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use slab::Slab;
use thiserror::Error;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{Order, Side, Trade};

/// Rejection reasons for [`OrderBook::add_order`].
///
/// The matcher and the snapshot operations cannot fail; order admission is
/// the only fallible entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookError {
    #[error("order id {0} already resting in the book")]
    DuplicateOrderId(u64),

    #[error("order quantity must be positive")]
    InvalidQuantity,

    #[error("order price must be positive")]
    InvalidPrice,
}

/// One rung of an aggregated depth snapshot: a price and the summed
/// remaining quantity of every order resting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLevel {
    pub price: u64,
    pub quantity: u64,
}

/// Derived market counters, all maintained incrementally.
///
/// `total_notional` is in price ticks (divide by
/// [`crate::types::price::SCALE`] for the display value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketSummary {
    pub total_trades: u64,
    pub total_volume: u64,
    pub total_notional: u128,
    pub bid_depth: u64,
    pub ask_depth: u64,
}

/// A single-instrument limit order book.
///
/// Holds the two price ladders, the order index, and the append-only
/// trade log. All methods are single-threaded; concurrent access goes
/// through [`crate::market::Market`].
///
/// # Example
///
/// ```
/// use matchbook::orderbook::OrderBook;
/// use matchbook::types::{Order, Side};
///
/// let mut book = OrderBook::with_capacity(1024);
///
/// book.add_order(Order::new(1, Side::Buy, 100, 9_950_000_000, "a", 0)).unwrap();
/// book.add_order(Order::new(2, Side::Sell, 100, 10_050_000_000, "b", 0)).unwrap();
///
/// assert_eq!(book.best_bid(), Some(9_950_000_000));
/// assert_eq!(book.best_ask(), Some(10_050_000_000));
/// ```
#[derive(Debug)]
pub struct OrderBook {
    /// Address-stable order storage
    orders: Slab<OrderNode>,

    /// Bid ladder, best (highest) price first
    bids: BTreeMap<Reverse<u64>, PriceLevel>,

    /// Ask ladder, best (lowest) price first
    asks: BTreeMap<u64, PriceLevel>,

    /// Order ID -> slab key, for O(1) cancel
    order_index: HashMap<u64, usize>,

    /// Append-only trade log
    trades: Vec<Trade>,

    /// Next trade ID; starts at 0
    next_trade_id: u64,

    /// Total resting quantity on the buy side
    bid_depth: u64,

    /// Total resting quantity on the sell side
    ask_depth: u64,

    /// Sum of executed trade quantities
    total_volume: u64,

    /// Sum of executed price × quantity, in price ticks
    total_notional: u128,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::new(),
            trades: Vec::new(),
            next_trade_id: 0,
            bid_depth: 0,
            ask_depth: 0,
            total_volume: 0,
            total_notional: 0,
        }
    }

    /// Create an order book with pre-allocated slots for `order_capacity`
    /// resting orders.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::with_capacity(order_capacity),
            trades: Vec::new(),
            next_trade_id: 0,
            bid_depth: 0,
            ask_depth: 0,
            total_volume: 0,
            total_notional: 0,
        }
    }

    // ========================================================================
    // Size and depth
    // ========================================================================

    /// Number of resting orders across both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of distinct bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of distinct ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Total resting quantity on the buy side
    #[inline]
    pub fn bid_depth(&self) -> u64 {
        self.bid_depth
    }

    /// Total resting quantity on the sell side
    #[inline]
    pub fn ask_depth(&self) -> u64 {
        self.ask_depth
    }

    // ========================================================================
    // Order management
    // ========================================================================

    /// Rest an order at the tail of the queue at its price.
    ///
    /// Never matches; a crossable book stays crossed until the next
    /// matching sweep. Rejects duplicate IDs and non-positive quantity or
    /// price.
    pub fn add_order(&mut self, order: Order) -> Result<(), BookError> {
        if order.quantity == 0 {
            return Err(BookError::InvalidQuantity);
        }
        if order.price == 0 {
            return Err(BookError::InvalidPrice);
        }
        if self.order_index.contains_key(&order.order_id) {
            return Err(BookError::DuplicateOrderId(order.order_id));
        }

        let order_id = order.order_id;
        let price = order.price;
        let side = order.side;
        let quantity = order.quantity;

        let key = self.orders.insert(OrderNode::new(order));
        self.order_index.insert(order_id, key);

        match side {
            Side::Buy => {
                let level = self
                    .bids
                    .entry(Reverse(price))
                    .or_insert_with(|| PriceLevel::new(price));
                level.push_back(key, &mut self.orders);
                self.bid_depth += quantity;
            }
            Side::Sell => {
                let level = self
                    .asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price));
                level.push_back(key, &mut self.orders);
                self.ask_depth += quantity;
            }
        }

        Ok(())
    }

    /// Cancel a resting order by ID.
    ///
    /// Returns the removed order, or `None` if the ID is unknown (a
    /// cancelled or fully filled order cancels as a no-op).
    pub fn cancel_order(&mut self, order_id: u64) -> Option<Order> {
        let key = *self.order_index.get(&order_id)?;
        self.remove_resting(key)
    }

    /// Check if an order is resting in the book
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// Unlink a resting order from its level, the index, and the slab.
    ///
    /// The owning ladder comes from the node itself — never from testing
    /// which ladder contains the price, which is ambiguous while the same
    /// price rests on both sides of a crossed book.
    fn remove_resting(&mut self, key: usize) -> Option<Order> {
        let node = self.orders.get(key)?;
        let order_id = node.order_id();
        let price = node.price();
        let side = node.side();
        let remaining = node.remaining();

        match side {
            Side::Buy => {
                if let Some(level) = self.bids.get_mut(&Reverse(price)) {
                    level.remove(key, &mut self.orders);
                    if level.is_empty() {
                        self.bids.remove(&Reverse(price));
                    }
                }
                self.bid_depth = self.bid_depth.saturating_sub(remaining);
            }
            Side::Sell => {
                if let Some(level) = self.asks.get_mut(&price) {
                    level.remove(key, &mut self.orders);
                    if level.is_empty() {
                        self.asks.remove(&price);
                    }
                }
                self.ask_depth = self.ask_depth.saturating_sub(remaining);
            }
        }

        self.order_index.remove(&order_id);
        Some(self.orders.remove(key).order)
    }

    /// Execute a fill of `quantity` against the resting order at `key`.
    ///
    /// Decrements the order, its level total, and the side depth; a fully
    /// filled order is unlinked from its level, the index, and the slab,
    /// and an emptied level is erased from the ladder.
    ///
    /// # Panics
    ///
    /// Panics if the key is not a live resting order, or if `quantity`
    /// exceeds its remainder. The matcher only fills
    /// `min(head_bid, head_ask)`, so either is a book-corruption bug.
    pub(crate) fn fill(&mut self, key: usize, quantity: u64) {
        let (side, price, filled) = {
            let node = self.orders.get_mut(key).expect("invalid slab key");
            let side = node.side();
            let price = node.price();
            let filled = node.order.fill(quantity);
            (side, price, filled)
        };
        assert_eq!(filled, quantity, "fill exceeds resting quantity");

        let fully_filled = self.orders[key].order.is_filled();

        match side {
            Side::Buy => {
                self.bid_depth = self.bid_depth.saturating_sub(filled);
                let level = self
                    .bids
                    .get_mut(&Reverse(price))
                    .expect("resting order without a bid level");
                level.reduce_quantity(filled);
                if fully_filled {
                    level.remove(key, &mut self.orders);
                    if level.is_empty() {
                        self.bids.remove(&Reverse(price));
                    }
                }
            }
            Side::Sell => {
                self.ask_depth = self.ask_depth.saturating_sub(filled);
                let level = self
                    .asks
                    .get_mut(&price)
                    .expect("resting order without an ask level");
                level.reduce_quantity(filled);
                if fully_filled {
                    level.remove(key, &mut self.orders);
                    if level.is_empty() {
                        self.asks.remove(&price);
                    }
                }
            }
        }

        if fully_filled {
            let node = self.orders.remove(key);
            self.order_index.remove(&node.order_id());
        }
    }

    // ========================================================================
    // Best bid/ask
    // ========================================================================

    /// Best (highest) bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Best (lowest) ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    /// The level at the best bid price
    pub fn best_bid_level(&self) -> Option<&PriceLevel> {
        self.bids.values().next()
    }

    /// The level at the best ask price
    pub fn best_ask_level(&self) -> Option<&PriceLevel> {
        self.asks.values().next()
    }

    /// Read-only access to the order storage (for the matching loop)
    #[inline]
    pub fn orders(&self) -> &Slab<OrderNode> {
        &self.orders
    }

    // ========================================================================
    // Trade log
    // ========================================================================

    /// Take the next trade ID and advance the counter
    #[inline]
    pub(crate) fn next_trade_id(&mut self) -> u64 {
        let id = self.next_trade_id;
        self.next_trade_id += 1;
        id
    }

    /// Append a trade to the log and fold it into the running counters
    pub(crate) fn record_trade(&mut self, trade: Trade) {
        self.total_volume += trade.quantity;
        self.total_notional += trade.notional_raw();
        self.trades.push(trade);
    }

    /// The trade log, in execution order
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Aggregated bid depth, best price first
    pub fn snapshot_bids(&self) -> Vec<DepthLevel> {
        self.bids
            .values()
            .map(|level| DepthLevel {
                price: level.price,
                quantity: level.total_quantity,
            })
            .collect()
    }

    /// Aggregated ask depth, best price first
    pub fn snapshot_asks(&self) -> Vec<DepthLevel> {
        self.asks
            .values()
            .map(|level| DepthLevel {
                price: level.price,
                quantity: level.total_quantity,
            })
            .collect()
    }

    /// Market counters: trade count, traded volume and notional, and the
    /// resting depth of each side
    pub fn summary(&self) -> MarketSummary {
        MarketSummary {
            total_trades: self.trades.len() as u64,
            total_volume: self.total_volume,
            total_notional: self.total_notional,
            bid_depth: self.bid_depth,
            ask_depth: self.ask_depth,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
