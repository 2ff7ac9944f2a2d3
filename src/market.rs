//! Thread-safe market façade over the order book.
//!
//! ## Concurrency Model
//!
//! One mutex serializes every mutation and every snapshot. The critical
//! sections are bounded — no I/O, no callbacks, no waiting on anything
//! but the lock itself — so a plain [`std::sync::Mutex`] is the whole
//! discipline: mutations are totally ordered by lock acquisition, and a
//! reader that acquires after a mutation observes it and everything
//! before it. Trade IDs therefore equal commit order.
//!
//! Snapshots are copied out. No reference or handle into the book's
//! internals ever leaves this module.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::MatchingEngine;
use crate::orderbook::{BookError, DepthLevel, MarketSummary, OrderBook};
use crate::types::{Order, Trade};

#[derive(Debug)]
struct State {
    book: OrderBook,
    engine: MatchingEngine,
}

/// Cloneable handle to a single-instrument market.
///
/// Clones share the same book; this is the type request handlers and
/// broadcast tasks hold.
///
/// # Example
///
/// ```
/// use matchbook::market::Market;
/// use matchbook::types::{Order, Side};
///
/// let market = Market::new();
///
/// market.add_order(Order::new(1, Side::Buy, 10, 10_000_000_000, "a", 0)).unwrap();
/// market.add_order(Order::new(2, Side::Sell, 10, 10_000_000_000, "b", 1)).unwrap();
///
/// let trades = market.match_orders();
/// assert_eq!(trades.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Market {
    inner: Arc<Mutex<State>>,
}

impl Default for Market {
    fn default() -> Self {
        Self::new()
    }
}

impl Market {
    pub fn new() -> Self {
        Self::from_book(OrderBook::new())
    }

    /// Create a market whose book pre-allocates `order_capacity` slots.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::from_book(OrderBook::with_capacity(order_capacity))
    }

    fn from_book(book: OrderBook) -> Self {
        Self {
            inner: Arc::new(Mutex::new(State {
                book,
                engine: MatchingEngine::new(),
            })),
        }
    }

    /// A poisoned lock means a panic mid-mutation, i.e. a broken book;
    /// propagating the panic is the only sound option.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.lock().expect("order book lock poisoned")
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Rest an order on the book without matching.
    ///
    /// The book may be crossed afterwards, until the next
    /// [`match_orders`](Self::match_orders) call.
    pub fn add_order(&self, order: Order) -> Result<(), BookError> {
        self.lock().book.add_order(order)
    }

    /// Cancel a resting order. Unknown IDs are a silent no-op; the return
    /// value reports whether anything was removed.
    pub fn cancel_order(&self, order_id: u64) -> bool {
        self.lock().book.cancel_order(order_id).is_some()
    }

    /// Run the matching loop to quiescence.
    ///
    /// Returns the trades this sweep produced (they are also appended to
    /// the trade log). Broadcasting them to listeners is the caller's
    /// business, after this call returns.
    pub fn match_orders(&self) -> Vec<Trade> {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.engine.match_orders(&mut state.book)
    }

    /// Add an order and immediately match, under a single lock
    /// acquisition — no reader can observe the transiently crossed book
    /// in between.
    pub fn submit_order(&self, order: Order) -> Result<Vec<Trade>, BookError> {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.book.add_order(order)?;
        Ok(state.engine.match_orders(&mut state.book))
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Aggregated bid depth, best price first
    pub fn snapshot_bids(&self) -> Vec<DepthLevel> {
        self.lock().book.snapshot_bids()
    }

    /// Aggregated ask depth, best price first
    pub fn snapshot_asks(&self) -> Vec<DepthLevel> {
        self.lock().book.snapshot_asks()
    }

    /// The trade log, in execution order
    pub fn snapshot_trades(&self) -> Vec<Trade> {
        self.lock().book.trades().to_vec()
    }

    /// Market counters (trades, volume, notional, per-side depth)
    pub fn market_summary(&self) -> MarketSummary {
        self.lock().book.summary()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
