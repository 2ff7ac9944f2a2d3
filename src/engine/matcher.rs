//! The crossing loop.
//!
//! ## Algorithm
//!
//! While both ladders are non-empty and `best_bid >= best_ask`, the FIFO
//! head of the best bid level trades against the FIFO head of the best
//! ask level for `min` of their remaining quantities. Execution is at the
//! ask side's limit price, stamped with the buy order's timestamp. Fully
//! filled orders leave the book; emptied levels leave their ladder.
//!
//! Each iteration drives at least one resting order to zero or reduces
//! total resting quantity, so the loop always terminates, leaving
//! `best_bid < best_ask` (or one side empty).
//!
//! Priority within a level is FIFO insertion order — timestamps are
//! carried, not compared. Orders from the same client may trade against
//! each other; self-trade screening belongs to the callers.

use crate::orderbook::OrderBook;
use crate::types::Trade;

/// Executes matching sweeps against an [`OrderBook`].
///
/// The engine holds no book state of its own: trade IDs and the trade log
/// belong to the book, so a sweep is a pure state transformation that
/// cannot fail.
///
/// # Example
///
/// ```
/// use matchbook::engine::MatchingEngine;
/// use matchbook::orderbook::OrderBook;
/// use matchbook::types::{Order, Side};
///
/// let mut book = OrderBook::new();
/// let mut engine = MatchingEngine::new();
///
/// book.add_order(Order::new(1, Side::Buy, 10, 10_000_000_000, "a", 0)).unwrap();
/// book.add_order(Order::new(2, Side::Sell, 10, 10_000_000_000, "b", 0)).unwrap();
///
/// let trades = engine.match_orders(&mut book);
/// assert_eq!(trades.len(), 1);
/// assert!(book.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MatchingEngine;

impl MatchingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run the book to quiescence.
    ///
    /// Every trade is appended to the book's log; the same trades are
    /// returned by value so the caller can notify listeners after the
    /// book lock is released.
    pub fn match_orders(&mut self, book: &mut OrderBook) -> Vec<Trade> {
        let mut executed = Vec::new();

        loop {
            let (bid_price, ask_price) = match (book.best_bid(), book.best_ask()) {
                (Some(bid), Some(ask)) => (bid, ask),
                _ => break,
            };
            if bid_price < ask_price {
                break;
            }

            // Heads exist: a ladder never holds an empty level.
            let buy_key = book
                .best_bid_level()
                .and_then(|level| level.peek_head())
                .expect("non-empty bid level");
            let sell_key = book
                .best_ask_level()
                .and_then(|level| level.peek_head())
                .expect("non-empty ask level");

            let (buy_id, buy_timestamp, buy_remaining) = {
                let order = &book.orders()[buy_key].order;
                (order.order_id, order.timestamp, order.quantity)
            };
            let (sell_id, sell_remaining) = {
                let order = &book.orders()[sell_key].order;
                (order.order_id, order.quantity)
            };

            let quantity = buy_remaining.min(sell_remaining);

            // Execution at the ask price; stamped with the buy order's
            // timestamp. The matcher never reads the clock, so replaying
            // an order sequence reproduces the trade log exactly.
            let trade = Trade::new(
                book.next_trade_id(),
                buy_id,
                sell_id,
                quantity,
                ask_price,
                buy_timestamp,
            );
            book.record_trade(trade.clone());

            book.fill(buy_key, quantity);
            book.fill(sell_key, quantity);

            executed.push(trade);
        }

        executed
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
