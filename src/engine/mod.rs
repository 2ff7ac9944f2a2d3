//! Matching engine.
//!
//! ## Matching Rules
//!
//! - A sweep repeatedly pairs the best bid with the best ask while they
//!   cross (`best_bid >= best_ask`)
//! - Execution price is the ask side's limit price
//! - Partial fills rest their remainder on the book
//! - Priority is price first, then FIFO arrival at the price

pub mod matcher;

pub use matcher::MatchingEngine;
