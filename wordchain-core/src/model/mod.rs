//! Top-level module for the word-chain generation system.
//!
//! This crate learns an order-K Markov chain over words and samples random
//! text from it, including:
//! - Interned word storage (`Token`, `Interner`)
//! - The learned state table (`ChainModel`, `State`)
//! - Corpus ingestion (`Builder`)
//! - Lazy and parallel random walks (`Walk`, `generate_many`)

/// Corpus ingestion: feeds words through the sliding prefix window into the
/// state table, and seals the model with the terminal sentinel.
pub mod builder;

/// The state table: one `State` per distinct K-word prefix tuple.
///
/// Built once by the `Builder`, read-only afterwards.
pub mod chain_model;

/// Random walks over a finished model.
///
/// Exposes the lazy `Walk` iterator and a multi-walk fan-out over worker
/// threads for producing several outputs from one shared model.
pub mod generator;

/// Interned word storage and the corpus-boundary sentinel.
pub mod token;

/// Internal representation of a single chain state (prefix plus observed
/// followers, with uniform reservoir selection).
/// This module is not exposed publicly.
mod state;

/// Internal sliding window of the last K tokens seen.
/// This module is not exposed publicly.
mod window;
