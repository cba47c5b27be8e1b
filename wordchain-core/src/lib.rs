//! Markov-chain word generation library.
//!
//! This crate provides an order-K word-chain generation system including:
//! - Corpus learning over whitespace-delimited words
//! - Interned token storage shared by the whole table
//! - Uniform single-pass successor sampling
//! - Lazy, bounded, seedable generation walks
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core chain model and generation logic.
///
/// This module exposes the builder, the model, and the walk interface while
/// keeping internal state representations private.
pub mod model;

/// I/O utilities (corpus reading, data-directory listing).
///
/// Thin collaborators of the core, used by the binaries.
pub mod io;
