use std::collections::HashMap;

use rand::Rng;
use rand::rngs::ThreadRng;

use super::generator::Walk;
use super::state::State;
use super::token::Token;

/// Represents an order-K Markov chain over words.
///
/// The `ChainModel` stores one `State` per distinct K-word prefix tuple
/// observed in a corpus, and is the table a generation walk reads.
///
/// # Responsibilities
/// - Map each prefix tuple to its unique state
/// - Create states lazily, on first observation of their prefix
/// - Serve read-only lookups during generation
///
/// # Invariants
/// - `order` is always >= 1 and never changes
/// - At most one state exists per distinct prefix tuple
/// - States are only added and appended to while a `Builder` owns the model;
///   afterwards the table is read-only and safe to share across walks
#[derive(Debug, Clone)]
pub struct ChainModel {
	/// Number of words in a prefix tuple.
	order: usize,

	/// Mapping from a prefix tuple to its corresponding state.
	/// Token equality and hashing delegate to the underlying strings, so two
	/// tuples collide exactly when all K words compare equal.
	states: HashMap<Box<[Token]>, State>,
}

impl ChainModel {
	/// Creates an empty model of the given order.
	///
	/// Only the `Builder` constructs models; a model obtained from
	/// `Builder::finish` always contains the all-sentinel entry point.
	pub(crate) fn new(order: usize) -> Self {
		Self { order, states: HashMap::new() }
	}

	/// Number of words in a prefix tuple.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct prefixes observed.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Iterates the learned prefixes and their observed followers.
	pub fn states(&self) -> impl Iterator<Item = (&[Token], &[Token])> {
		self.states
			.values()
			.map(|state| (state.prefix(), state.successors()))
	}

	/// Returns the state for an equal prefix tuple, if one was observed.
	pub(crate) fn lookup(&self, prefix: &[Token]) -> Option<&State> {
		self.states.get(prefix)
	}

	/// Returns the state for the prefix tuple, creating it on first sight.
	///
	/// Never creates a second state for a tuple that compares equal to an
	/// existing one.
	pub(crate) fn lookup_or_create(&mut self, prefix: &[Token]) -> &mut State {
		self.states
			.entry(Box::from(prefix))
			.or_insert_with_key(|key| State::new(key.clone()))
	}

	/// Starts a lazy generation walk of at most `max_words` words.
	///
	/// Each walk consumes its own fresh sentinel-seeded window; the model
	/// itself is only read, so any number of walks may run over it.
	pub fn walk(&self, max_words: usize) -> Walk<'_, ThreadRng> {
		Walk::new(self, max_words)
	}

	/// Same as `walk`, with a caller-supplied random source.
	///
	/// A seeded generator makes the walk reproducible.
	pub fn walk_with<R: Rng>(&self, max_words: usize, rng: R) -> Walk<'_, R> {
		Walk::with_rng(self, max_words, rng)
	}

	/// Generates at most `max_words` words, eagerly collected.
	///
	/// # Errors
	/// Fails only on an internal consistency violation (a walked prefix with
	/// no state, or a state with no observations), which a model built by
	/// `Builder` cannot produce.
	pub fn generate(&self, max_words: usize) -> Result<Vec<Token>, String> {
		self.walk(max_words).collect()
	}

	/// Same as `generate`, with a caller-supplied random source.
	pub fn generate_with<R: Rng>(&self, max_words: usize, rng: R) -> Result<Vec<Token>, String> {
		self.walk_with(max_words, rng).collect()
	}
}
