use rand::Rng;

use super::token::Token;

/// Represents a state in the word chain.
///
/// A `State` corresponds to a fixed K-word prefix tuple and stores every word
/// ever observed to follow that exact prefix, duplicates included.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges are
/// weighted by their number of observations: a word that followed the prefix
/// three times appears three times in `successors`.
///
/// ## Responsibilities
/// - Accumulate follower observations during learning
/// - Pick the next word by uniform sampling over the observations
///
/// ## Invariants
/// - `prefix` never changes after creation
/// - `successors` only grows, and only during the build phase
/// - Every finished state has at least one successor
#[derive(Debug, Clone)]
pub struct State {
	/// The K-token prefix this state was created for.
	prefix: Box<[Token]>,
	/// Unordered multiset of observed followers.
	/// Example: ["sat", "ran", "sat"] gives "sat" weight 2 and "ran" weight 1.
	successors: Vec<Token>,
}

impl State {
	/// Creates a new state for the given prefix, with no observations yet.
	pub fn new(prefix: Box<[Token]>) -> Self {
		Self {
			prefix,
			successors: Vec::new(),
		}
	}

	/// Records one observation of `word` following this prefix.
	///
	/// Appending the same word again is meaningful: duplicates encode the
	/// frequency weighting used at generation time.
	pub fn add_successor(&mut self, word: Token) {
		self.successors.push(word);
	}

	/// The prefix tuple this state belongs to.
	pub fn prefix(&self) -> &[Token] {
		&self.prefix
	}

	/// The observed followers, duplicates included.
	pub fn successors(&self) -> &[Token] {
		&self.successors
	}

	/// Picks one follower uniformly at random over all observations.
	///
	/// Single-pass reservoir selection: the i-th entry (1-indexed) replaces
	/// the tentative choice with probability 1/i, which after one pass leaves
	/// every entry equally likely. Duplicate entries therefore win in
	/// proportion to their observation count, with no second pass and no
	/// random access into the list.
	///
	/// Returns `None` if the state has no observations.
	pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&Token> {
		let mut chosen = None;
		for (seen, word) in self.successors.iter().enumerate() {
			if rng.random_range(0..=seen) == 0 {
				chosen = Some(word);
			}
		}
		chosen
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::sync::Arc;

	fn tok(word: &str) -> Token {
		Arc::from(word)
	}

	fn state(prefix: &[&str]) -> State {
		State::new(prefix.iter().map(|word| tok(word)).collect())
	}

	#[test]
	fn duplicates_are_kept() {
		let mut state = state(&["the", "cat"]);
		state.add_successor(tok("sat"));
		state.add_successor(tok("sat"));
		state.add_successor(tok("ran"));
		assert_eq!(state.successors(), &[tok("sat"), tok("sat"), tok("ran")]);
	}

	#[test]
	fn choose_on_empty_state_is_none() {
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(state(&["a", "b"]).choose(&mut rng), None);
	}

	#[test]
	fn single_successor_is_always_chosen() {
		let mut state = state(&["a", "b"]);
		state.add_successor(tok("c"));
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..100 {
			assert_eq!(state.choose(&mut rng), Some(&tok("c")));
		}
	}

	#[test]
	fn choose_follows_observation_frequencies() {
		// "sat" observed 3 times out of 4: expect it ~75% of the time
		let mut state = state(&["the", "cat"]);
		state.add_successor(tok("sat"));
		state.add_successor(tok("sat"));
		state.add_successor(tok("sat"));
		state.add_successor(tok("ran"));

		let mut rng = StdRng::seed_from_u64(42);
		let draws = 10_000;
		let mut sat = 0;
		for _ in 0..draws {
			if state.choose(&mut rng) == Some(&tok("sat")) {
				sat += 1;
			}
		}

		let observed = sat as f64 / draws as f64;
		assert!(
			(observed - 0.75).abs() < 0.02,
			"expected ~0.75, observed {observed}"
		);
	}
}
