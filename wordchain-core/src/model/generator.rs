use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use rand::Rng;
use rand::rngs::ThreadRng;

use super::chain_model::ChainModel;
use super::token::{NONWORD, Token};
use super::window::PrefixWindow;

/// Default bound on the number of generated words.
pub const DEFAULT_MAX_WORDS: usize = 10_000;

/// One bounded random walk over a finished `ChainModel`.
///
/// The walk is a lazy sequence: words are produced one `next` at a time, so a
/// consumer may stop early without paying for the remaining steps. It is not
/// restartable; the window is consumed as the walk advances, and a new walk
/// starts over from the sentinel prefix.
///
/// # Behavior
/// Each step looks up the state for the current window, picks one follower
/// uniformly over its observations, and slides the window over the pick. The
/// walk ends when the sentinel is picked (never emitted) or after `max_words`
/// words, whichever comes first.
///
/// # Errors
/// A missing state for a walked prefix, or a state with no observations,
/// cannot happen on a model sealed by `Builder::finish`. Either one is
/// yielded as a final `Err` item rather than papered over, since continuing
/// would mask a broken table.
#[derive(Debug)]
pub struct Walk<'a, R: Rng> {
	model: &'a ChainModel,
	window: PrefixWindow,
	rng: R,
	remaining: usize,
	done: bool,
}

impl<'a> Walk<'a, ThreadRng> {
	/// Starts a walk of at most `max_words` words using the thread-local
	/// random source.
	pub fn new(model: &'a ChainModel, max_words: usize) -> Self {
		Self::with_rng(model, max_words, rand::rng())
	}
}

impl<'a, R: Rng> Walk<'a, R> {
	/// Starts a walk with a caller-supplied random source.
	///
	/// Walks with the same seed over the same model emit the same words.
	pub fn with_rng(model: &'a ChainModel, max_words: usize, rng: R) -> Self {
		let nonword: Token = Arc::from(NONWORD);
		Self {
			model,
			window: PrefixWindow::new(model.order(), nonword),
			rng,
			remaining: max_words,
			done: false,
		}
	}
}

impl<'a, R: Rng> Iterator for Walk<'a, R> {
	type Item = Result<Token, String>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done || self.remaining == 0 {
			return None;
		}

		let state = match self.model.lookup(self.window.snapshot()) {
			Some(state) => state,
			None => {
				self.done = true;
				return Some(Err(format!(
					"no state for prefix {:?}",
					self.window.snapshot()
				)));
			}
		};

		let word = match state.choose(&mut self.rng) {
			Some(word) => word.clone(),
			None => {
				self.done = true;
				return Some(Err(format!(
					"state {:?} has no observations",
					state.prefix()
				)));
			}
		};

		// Terminal pick: the walk reached "end of corpus".
		if &*word == NONWORD {
			self.done = true;
			return None;
		}

		self.remaining -= 1;
		self.window.slide(word.clone());
		Some(Ok(word))
	}
}

/// Runs `count` independent walks over a shared model, in parallel.
///
/// The model is read-only once built, so walks need no locking: each worker
/// thread holds its own window and random source and only reads the table.
/// Walks are spread over up to `num_cpus` workers and the outputs come back
/// in slot order, one word sequence per requested walk.
///
/// # Errors
/// Fails if any walk reports an internal consistency violation.
pub fn generate_many(
	model: &Arc<ChainModel>,
	count: usize,
	max_words: usize,
) -> Result<Vec<Vec<Token>>, String> {
	if count == 0 {
		return Ok(Vec::new());
	}

	let workers = num_cpus::get().max(1).min(count);
	let (tx, rx) = mpsc::channel();

	for worker in 0..workers {
		let tx = tx.clone();
		let model = Arc::clone(model);
		thread::spawn(move || {
			// Worker w handles slots w, w + workers, w + 2 * workers, ...
			let mut slot = worker;
			while slot < count {
				// The receiver is gone if an earlier walk already failed.
				let _ = tx.send((slot, model.generate(max_words)));
				slot += workers;
			}
		});
	}
	drop(tx);

	let mut outputs: Vec<Option<Vec<Token>>> = vec![None; count];
	for (slot, words) in rx.iter() {
		outputs[slot] = Some(words?);
	}
	outputs
		.into_iter()
		.map(|words| words.ok_or_else(|| "a walk produced no output".to_owned()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::builder::Builder;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn build(order: usize, words: &[&str]) -> ChainModel {
		let mut builder = Builder::new(order).unwrap();
		builder.feed_words(words);
		builder.finish()
	}

	fn words(tokens: &[Token]) -> Vec<&str> {
		tokens.iter().map(|token| &**token).collect()
	}

	#[test]
	fn single_path_corpus_is_replayed_exactly() {
		// Every state has one follower, so randomness is irrelevant.
		let model = build(2, &["the", "cat", "sat"]);
		for _ in 0..20 {
			let output = model.generate(10).unwrap();
			assert_eq!(words(&output), ["the", "cat", "sat"]);
		}
	}

	#[test]
	fn repeated_words_walk_through_their_own_states() {
		let model = build(2, &["a", "a", "b"]);
		let output = model.generate(10).unwrap();
		assert_eq!(words(&output), ["a", "a", "b"]);
	}

	#[test]
	fn zero_max_words_yields_nothing() {
		let model = build(2, &["the", "cat", "sat"]);
		assert!(model.generate(0).unwrap().is_empty());
	}

	#[test]
	fn empty_corpus_terminates_immediately() {
		let model = build(2, &[]);
		assert!(model.generate(10_000).unwrap().is_empty());
	}

	#[test]
	fn max_words_truncates_the_walk() {
		let model = build(2, &["the", "cat", "sat"]);
		let output = model.generate(2).unwrap();
		assert_eq!(words(&output), ["the", "cat"]);
	}

	#[test]
	fn sentinel_is_never_emitted_and_bound_is_honored() {
		// A branching corpus that can loop for a while before ending.
		let corpus = ["a", "b", "a", "c", "a", "b", "c", "a", "b", "b", "a"];
		let model = build(2, &corpus);
		for seed in 0..50 {
			let output = model
				.generate_with(25, StdRng::seed_from_u64(seed))
				.unwrap();
			assert!(output.len() <= 25);
			assert!(output.iter().all(|word| &**word != NONWORD));
		}
	}

	#[test]
	fn same_seed_same_output() {
		// [the, cat] branches to sat/ran, so the seed actually matters.
		let corpus = [
			"the", "cat", "sat", "the", "cat", "ran", "the", "cat", "sat", "on", "the", "mat",
		];
		let first = build(2, &corpus);
		let second = build(2, &corpus);
		for seed in 0..20 {
			let a = first
				.generate_with(100, StdRng::seed_from_u64(seed))
				.unwrap();
			let b = second
				.generate_with(100, StdRng::seed_from_u64(seed))
				.unwrap();
			assert_eq!(a, b);
		}
	}

	#[test]
	fn walk_can_be_abandoned_early() {
		let corpus = ["x", "y", "x", "z", "x", "y", "z"];
		let model = build(1, &corpus);
		let output: Vec<_> = model.walk(1_000).take(3).collect::<Result<_, _>>().unwrap();
		assert!(output.len() <= 3);
	}

	#[test]
	fn generate_many_returns_one_sequence_per_slot() {
		let model = Arc::new(build(2, &["the", "cat", "sat"]));
		let outputs = generate_many(&model, 8, 10).unwrap();
		assert_eq!(outputs.len(), 8);
		for output in outputs {
			assert_eq!(words(&output), ["the", "cat", "sat"]);
		}
	}

	#[test]
	fn generate_many_with_zero_walks_is_empty() {
		let model = Arc::new(build(2, &["solo"]));
		assert!(generate_many(&model, 0, 10).unwrap().is_empty());
	}
}
