use log::debug;

use super::chain_model::ChainModel;
use super::token::{Interner, NONWORD, Token};
use super::window::PrefixWindow;

/// Default number of prefix words.
pub const DEFAULT_ORDER: usize = 2;

/// Learns a `ChainModel` from a corpus, one word at a time.
///
/// # Responsibilities
/// - Intern each incoming word
/// - Record it as a follower of the current prefix window, then slide
/// - Seal the model with a terminal sentinel observation
///
/// # Behavior
/// The window starts as `order` sentinels, so the first real word is learned
/// as the follower of "beginning of corpus". `finish` feeds the sentinel once
/// as if it were the next word, which guarantees the last observed prefix has
/// a stopping follower. A model is only obtainable through `finish`; there is
/// no way back from generating to building.
///
/// # Notes
/// - Words are taken as-is: no case folding, no punctuation handling.
///   Splitting the corpus on whitespace is the caller's concern.
/// - An empty corpus is valid: the finished model holds exactly one state,
///   the all-sentinel prefix with a single sentinel follower.
#[derive(Debug)]
pub struct Builder {
	model: ChainModel,
	window: PrefixWindow,
	interner: Interner,
	nonword: Token,
	fed: usize,
}

impl Builder {
	/// Creates a builder for an order-`order` chain.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn new(order: usize) -> Result<Self, String> {
		if order == 0 {
			return Err("order must be >= 1".to_owned());
		}
		let mut interner = Interner::new();
		let nonword = interner.intern(NONWORD);
		Ok(Self {
			model: ChainModel::new(order),
			window: PrefixWindow::new(order, nonword.clone()),
			interner,
			nonword,
			fed: 0,
		})
	}

	/// Learns one word: the current window gains it as a follower, then the
	/// window slides over it.
	pub fn feed(&mut self, word: &str) {
		let token = self.interner.intern(word);
		self.observe(token);
		self.fed += 1;
	}

	/// Learns a whole sequence of words, in order.
	pub fn feed_words<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			self.feed(word.as_ref());
		}
	}

	/// Seals the model with the terminal sentinel observation and returns it.
	pub fn finish(mut self) -> ChainModel {
		let nonword = self.nonword.clone();
		self.observe(nonword);
		debug!(
			"learned {} states from {} words ({} distinct)",
			self.model.len(),
			self.fed,
			self.interner.len()
		);
		self.model
	}

	fn observe(&mut self, token: Token) {
		let state = self.model.lookup_or_create(self.window.snapshot());
		state.add_successor(token.clone());
		self.window.slide(token);
	}
}
