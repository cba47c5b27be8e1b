use std::collections::HashSet;
use std::sync::Arc;

/// An interned, immutable word.
///
/// Tokens are shared references into the interning arena: cloning one bumps a
/// reference count instead of copying text, and equality/hashing delegate to
/// the underlying string. They are created once during learning and never
/// mutated afterwards.
pub type Token = Arc<str>;

/// Marker for corpus boundaries.
///
/// A whitespace-delimited word can never contain a newline, so this value
/// cannot collide with real input. It seeds the initial prefix window and is
/// appended once after the last real word so that every walk can terminate.
pub const NONWORD: &str = "\n";

/// Arena interning every distinct word of a corpus exactly once.
///
/// # Responsibilities
/// - Own the canonical storage for each distinct word
/// - Hand out shared `Token` references to that storage
///
/// # Invariants
/// - Interning the same text twice returns tokens backed by the same allocation
/// - Stored text is never mutated or removed
#[derive(Debug, Default)]
pub struct Interner {
	words: HashSet<Token>,
}

impl Interner {
	/// Creates an empty arena.
	pub fn new() -> Self {
		Self { words: HashSet::new() }
	}

	/// Returns the canonical token for `word`, allocating it on first sight.
	pub fn intern(&mut self, word: &str) -> Token {
		if let Some(token) = self.words.get(word) {
			return token.clone();
		}
		let token: Token = Arc::from(word);
		self.words.insert(token.clone());
		token
	}

	/// Number of distinct words interned so far.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn interning_twice_shares_storage() {
		let mut interner = Interner::new();
		let first = interner.intern("mot");
		let second = interner.intern("mot");
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(interner.len(), 1);
	}

	#[test]
	fn distinct_words_are_distinct_tokens() {
		let mut interner = Interner::new();
		let a = interner.intern("a");
		let b = interner.intern("b");
		assert!(!Arc::ptr_eq(&a, &b));
		assert_eq!(interner.len(), 2);
	}

	#[test]
	fn nonword_is_not_a_real_word() {
		// split_whitespace can never yield a token containing '\n'
		assert!("one two\nthree"
			.split_whitespace()
			.all(|word| word != NONWORD));
	}
}
