use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::state::State;
use crate::error::{MarkovError, Result};

/// Character-level Markov model of order `k`.
///
/// The `MarkovModel` stores, for every k-character context (k-gram) seen in
/// the training text, how often each character followed it. The text is
/// treated as circular: its first `k` characters are appended to its end so
/// that every position, including the last ones, has a successor.
///
/// # Responsibilities
/// - Build the frequency table once from an immutable text
/// - Answer frequency queries for k-grams and (k-gram, character) pairs
/// - Draw weighted random successors and generate text from them
/// - Repair corrupted strings (see `replace_unknown`)
///
/// # Invariants
/// - `k` is always >= 1 and never changes
/// - Each key in `states` is exactly `k` characters long
/// - All state transitions have occurrence counts >= 1
/// - The table is never mutated after construction
#[derive(Clone, Debug)]
pub struct MarkovModel {
	/// The order of the model (number of characters in a context)
	k: usize,

	/// Mapping from a k-gram to its corresponding state
	states: HashMap<String, State>,
}

impl MarkovModel {
	/// Creates a Markov model of order `k` from the given text.
	///
	/// Scans `text + text[..k]` once; for every position `i` of the original
	/// text, the pair (`circ[i..i + k]`, `circ[i + k]`) adds one occurrence.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `k == 0`, if the text is empty or if
	/// `k` is larger than the number of characters in the text.
	pub fn new(text: &str, k: usize) -> Result<Self> {
		if k == 0 {
			return Err(MarkovError::InvalidArgument("order k must be >= 1".to_owned()));
		}

		let chars: Vec<char> = text.chars().collect();
		if chars.is_empty() {
			return Err(MarkovError::InvalidArgument("training text is empty".to_owned()));
		}
		if k > chars.len() {
			return Err(MarkovError::InvalidArgument(format!(
				"order {} is larger than the training text ({} characters)",
				k,
				chars.len()
			)));
		}

		let circular: Vec<char> = chars.iter().chain(&chars[..k]).copied().collect();

		let mut states: HashMap<String, State> = HashMap::new();
		for i in 0..chars.len() {
			let key: String = circular[i..i + k].iter().collect();
			let next_char = circular[i + k];
			states
				.entry(key)
				.or_insert_with_key(|key| State::new(key))
				.add_transition(next_char);
		}

		debug!(
			"Built order-{} model from {} characters ({} contexts)",
			k,
			chars.len(),
			states.len()
		);

		Ok(Self { k, states })
	}

	/// Returns the order `k` of this model.
	pub fn order(&self) -> usize {
		self.k
	}

	/// Number of distinct contexts observed during training.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Always `false` for a successfully built model.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Returns whether `kgram` was observed as a context.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `kgram` is not of length `k`.
	pub fn contains(&self, kgram: &str) -> Result<bool> {
		self.check_kgram(kgram)?;
		Ok(self.states.contains_key(kgram))
	}

	/// Returns the number of occurrences of `kgram` in the training text,
	/// or 0 if it never occurred.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `kgram` is not of length `k`.
	pub fn kgram_freq(&self, kgram: &str) -> Result<usize> {
		self.check_kgram(kgram)?;
		Ok(self.states.get(kgram).map_or(0, State::total))
	}

	/// Returns the number of times `c` followed `kgram` in the training text,
	/// or 0 if `kgram` never occurred or was never followed by `c`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `kgram` is not of length `k`.
	pub fn char_freq(&self, kgram: &str, c: char) -> Result<usize> {
		self.check_kgram(kgram)?;
		Ok(self.states.get(kgram).map_or(0, |state| state.count(c)))
	}

	/// Draws a character following `kgram`, each candidate weighted by its
	/// count over `kgram_freq(kgram)`.
	///
	/// # Errors
	/// - `InvalidArgument` if `kgram` is not of length `k`
	/// - `UnknownKgram` if `kgram` was never observed
	pub fn rand<R: Rng + ?Sized>(&self, kgram: &str, rng: &mut R) -> Result<char> {
		self.check_kgram(kgram)?;
		self.states
			.get(kgram)
			.and_then(|state| state.predict(rng))
			.ok_or_else(|| MarkovError::UnknownKgram(kgram.to_owned()))
	}

	/// Generates a string of `n` characters whose first `k` characters are
	/// `kgram`.
	///
	/// Each further character is drawn with `rand` from the last `k`
	/// characters generated so far.
	///
	/// # Errors
	/// - `InvalidArgument` if `kgram` is not of length `k` or `n < k`
	/// - `UnknownKgram` if a context reached during generation was never
	///   observed; no partial text is returned
	pub fn generate<R: Rng + ?Sized>(&self, kgram: &str, n: usize, rng: &mut R) -> Result<String> {
		self.check_kgram(kgram)?;
		if n < self.k {
			return Err(MarkovError::InvalidArgument(format!(
				"length {} is shorter than the order {}",
				n, self.k
			)));
		}

		let mut text: Vec<char> = Vec::with_capacity(n);
		text.extend(kgram.chars());
		while text.len() < n {
			let context: String = text[text.len() - self.k..].iter().collect();
			let next_char = self.rand(&context, rng)?;
			text.push(next_char);
		}

		Ok(text.into_iter().collect())
	}

	/// Looks up the state of an already length-checked context.
	pub(crate) fn state(&self, kgram: &str) -> Option<&State> {
		self.states.get(kgram)
	}

	fn check_kgram(&self, kgram: &str) -> Result<()> {
		let len = kgram.chars().count();
		if len != self.k {
			return Err(MarkovError::InvalidArgument(format!(
				"kgram '{}' has length {}, expected {}",
				kgram, len, self.k
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn rejects_zero_order() {
		assert!(matches!(MarkovModel::new("abc", 0), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn rejects_empty_text() {
		assert!(matches!(MarkovModel::new("", 1), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn rejects_order_longer_than_text() {
		assert!(matches!(MarkovModel::new("ab", 3), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn order_equal_to_text_length_uses_rotations() {
		let model = MarkovModel::new("abc", 3).unwrap();
		assert_eq!(model.len(), 3);
		assert_eq!(model.char_freq("abc", 'a').unwrap(), 1);
		assert_eq!(model.char_freq("bca", 'b').unwrap(), 1);
		assert_eq!(model.char_freq("cab", 'c').unwrap(), 1);
	}

	#[test]
	fn lengths_are_counted_in_characters() {
		let model = MarkovModel::new("héhé", 2).unwrap();
		assert_eq!(model.kgram_freq("hé").unwrap(), 2);
		assert_eq!(model.char_freq("éh", 'é').unwrap(), 2);
	}

	#[test]
	fn generate_with_order_length_returns_seed() {
		let model = MarkovModel::new("abcabc", 3).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(model.generate("bca", 3, &mut rng).unwrap(), "bca");
	}

	#[test]
	fn generate_rejects_length_below_order() {
		let model = MarkovModel::new("abcabc", 3).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert!(matches!(model.generate("abc", 2, &mut rng), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn contains_checks_length() {
		let model = MarkovModel::new("abcabc", 2).unwrap();
		assert!(model.contains("ab").unwrap());
		assert!(!model.contains("ac").unwrap());
		assert!(model.contains("a").is_err());
	}
}
