use std::collections::HashMap;

/// Maps every word of a text to the positions where it occurs.
///
/// Positions are 0-based word indices, stored in ascending order.
#[derive(Debug, Default)]
pub struct WordIndex {
	occurrences: HashMap<String, Vec<usize>>,
}

impl WordIndex {
	/// Builds the index from already split words.
	pub fn new<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut occurrences: HashMap<String, Vec<usize>> = HashMap::new();
		for (i, word) in words.into_iter().enumerate() {
			occurrences.entry(word.into()).or_default().push(i);
		}
		Self { occurrences }
	}

	/// Builds the index from a text split on whitespace.
	pub fn from_text(text: &str) -> Self {
		Self::new(text.split_whitespace())
	}

	/// Returns the positions of `word`, or `None` if it never occurs.
	pub fn positions(&self, word: &str) -> Option<&[usize]> {
		self.occurrences.get(word).map(Vec::as_slice)
	}

	/// Number of distinct words.
	pub fn len(&self) -> usize {
		self.occurrences.len()
	}

	/// Returns `true` if the text held no words.
	pub fn is_empty(&self) -> bool {
		self.occurrences.is_empty()
	}

	/// Formats a lookup as `word -> [i, j]` or `Word not found`.
	pub fn lookup(&self, word: &str) -> String {
		match self.positions(word) {
			Some(positions) => {
				let positions: Vec<String> = positions.iter().map(usize::to_string).collect();
				format!("{} -> [{}]", word, positions.join(", "))
			}
			None => "Word not found".to_owned(),
		}
	}
}
