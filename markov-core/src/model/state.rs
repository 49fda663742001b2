use rand::Rng;

/// Represents one context of a Markov model.
///
/// A `State` corresponds to a fixed k-character prefix (`key`) and stores
/// all observed transitions from this prefix to the next character.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
/// - Transitions keep the order in which they were first observed, so a
///   seeded random source always draws the same character for the same text
#[derive(Clone, Debug)]
pub(crate) struct State {
	/// Identifier of the state (k character prefix).
	key: String,
	/// Outgoing transitions in first-observed order.
	/// Example: [('e', 42), ('a', 3)]
	transitions: Vec<(char, usize)>,
	/// Sum of all transition occurrences.
	total: usize,
}

impl State {
	/// Creates a new empty state for the given prefix.
	pub(crate) fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: Vec::new(),
			total: 0,
		}
	}

	/// Records an occurrence of a transition toward `next_char`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is appended with an initial count of 1.
	pub(crate) fn add_transition(&mut self, next_char: char) {
		match self.transitions.iter_mut().find(|(c, _)| *c == next_char) {
			Some((_, occurrence)) => *occurrence += 1,
			None => self.transitions.push((next_char, 1)),
		}
		self.total += 1;
	}

	pub(crate) fn key(&self) -> &str {
		&self.key
	}

	/// Number of times the prefix was observed.
	pub(crate) fn total(&self) -> usize {
		self.total
	}

	/// Number of times `next_char` followed the prefix, 0 if never.
	pub(crate) fn count(&self, next_char: char) -> usize {
		self.transitions
			.iter()
			.find(|(c, _)| *c == next_char)
			.map_or(0, |(_, occurrence)| *occurrence)
	}

	/// Observed successors, in first-observed order.
	pub(crate) fn candidates(&self) -> impl Iterator<Item = char> + '_ {
		self.transitions.iter().map(|(c, _)| *c)
	}

	/// Conditional probability of `next_char` given the prefix.
	pub(crate) fn probability(&self, next_char: char) -> f64 {
		if self.total == 0 {
			return 0.0;
		}
		self.count(next_char) as f64 / self.total as f64
	}

	/// Predicts the next character using weighted random sampling.
	///
	/// The probability of selecting a character is proportional to its
	/// occurrence count. A single draw in `0..total` is walked down the
	/// transitions by cumulative subtraction.
	///
	/// Returns `None` if the state has no transitions.
	pub(crate) fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
		if self.total == 0 {
			return None;
		}
		debug_assert_eq!(
			self.total,
			self.transitions.iter().map(|(_, occurrence)| occurrence).sum::<usize>()
		);

		// Randomly select a character
		let mut r = rng.random_range(0..self.total);

		let mut fallback: Option<char> = None;
		for (next_char, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(*next_char);
			}
			r -= occurrence;
			fallback = Some(*next_char);
		}

		// Only reached if `total` drifted from the transitions
		fallback
	}
}
