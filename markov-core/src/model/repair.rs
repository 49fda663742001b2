use std::iter;

use log::trace;

use super::markov_model::MarkovModel;
use crate::error::{MarkovError, Result};

/// Default marker for an unknown character in a corrupted string.
pub const UNKNOWN_CHAR: char = '~';

impl MarkovModel {
	/// Replaces every `~` in `corrupted` with its most probable character.
	///
	/// See `replace_marked`.
	pub fn replace_unknown(&self, corrupted: &str) -> Result<String> {
		self.replace_marked(corrupted, UNKNOWN_CHAR)
	}

	/// Replaces every `marker` in `corrupted` with the character that makes
	/// its surrounding context most probable under this model.
	///
	/// For a marker at position `i`, the candidates are the characters seen
	/// after `corrupted[i - k..i]`. Each candidate `v` is scored by the
	/// product of the transition probabilities of the `k + 1` windows of
	/// `before + v + after`, where `after` is `corrupted[i + 1..=i + k]`.
	/// The first candidate reaching the highest score wins, which also
	/// settles the case where every candidate scores 0.
	///
	/// Contexts are always read from `corrupted` itself, never from
	/// characters repaired earlier in the same call.
	///
	/// # Errors
	/// - `InvalidArgument` if a marker has fewer than `k` characters on
	///   either side, or another marker within `k` characters. All markers
	///   are checked before any is repaired.
	/// - `UnknownKgram` if the `k` characters before a marker were never
	///   observed as a context.
	pub fn replace_marked(&self, corrupted: &str, marker: char) -> Result<String> {
		let chars: Vec<char> = corrupted.chars().collect();
		let k = self.order();

		let positions: Vec<usize> = chars
			.iter()
			.enumerate()
			.filter(|(_, c)| **c == marker)
			.map(|(i, _)| i)
			.collect();

		for &i in &positions {
			check_context(&chars, i, k, marker)?;
		}

		let mut repaired = chars.clone();
		for &i in &positions {
			repaired[i] = self.most_probable(&chars[i - k..i], &chars[i + 1..=i + k])?;
		}

		Ok(repaired.into_iter().collect())
	}

	/// Picks the best candidate between `before` and `after`.
	fn most_probable(&self, before: &[char], after: &[char]) -> Result<char> {
		let key: String = before.iter().collect();
		let state = self
			.state(&key)
			.ok_or_else(|| MarkovError::UnknownKgram(key.clone()))?;

		let mut best: Option<(char, f64)> = None;
		for candidate in state.candidates() {
			let context: Vec<char> = before
				.iter()
				.copied()
				.chain(iter::once(candidate))
				.chain(after.iter().copied())
				.collect();
			let score = self.likelihood(&context);
			// Strict comparison: ties keep the earlier candidate
			if best.is_none_or(|(_, best_score)| score > best_score) {
				best = Some((candidate, score));
			}
		}

		let (c, score) = best.ok_or(MarkovError::UnknownKgram(key))?;
		trace!(
			"'{}' + '{}' + '{}' scored {}",
			state.key(),
			c,
			after.iter().collect::<String>(),
			score
		);
		Ok(c)
	}

	/// Product of `P(context[j + k] | context[j..j + k])` over every window.
	///
	/// Returns 0 as soon as one window holds an unseen context or an unseen
	/// successor.
	fn likelihood(&self, context: &[char]) -> f64 {
		let k = self.order();
		let mut p = 1.0;
		for window in context.windows(k + 1) {
			let key: String = window[..k].iter().collect();
			let next_char = window[k];
			match self.state(&key) {
				Some(state) if state.count(next_char) > 0 => p *= state.probability(next_char),
				_ => return 0.0,
			}
		}
		p
	}
}

/// Ensures the marker at `i` has `k` known characters on both sides.
fn check_context(chars: &[char], i: usize, k: usize, marker: char) -> Result<()> {
	if i < k {
		return Err(MarkovError::InvalidArgument(format!(
			"marker at position {} has fewer than {} characters before it",
			i, k
		)));
	}
	if i + k >= chars.len() {
		return Err(MarkovError::InvalidArgument(format!(
			"marker at position {} has fewer than {} characters after it",
			i, k
		)));
	}
	if chars[i - k..i].contains(&marker) || chars[i + 1..=i + k].contains(&marker) {
		return Err(MarkovError::InvalidArgument(format!(
			"marker at position {} is within {} characters of another marker",
			i, k
		)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn model() -> MarkovModel {
		MarkovModel::new("the cat sat on the mat with that hat ", 2).unwrap()
	}

	#[test]
	fn string_without_marker_is_unchanged() {
		assert_eq!(model().replace_unknown("the hat").unwrap(), "the hat");
	}

	#[test]
	fn empty_string_is_unchanged() {
		assert_eq!(model().replace_unknown("").unwrap(), "");
	}

	#[test]
	fn marker_too_close_to_start_is_rejected() {
		let err = model().replace_unknown("t~e cat").unwrap_err();
		assert!(matches!(err, MarkovError::InvalidArgument(_)));
	}

	#[test]
	fn marker_too_close_to_end_is_rejected() {
		let err = model().replace_unknown("the ca~").unwrap_err();
		assert!(matches!(err, MarkovError::InvalidArgument(_)));
	}

	#[test]
	fn neighbouring_markers_are_rejected() {
		let err = model().replace_unknown("the ~a~ sat").unwrap_err();
		assert!(matches!(err, MarkovError::InvalidArgument(_)));
	}

	#[test]
	fn unseen_left_context_is_unknown() {
		let err = model().replace_unknown("xq~ cat").unwrap_err();
		assert!(matches!(err, MarkovError::UnknownKgram(ref kgram) if kgram == "xq"));
	}

	#[test]
	fn custom_marker() {
		assert_eq!(model().replace_marked("th? cat", '?').unwrap(), "the cat");
	}

	#[test]
	fn likelihood_short_circuits_to_zero() {
		let model = model();
		let context: Vec<char> = "thz c".chars().collect();
		assert_eq!(model.likelihood(&context), 0.0);
	}
}
