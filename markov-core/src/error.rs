use thiserror::Error;

/// Errors returned by the Markov model and its helpers.
///
/// Every public operation either fully succeeds or returns one of these
/// without touching the model, which is read-only once built.
#[derive(Error, Debug)]
pub enum MarkovError {
	/// A caller-side mistake: wrong k-gram length, `k == 0`, `n < k`,
	/// or a corrupted string whose markers cannot be given a full context.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// The k-gram was never observed as a context during training.
	#[error("Unknown kgram '{0}': context not seen in training")]
	UnknownKgram(String),

	#[error("IO Error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
