use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::Result;

/// Reads a whole text source into a `String`.
///
/// - `Some(path)`: reads the entire file into memory
/// - `None`: reads standard input until EOF
pub fn read_text(path: Option<&Path>) -> Result<String> {
	let mut contents = String::new();
	match path {
		Some(path) => {
			File::open(path)?.read_to_string(&mut contents)?;
		}
		None => {
			io::stdin().lock().read_to_string(&mut contents)?;
		}
	}
	Ok(contents)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::MarkovError;
	use std::io::Write;

	#[test]
	fn reads_whole_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "line one\nline two\n").unwrap();
		assert_eq!(read_text(Some(file.path())).unwrap(), "line one\nline two\n");
	}

	#[test]
	fn missing_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = read_text(Some(dir.path().join("missing.txt").as_path())).unwrap_err();
		assert!(matches!(err, MarkovError::Io(_)));
	}
}
