use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::debug;
use markov_core::io::read_text;
use markov_core::{MarkovError, MarkovModel, Result, UNKNOWN_CHAR, WordIndex};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Character-level Markov text model", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Log at debug level unless RUST_LOG says otherwise
	#[arg(global = true, short, long, default_value_t = false)]
	verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Generate N characters of text from a model of order K
	Generate(GenerateArgs),
	/// Replace unknown characters in a corrupted string
	Repair(RepairArgs),
	/// Query k-gram frequencies of a model trained on TEXT (queries read from stdin)
	Freq(FreqArgs),
	/// Look up word positions in FILE (words read from stdin)
	Index(IndexArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
	/// Order of the model
	k: usize,
	/// Length of the generated text
	n: usize,
	/// Training text file (standard input if omitted)
	#[arg(short, long)]
	input: Option<PathBuf>,
	/// First K characters of the output (defaults to the start of the training text)
	#[arg(short, long)]
	start: Option<String>,
	/// Seed of the random source, for reproducible output
	#[arg(long)]
	seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RepairArgs {
	/// Order of the model
	k: usize,
	/// String to repair
	corrupted: String,
	/// Training text file (standard input if omitted)
	#[arg(short, long)]
	input: Option<PathBuf>,
	/// Character marking an unknown position
	#[arg(short, long, default_value_t = UNKNOWN_CHAR)]
	marker: char,
}

#[derive(Args, Debug)]
struct FreqArgs {
	/// Order of the model
	k: usize,
	/// Training text
	text: String,
}

#[derive(Args, Debug)]
struct IndexArgs {
	/// Text file to index
	file: PathBuf,
}

fn main() {
	let cli = Cli::parse();

	let default_level = if cli.verbose { "debug" } else { "warn" };
	env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

	if let Err(e) = run(cli.command) {
		eprintln!("{}", e);
		process::exit(1);
	}
}

fn run(command: Commands) -> Result<()> {
	match command {
		Commands::Generate(args) => generate(args),
		Commands::Repair(args) => repair(args),
		Commands::Freq(args) => freq(args),
		Commands::Index(args) => index(args),
	}
}

fn generate(args: GenerateArgs) -> Result<()> {
	let text = read_text(args.input.as_deref())?;
	let model = MarkovModel::new(&text, args.k)?;

	let start = match args.start {
		Some(start) => start,
		None => text.chars().take(args.k).collect(),
	};
	if !model.contains(&start)? {
		return Err(MarkovError::UnknownKgram(start));
	}

	let generated = match args.seed {
		Some(seed) => {
			debug!("Generating with seed {}", seed);
			model.generate(&start, args.n, &mut StdRng::seed_from_u64(seed))?
		}
		None => model.generate(&start, args.n, &mut rand::rng())?,
	};

	println!("{}", generated);
	Ok(())
}

fn repair(args: RepairArgs) -> Result<()> {
	let text = read_text(args.input.as_deref())?;
	let model = MarkovModel::new(&text, args.k)?;
	println!("{}", model.replace_marked(&args.corrupted, args.marker)?);
	Ok(())
}

/// Parses one `kgram [char]` query line; `-` stands for a space.
fn parse_query(line: &str) -> Result<Option<(String, Option<char>)>> {
	let mut fields = line.split_whitespace();
	let Some(kgram) = fields.next() else {
		return Ok(None);
	};
	let kgram = kgram.replace('-', " ");

	let c = match fields.next() {
		None => None,
		Some(field) => {
			let mut chars = field.chars();
			match (chars.next(), chars.next()) {
				(Some('-'), None) => Some(' '),
				(Some(c), None) => Some(c),
				_ => {
					return Err(MarkovError::InvalidArgument(format!(
						"expected a single character, got '{}'",
						field
					)));
				}
			}
		}
	};

	Ok(Some((kgram, c)))
}

fn freq(args: FreqArgs) -> Result<()> {
	let model = MarkovModel::new(&args.text, args.k)?;

	for line in io::stdin().lock().lines() {
		let Some((kgram, c)) = parse_query(&line?)? else {
			continue;
		};
		match c {
			Some(c) => println!("freq({}, {}) = {}", kgram, c, model.char_freq(&kgram, c)?),
			None => println!("freq({}) = {}", kgram, model.kgram_freq(&kgram)?),
		}
	}
	Ok(())
}

fn index(args: IndexArgs) -> Result<()> {
	let index = WordIndex::from_text(&read_text(Some(args.file.as_path()))?);
	debug!("Indexed {} distinct words from {}", index.len(), args.file.display());

	for line in io::stdin().lock().lines() {
		for word in line?.split_whitespace() {
			println!("{}", index.lookup(word));
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn query_with_character() {
		assert_eq!(parse_query("ga g").unwrap(), Some(("ga".to_owned(), Some('g'))));
	}

	#[test]
	fn query_dash_is_space() {
		assert_eq!(parse_query("a- -").unwrap(), Some(("a ".to_owned(), Some(' '))));
	}

	#[test]
	fn query_without_character() {
		assert_eq!(parse_query("ag").unwrap(), Some(("ag".to_owned(), None)));
	}

	#[test]
	fn blank_query_is_skipped() {
		assert_eq!(parse_query("   ").unwrap(), None);
	}

	#[test]
	fn query_rejects_long_character() {
		assert!(parse_query("ga xy").is_err());
	}

	#[test]
	fn cli_definition_is_valid() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}
}
