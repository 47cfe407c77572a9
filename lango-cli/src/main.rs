//! Command-line entry point: train a chain on a word list and print one word

use std::path::PathBuf;

use clap::Parser;
use clap::builder::TypedValueParser as _;
use lango_core::io::read_words;
use lango_core::{Chain, MAX_PREFIX_LEN, QuotaRounding};
use log::{LevelFilter, info};

/// Prefix length used when none is given.
const DEFAULT_PREFIX_LEN: usize = 1;

#[derive(Parser, Debug)]
#[command(name = "lango")]
#[command(author, version, about = "Generate a word from a word list using a vowel-balanced Markov chain")]
struct Cli {
	/// Word list, one word per line
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Number of characters the chain looks back
	#[arg(short, long, default_value_t = DEFAULT_PREFIX_LEN, value_parser = clap::value_parser!(u16).range(1..=MAX_PREFIX_LEN as i64).map(usize::from))]
	prefix_len: usize,

	/// How per-word vowel/consonant averages are rounded (floor or nearest)
	#[arg(short, long, default_value_t = QuotaRounding::default())]
	rounding: QuotaRounding,

	/// Lowercase the words before training
	#[arg(short, long)]
	lowercase: bool,

	/// Log build details (-v) or every generation step (-vv)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Cli {
	fn log_level(&self) -> Option<LevelFilter> {
		match self.verbose {
			0 => None,
			1 => Some(LevelFilter::Debug),
			_ => Some(LevelFilter::Trace),
		}
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();

	let mut logger = env_logger::Builder::from_default_env();
	if let Some(level) = cli.log_level() {
		logger.filter_level(level);
	}
	logger.init();

	let mut words = read_words(&cli.file)?;
	if cli.lowercase {
		words = words.iter().map(|w| w.to_lowercase()).collect();
	}
	info!("read {} words from {}", words.len(), cli.file.display());

	let mut chain = Chain::with_rounding(cli.prefix_len, cli.rounding)?;
	chain.build(&words)?;

	println!("{}", chain.generate());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cli_parse_minimal_args() {
		let cli = Cli::parse_from(["lango", "words.dat"]);

		assert_eq!(cli.file, PathBuf::from("words.dat"));
		assert_eq!(cli.prefix_len, DEFAULT_PREFIX_LEN);
		assert_eq!(cli.rounding, QuotaRounding::Nearest);
		assert!(!cli.lowercase);
		assert_eq!(cli.log_level(), None);
	}

	#[test]
	fn test_cli_parse_all_args() {
		let cli = Cli::parse_from([
			"lango",
			"words.dat",
			"--prefix-len",
			"3",
			"--rounding",
			"floor",
			"--lowercase",
			"-vv",
		]);

		assert_eq!(cli.prefix_len, 3);
		assert_eq!(cli.rounding, QuotaRounding::Floor);
		assert!(cli.lowercase);
		assert_eq!(cli.log_level(), Some(LevelFilter::Trace));
	}

	#[test]
	fn test_cli_rejects_bad_values() {
		assert!(Cli::try_parse_from(["lango"]).is_err());
		assert!(Cli::try_parse_from(["lango", "words.dat", "-p", "0"]).is_err());
		assert!(Cli::try_parse_from(["lango", "words.dat", "-p", "33"]).is_err());
		assert!(Cli::try_parse_from(["lango", "words.dat", "-p", "32"]).is_ok());
		assert!(Cli::try_parse_from(["lango", "words.dat", "-r", "ceil"]).is_err());
	}
}
