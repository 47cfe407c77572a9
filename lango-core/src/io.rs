use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::{ChainError, Result};

/// Reads a word list and returns one word per line.
///
/// - Line terminators (`\n` / `\r\n`) are not part of the words
/// - Empty lines are kept, they count as (empty) words when training
/// - Bytes that are not valid UTF-8 become `U+FFFD`, only the offending
///   characters are replaced and the rest of the list is kept
pub fn read_words<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let bytes = fs::read(path).map_err(|source| ChainError::Io { path: path.to_path_buf(), source })?;
	Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_owned).collect())
}

/// Resolves the directory corpora are served from.
///
/// An empty path or the current directory (`.`, `./`) becomes the absolute
/// working directory so logs show where word lists are looked up. Anything
/// else is kept as given.
pub fn resolve_data_dir(input: &str) -> PathBuf {
	match input.trim() {
		"" | "." | "./" => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
		dir => PathBuf::from(dir),
	}
}

/// Lists the corpus names found in `dir`: the stems of the regular files
/// ending in `.{extension}`, sorted. Directories are skipped.
pub fn list_corpora<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut names = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
			continue;
		}
		if let Some(stem) = path.file_stem() {
			names.push(stem.to_string_lossy().into_owned());
		}
	}

	names.sort();
	Ok(names)
}
