use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::{fs, io};

/// Reads a text file and returns its whitespace-delimited words, in order.
///
/// - Reads the entire file into memory
/// - Splits on any Unicode whitespace; words are never empty
pub fn read_words<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.split_whitespace().map(str::to_owned).collect())
}

/// Lists the corpora available in a directory: the stems of all files with
/// the given extension, sorted.
///
/// Example: `data/{french.txt, ville.txt}` + `"txt"` → `["french", "ville"]`
pub fn list_corpora<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut names = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() || path.extension() != Some(std::ffi::OsStr::new(extension)) {
			continue;
		}
		if let Some(stem) = path.file_stem() {
			names.push(stem.to_string_lossy().to_string());
		}
	}

	names.sort();
	Ok(names)
}
