//! Permissive comma-separated text splitting.
//!
//! One row per line; a field may not span lines. Double quotes group a field
//! so it can contain commas, and are dropped from the output. Rows are not
//! checked against the header width.

/// A tokenized row of cells.
pub type Row = Vec<String>;

/// Rows of cells; the first row is the header.
pub type Table = Vec<Row>;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Splits `text` into rows of trimmed cells.
///
/// A trailing line break does not add an empty row. Empty text is a single
/// empty line.
pub fn tokenize(text: &str) -> Table {
	if text.is_empty() {
		return vec![vec![String::new()]];
	}
	text.lines().map(tokenize_line).collect()
}

fn tokenize_line(line: &str) -> Row {
	let mut cells = Vec::new();
	let mut current = String::new();
	let mut in_quotes = false;

	for ch in line.chars() {
		match ch {
			QUOTE => in_quotes = !in_quotes,
			DELIMITER if !in_quotes => {
				cells.push(current.trim().to_owned());
				current.clear();
			}
			_ => current.push(ch),
		}
	}
	cells.push(current.trim().to_owned());
	cells
}
