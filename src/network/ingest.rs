//! Entry points used by the loaders: text in, [`GraphModel`] out.
//!
//! Every call is all-or-nothing. On error the caller keeps whatever graph it
//! already had.

use std::fmt;

use log::{info, warn};
use thiserror::Error;

use super::builder::{BuildReport, build_report};
use super::columns::{ColumnMapping, MappingError, classify};
use super::model::GraphModel;
use super::tokenizer::{Table, tokenize};
use super::validate::{ValidationError, validate};

/// File name used when exporting the current graph.
pub const EXPORT_FILE_NAME: &str = "network-data.json";

/// Which ingestion path a piece of input is meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
	/// Graph JSON with `nodes` and `edges`.
	Json,
	/// Comma-separated edge table with a header row.
	Csv,
}

impl SourceFormat {
	/// Required file-name suffix, lowercase.
	pub fn extension(self) -> &'static str {
		match self {
			Self::Json => ".json",
			Self::Csv => ".csv",
		}
	}

	/// MIME type a browser reports for files of this format.
	pub fn mime_type(self) -> &'static str {
		match self {
			Self::Json => "application/json",
			Self::Csv => "text/csv",
		}
	}

	/// Value for a file input's `accept` attribute.
	pub fn accept(self) -> &'static str {
		match self {
			Self::Json => ".json,application/json",
			Self::Csv => ".csv",
		}
	}
}

impl fmt::Display for SourceFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Json => "JSON",
			Self::Csv => "CSV",
		})
	}
}

/// Any failure of a load or export attempt, as shown to the user.
#[derive(Debug, Error)]
pub enum IngestError {
	/// The text box or file was blank.
	#[error("Please enter {0} data")]
	EmptyInput(SourceFormat),
	/// Convert was pressed before anything was parsed.
	#[error("No data to convert")]
	NoTable,
	/// Not JSON at all; distinct from a structural rejection.
	#[error("Invalid JSON format: {0}")]
	InvalidJson(#[source] serde_json::Error),
	/// JSON that fails the structural checks.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Column mapping cannot be resolved against the header.
	#[error(transparent)]
	Mapping(#[from] MappingError),
	/// Picked or dropped file of the wrong kind; nothing was read.
	#[error("Please select a {expected} file (got \"{name}\")")]
	UnsupportedFile {
		/// File name as reported by the browser.
		name: String,
		/// What the loader takes.
		expected: SourceFormat,
	},
	/// The browser could not read the file as text.
	#[error("Failed to read file: {0}")]
	Read(String),
	/// Serializing the current graph failed.
	#[error("Failed to export data: {0}")]
	Export(#[source] serde_json::Error),
	/// A browser API call failed; carries the JS error's text.
	#[error("Browser error: {0}")]
	Browser(String),
}

/// Rejects a file whose name does not end in `format`'s extension.
///
/// Runs before any content is read.
pub fn check_file_name(name: &str, format: SourceFormat) -> Result<(), IngestError> {
	if name.to_ascii_lowercase().ends_with(format.extension()) {
		Ok(())
	} else {
		warn!("rejected {name:?}: not a {format} file");
		Err(IngestError::UnsupportedFile {
			name: name.to_owned(),
			expected: format,
		})
	}
}

/// Like [`check_file_name`], but a file whose MIME type is `format`'s own is
/// accepted whatever its name. Dropped files go through this.
pub fn check_file(name: &str, mime_type: &str, format: SourceFormat) -> Result<(), IngestError> {
	if mime_type == format.mime_type() {
		return Ok(());
	}
	check_file_name(name, format)
}

/// Parses and validates pasted or uploaded graph JSON.
pub fn json_to_graph(text: &str) -> Result<GraphModel, IngestError> {
	if text.trim().is_empty() {
		return Err(IngestError::EmptyInput(SourceFormat::Json));
	}
	let parsed: serde_json::Value = serde_json::from_str(text).map_err(IngestError::InvalidJson)?;
	let graph = validate(&parsed).inspect_err(|e| warn!("graph JSON rejected: {e}"))?;
	info!(
		"loaded graph JSON: {} nodes, {} edges",
		graph.nodes.len(),
		graph.edges.len()
	);
	Ok(graph)
}

/// Tokenizes pasted or uploaded CSV text, ignoring surrounding blank space.
pub fn read_table(text: &str) -> Result<Table, IngestError> {
	let text = text.trim();
	if text.is_empty() {
		return Err(IngestError::EmptyInput(SourceFormat::Csv));
	}
	let table = tokenize(text);
	info!("parsed {} rows", table.len());
	Ok(table)
}

/// Column roles guessed from the table's header row.
pub fn suggest_mapping(table: &Table) -> ColumnMapping {
	table.first().map(|header| classify(header)).unwrap_or_default()
}

/// Builds a graph from `table` under the user's `mapping`.
pub fn table_to_graph(table: &Table, mapping: &ColumnMapping) -> Result<BuildReport, IngestError> {
	let header = table.first().ok_or(IngestError::NoTable)?;
	let columns = mapping.resolve(header)?;
	let report = build_report(table, &columns);
	info!(
		"created network with {} nodes and {} edges ({} warnings)",
		report.graph.nodes.len(),
		report.graph.edges.len(),
		report.warnings.len()
	);
	Ok(report)
}

/// Pretty-printed JSON of `graph`, as written by "export current data".
pub fn to_pretty_json(graph: &GraphModel) -> Result<String, IngestError> {
	serde_json::to_string_pretty(graph).map_err(IngestError::Export)
}
