//! Column roles: guessing them from the header and resolving the user's
//! choices back to column indices.

use std::fmt;

use thiserror::Error;

/// What a column contributes to the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnRole {
	/// Edge start; mandatory.
	Source,
	/// Edge end; mandatory.
	Target,
	/// Edge weight; optional.
	Weight,
	/// Edge label; optional.
	Label,
}

impl ColumnRole {
	/// In display order.
	pub const ALL: [ColumnRole; 4] = [Self::Source, Self::Target, Self::Weight, Self::Label];

	/// Source and Target must be mapped before a graph can be built.
	pub fn is_mandatory(self) -> bool {
		matches!(self, Self::Source | Self::Target)
	}

	/// Lowercase header fragments that suggest this role.
	pub fn hints(self) -> &'static [&'static str] {
		match self {
			Self::Source => &["source", "from", "start"],
			Self::Target => &["target", "to", "end"],
			Self::Weight => &["weight", "value", "strength"],
			Self::Label => &["label", "name", "type"],
		}
	}
}

impl fmt::Display for ColumnRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Source => "source",
			Self::Target => "target",
			Self::Weight => "weight",
			Self::Label => "label",
		})
	}
}

/// A role's assignment: a header cell, or explicitly nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnChoice {
	/// Explicitly unused; only meaningful for optional roles.
	None,
	/// The column whose header cell equals this text.
	Header(String),
}

impl ColumnChoice {
	/// Select-box value used for an explicit "none".
	pub const NONE_VALUE: &'static str = "none";
	/// Prefix of header select-box values, so no header text can read as
	/// [`Self::NONE_VALUE`] or as unset.
	pub const HEADER_PREFIX: &'static str = "h:";

	/// Reads a select-box value; an empty or unknown value means "unset".
	pub fn from_select(value: &str) -> Option<Self> {
		if value == Self::NONE_VALUE {
			return Some(Self::None);
		}
		value
			.strip_prefix(Self::HEADER_PREFIX)
			.map(|header| Self::Header(header.to_owned()))
	}

	/// The select-box value `from_select` reads back as `self`.
	pub fn as_select(&self) -> String {
		match self {
			Self::None => Self::NONE_VALUE.to_owned(),
			Self::Header(h) => format!("{}{h}", Self::HEADER_PREFIX),
		}
	}
}

/// Why a mapping cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
	/// Source or Target is unset or explicitly none.
	#[error("Please select a {0} column")]
	MissingMandatoryRole(ColumnRole),
	/// The chosen header text is not in the current header row.
	#[error("Selected {role} column \"{header}\" not found")]
	HeaderNotFound {
		/// Role whose header went missing.
		role: ColumnRole,
		/// The header text it was mapped to.
		header: String,
	},
}

/// Column indices for one header row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedColumns {
	/// Source column index.
	pub source: usize,
	/// Target column index.
	pub target: usize,
	/// `None` when unmapped.
	pub weight: Option<usize>,
	/// `None` when unmapped.
	pub label: Option<usize>,
}

/// The user's role-to-header choices.
///
/// Stores header text rather than indices, so it goes stale if the header
/// changes; `resolve` reports that instead of guessing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnMapping {
	source: Option<ColumnChoice>,
	target: Option<ColumnChoice>,
	weight: Option<ColumnChoice>,
	label: Option<ColumnChoice>,
}

impl ColumnMapping {
	/// The current choice for `role`, `None` when unset.
	pub fn role(&self, role: ColumnRole) -> Option<&ColumnChoice> {
		self.slot(role).as_ref()
	}

	/// Replaces the choice for `role`.
	pub fn set_role(&mut self, role: ColumnRole, choice: ColumnChoice) {
		*self.slot_mut(role) = Some(choice);
	}

	/// Convenience for `set_role(role, ColumnChoice::Header(..))`.
	pub fn set_header(&mut self, role: ColumnRole, header: impl Into<String>) {
		self.set_role(role, ColumnChoice::Header(header.into()));
	}

	/// Back to unset.
	pub fn clear_role(&mut self, role: ColumnRole) {
		*self.slot_mut(role) = None;
	}

	/// Current select-box value for `role` (`""` when unset).
	pub fn select_value(&self, role: ColumnRole) -> String {
		self.role(role)
			.map(ColumnChoice::as_select)
			.unwrap_or_default()
	}

	/// Column indices for `header`, or why the mapping cannot be used.
	pub fn resolve(&self, header: &[String]) -> Result<ResolvedColumns, MappingError> {
		let source = self.mandatory_header(ColumnRole::Source)?;
		let target = self.mandatory_header(ColumnRole::Target)?;
		Ok(ResolvedColumns {
			source: find_header(header, ColumnRole::Source, source)?,
			target: find_header(header, ColumnRole::Target, target)?,
			weight: self.optional_index(header, ColumnRole::Weight)?,
			label: self.optional_index(header, ColumnRole::Label)?,
		})
	}

	fn mandatory_header(&self, role: ColumnRole) -> Result<&str, MappingError> {
		match self.role(role) {
			Some(ColumnChoice::Header(h)) if !h.is_empty() => Ok(h),
			_ => Err(MappingError::MissingMandatoryRole(role)),
		}
	}

	fn optional_index(&self, header: &[String], role: ColumnRole) -> Result<Option<usize>, MappingError> {
		match self.role(role) {
			Some(ColumnChoice::Header(h)) if !h.is_empty() => find_header(header, role, h).map(Some),
			_ => Ok(None),
		}
	}

	fn slot(&self, role: ColumnRole) -> &Option<ColumnChoice> {
		match role {
			ColumnRole::Source => &self.source,
			ColumnRole::Target => &self.target,
			ColumnRole::Weight => &self.weight,
			ColumnRole::Label => &self.label,
		}
	}

	fn slot_mut(&mut self, role: ColumnRole) -> &mut Option<ColumnChoice> {
		match role {
			ColumnRole::Source => &mut self.source,
			ColumnRole::Target => &mut self.target,
			ColumnRole::Weight => &mut self.weight,
			ColumnRole::Label => &mut self.label,
		}
	}
}

fn find_header(header: &[String], role: ColumnRole, wanted: &str) -> Result<usize, MappingError> {
	header
		.iter()
		.position(|h| h == wanted)
		.ok_or_else(|| MappingError::HeaderNotFound {
			role,
			header: wanted.to_owned(),
		})
}

/// Suggests a mapping from header names.
///
/// Per role, the first header (left to right) containing one of the role's
/// hints, case-insensitively. Roles without a match stay unset.
pub fn classify(header: &[String]) -> ColumnMapping {
	let lowered: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();
	let mut mapping = ColumnMapping::default();
	for role in ColumnRole::ALL {
		let hit = lowered
			.iter()
			.position(|h| role.hints().iter().any(|hint| h.contains(hint)));
		if let Some(idx) = hit {
			mapping.set_header(role, header[idx].clone());
		}
	}
	mapping
}
