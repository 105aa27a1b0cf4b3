//! How node and edge `type` strings look on the canvas.

/// Fallback palette for node types without a fixed color.
const PALETTE: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Node `type` values with a fixed color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Server,
	Database,
	User,
	Service,
	/// Any other type; the index is its first-seen position among node types.
	Other(usize),
}

impl NodeKind {
	pub fn from_type(kind: &str, first_seen: usize) -> Self {
		match kind {
			"server" => Self::Server,
			"database" => Self::Database,
			"user" => Self::User,
			"service" => Self::Service,
			_ => Self::Other(first_seen),
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			Self::Server => "#ef4444",
			Self::Database => "#22c55e",
			Self::User => "#3b82f6",
			Self::Service => "#a855f7",
			Self::Other(i) => PALETTE[i % PALETTE.len()],
		}
	}
}

/// Edge `type` values with a fixed stroke color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	Strong,
	Default,
	Weak,
	Critical,
}

impl EdgeKind {
	pub fn from_type(kind: Option<&str>) -> Self {
		match kind {
			Some("strong") => Self::Strong,
			Some("weak") => Self::Weak,
			Some("critical") => Self::Critical,
			_ => Self::Default,
		}
	}

	/// `"r, g, b"`, for use inside `rgba(..)` with a varying alpha.
	pub fn rgb(self) -> &'static str {
		match self {
			Self::Strong => "34, 197, 94",
			Self::Default => "100, 180, 255",
			Self::Weak => "234, 179, 8",
			Self::Critical => "239, 68, 68",
		}
	}
}

const MAX_EDGE_WIDTH: f64 = 6.0;

/// Stroke width in screen pixels; heavier edges draw thicker. Absent weight is 1.
pub fn edge_width(weight: Option<f64>) -> f64 {
	(weight.unwrap_or(1.0) * 1.5).clamp(1.5, MAX_EDGE_WIDTH)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_node_types_have_fixed_colors() {
		assert_eq!(NodeKind::from_type("server", 3), NodeKind::Server);
		assert_eq!(NodeKind::from_type("default", 0).color(), PALETTE[0]);
		assert_eq!(NodeKind::from_type("router", 11).color(), PALETTE[1]);
	}

	#[test]
	fn unknown_edge_types_draw_as_default() {
		assert_eq!(EdgeKind::from_type(Some("critical")), EdgeKind::Critical);
		assert_eq!(EdgeKind::from_type(Some("fancy")), EdgeKind::Default);
		assert_eq!(EdgeKind::from_type(None), EdgeKind::Default);
	}

	#[test]
	fn edge_width_is_bounded() {
		assert_eq!(edge_width(None), 1.5);
		assert_eq!(edge_width(Some(-4.0)), 1.5);
		assert_eq!(edge_width(Some(2.0)), 3.0);
		assert_eq!(edge_width(Some(100.0)), MAX_EDGE_WIDTH);
	}
}
