//! Turns a tokenized table into a graph.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::columns::ResolvedColumns;
use super::model::{Edge, GraphModel, Node};
use super::tokenizer::{Row, Table};

/// Weight of an edge whose weight cell is unmapped or not a number.
pub const DEFAULT_WEIGHT: f64 = 1.0;
/// Weights strictly above this are `"strong"`.
pub const STRONG_WEIGHT_THRESHOLD: f64 = 5.0;
/// Weights at or below this are `"weak"`.
pub const WEAK_WEIGHT_THRESHOLD: f64 = 2.0;
/// Edge ids are this prefix plus the row number.
pub const EDGE_ID_PREFIX: &str = "edge-";
/// Type given to every node synthesized from a table.
pub const TABLE_NODE_KIND: &str = "default";

/// Something lenient happened to a row. Never a failure.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildWarning {
	/// Source or target was missing or empty; the row produced nothing.
	SkippedRow {
		/// Table row index; the header is row 0.
		row: usize,
	},
	/// The weight cell was not a number and [`DEFAULT_WEIGHT`] was used.
	DefaultedWeight {
		/// Table row index; the header is row 0.
		row: usize,
		/// The cell as read, `""` when the row ends early.
		raw: String,
	},
}

/// A built graph plus what was coerced or skipped on the way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildReport {
	/// The finished graph.
	pub graph: GraphModel,
	/// In row order.
	pub warnings: Vec<BuildWarning>,
}

impl BuildReport {
	/// e.g. `"2 rows skipped, 1 weight defaulted to 1"`; `None` when clean.
	pub fn warning_summary(&self) -> Option<String> {
		let skipped = self
			.warnings
			.iter()
			.filter(|w| matches!(w, BuildWarning::SkippedRow { .. }))
			.count();
		let defaulted = self.warnings.len() - skipped;
		let plural = |n: usize, one: &str, many: &str| {
			format!("{n} {}", if n == 1 { one } else { many })
		};
		let parts: Vec<String> = [
			(skipped > 0).then(|| plural(skipped, "row skipped", "rows skipped")),
			(defaulted > 0).then(|| {
				plural(defaulted, "weight", "weights") + &format!(" defaulted to {DEFAULT_WEIGHT}")
			}),
		]
		.into_iter()
		.flatten()
		.collect();
		(!parts.is_empty()).then(|| parts.join(", "))
	}
}

/// Classifies an edge by weight: `"strong"`, `"default"` or `"weak"`.
pub fn edge_kind(weight: f64) -> &'static str {
	if weight > STRONG_WEIGHT_THRESHOLD {
		"strong"
	} else if weight > WEAK_WEIGHT_THRESHOLD {
		"default"
	} else {
		"weak"
	}
}

/// [`build_report`] without the warnings.
pub fn build(table: &Table, columns: &ResolvedColumns) -> GraphModel {
	build_report(table, columns).graph
}

/// Builds the graph from every row after the header.
///
/// Edge ids follow row position (`edge-1` is the first data row), so they are
/// unique per table but change if rows are reordered.
pub fn build_report(table: &Table, columns: &ResolvedColumns) -> BuildReport {
	let mut node_ids: Vec<&str> = Vec::new();
	let mut seen: HashSet<&str> = HashSet::new();
	let mut edges = Vec::new();
	let mut warnings = Vec::new();

	for (i, row) in table.iter().enumerate().skip(1) {
		let (Some(source), Some(target)) = (cell(row, columns.source), cell(row, columns.target)) else {
			debug!("row {i}: missing source or target, skipped");
			warnings.push(BuildWarning::SkippedRow { row: i });
			continue;
		};

		let weight = match columns.weight {
			None => DEFAULT_WEIGHT,
			Some(idx) => {
				let raw = row.get(idx).map(String::as_str).unwrap_or_default();
				parse_weight(raw).unwrap_or_else(|| {
					debug!("row {i}: weight {raw:?} is not a number, using {DEFAULT_WEIGHT}");
					warnings.push(BuildWarning::DefaultedWeight {
						row: i,
						raw: raw.to_owned(),
					});
					DEFAULT_WEIGHT
				})
			}
		};
		// Unmapped label column reads as "", a row too short to reach it as absent.
		let label = match columns.label {
			None => Some(String::new()),
			Some(idx) => row.get(idx).cloned(),
		};

		for id in [source, target] {
			if seen.insert(id) {
				node_ids.push(id);
			}
		}

		let mut edge = Edge::new(format!("{EDGE_ID_PREFIX}{i}"), source, target)
			.with_weight(weight)
			.with_kind(edge_kind(weight));
		edge.label = label;
		edges.push(edge);
	}

	let mut degrees: HashMap<&str, usize> = HashMap::new();
	for edge in &edges {
		*degrees.entry(edge.source.as_str()).or_default() += 1;
		*degrees.entry(edge.target.as_str()).or_default() += 1;
	}
	let nodes = node_ids
		.into_iter()
		.map(|id| {
			let degree = degrees.get(id).copied().unwrap_or_default();
			Node::new(id, id)
				.with_kind(TABLE_NODE_KIND)
				.with_metadata("degree", degree as u64)
		})
		.collect();

	BuildReport {
		graph: GraphModel { nodes, edges },
		warnings,
	}
}

/// Non-empty cell at `idx`, if the row reaches it.
fn cell(row: &Row, idx: usize) -> Option<&str> {
	row.get(idx).map(String::as_str).filter(|c| !c.is_empty())
}

fn parse_weight(raw: &str) -> Option<f64> {
	raw.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::tokenizer::tokenize;

	fn all_columns() -> ResolvedColumns {
		ResolvedColumns {
			source: 0,
			target: 1,
			weight: Some(2),
			label: Some(3),
		}
	}

	fn endpoints_only() -> ResolvedColumns {
		ResolvedColumns {
			source: 0,
			target: 1,
			weight: None,
			label: None,
		}
	}

	#[test]
	fn single_row_graph() {
		let table = tokenize("source,target,weight\nA,B,7");
		let graph = build(&table, &ResolvedColumns {
			weight: Some(2),
			..endpoints_only()
		});

		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[0].id, "A");
		assert_eq!(graph.nodes[1].id, "B");
		for node in &graph.nodes {
			assert_eq!(node.label, node.id);
			assert_eq!(node.kind.as_deref(), Some("default"));
			assert_eq!(node.degree(), Some(1.0));
		}
		assert_eq!(graph.edges, vec![
			Edge::new("edge-1", "A", "B")
				.with_label("")
				.with_weight(7.0)
				.with_kind("strong")
		]);
	}

	#[test]
	fn header_only_yields_empty_graph() {
		let graph = build(&tokenize("source,target"), &endpoints_only());
		assert!(graph.is_empty());
		assert!(build(&Vec::new(), &endpoints_only()).is_empty());
	}

	#[test]
	fn weight_boundaries() {
		assert_eq!(edge_kind(5.0), "default");
		assert_eq!(edge_kind(5.01), "strong");
		assert_eq!(edge_kind(2.0), "weak");
		assert_eq!(edge_kind(2.01), "default");
		assert_eq!(edge_kind(-3.0), "weak");
	}

	#[test]
	fn rows_without_endpoints_are_skipped() {
		let table = tokenize("s,t,w,l\nA,B,1,x\n,B,1,x\nA,,1,x\nA\nC,D,1,x");
		let report = build_report(&table, &all_columns());

		let ids: Vec<_> = report.graph.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, vec!["edge-1", "edge-5"]);
		assert_eq!(report.warnings, vec![
			BuildWarning::SkippedRow { row: 2 },
			BuildWarning::SkippedRow { row: 3 },
			BuildWarning::SkippedRow { row: 4 },
		]);
	}

	#[test]
	fn weight_falls_back_to_default() {
		let table = tokenize("s,t,w\nA,B,heavy\nA,B,\nA,B\nA,B,NaN\nA,B, 3.5 \nA,B,0\nA,B,3kg");
		let report = build_report(&table, &ResolvedColumns {
			weight: Some(2),
			..endpoints_only()
		});
		let weights: Vec<_> = report.graph.edges.iter().map(|e| e.weight.unwrap()).collect();
		assert_eq!(weights, vec![1.0, 1.0, 1.0, 1.0, 3.5, 0.0, 1.0]);
		assert_eq!(report.warnings, vec![
			BuildWarning::DefaultedWeight { row: 1, raw: "heavy".into() },
			BuildWarning::DefaultedWeight { row: 2, raw: "".into() },
			BuildWarning::DefaultedWeight { row: 3, raw: "".into() },
			BuildWarning::DefaultedWeight { row: 4, raw: "NaN".into() },
			BuildWarning::DefaultedWeight { row: 7, raw: "3kg".into() },
		]);
	}

	#[test]
	fn warning_summary_counts_each_kind() {
		let table = tokenize("s,t,w\nA,B,x\n,B,1\nA,,1\nA,B,y");
		let report = build_report(&table, &ResolvedColumns {
			weight: Some(2),
			..endpoints_only()
		});
		assert_eq!(
			report.warning_summary().as_deref(),
			Some("2 rows skipped, 2 weights defaulted to 1")
		);
		let clean = build_report(&tokenize("s,t\nA,B"), &endpoints_only());
		assert_eq!(clean.warning_summary(), None);
	}

	#[test]
	fn unmapped_weight_is_default_without_warning() {
		let report = build_report(&tokenize("s,t\nA,B"), &endpoints_only());
		assert_eq!(report.graph.edges[0].weight, Some(1.0));
		assert_eq!(report.graph.edges[0].kind.as_deref(), Some("weak"));
		assert_eq!(report.graph.edges[0].label.as_deref(), Some(""));
		assert!(report.warnings.is_empty());
	}

	#[test]
	fn labels_come_from_label_column() {
		let graph = build(&tokenize("s,t,w,l\nA,B,3,SQL\nB,C,3\nC,D,3,"), &all_columns());
		assert_eq!(graph.edges[0].label.as_deref(), Some("SQL"));
		assert_eq!(graph.edges[1].label, None);
		assert_eq!(graph.edges[2].label.as_deref(), Some(""));
	}

	#[test]
	fn degree_exports_as_an_integer() {
		let graph = build(&tokenize("s,t\nA,B"), &endpoints_only());
		let json = serde_json::to_value(&graph.nodes[0]).unwrap();
		assert_eq!(json["metadata"]["degree"], serde_json::json!(1));
	}

	#[test]
	fn nodes_are_deduplicated_in_first_seen_order() {
		let graph = build(&tokenize("s,t\nB,A\nA,C\nC,B\nD,A"), &endpoints_only());
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["B", "A", "C", "D"]);
		let degrees: Vec<_> = graph.nodes.iter().map(|n| n.degree().unwrap()).collect();
		assert_eq!(degrees, vec![2.0, 3.0, 2.0, 1.0]);
	}

	#[test]
	fn self_loop_counts_twice() {
		let graph = build(&tokenize("s,t\nA,A\nA,B"), &endpoints_only());
		assert_eq!(graph.nodes[0].degree(), Some(3.0));
		assert_eq!(graph.nodes[1].degree(), Some(1.0));
		let total: f64 = graph.nodes.iter().filter_map(Node::degree).sum();
		assert_eq!(total, 2.0 * graph.edges.len() as f64);
	}

	#[test]
	fn parallel_edges_are_distinct() {
		let graph = build(&tokenize("s,t\nA,B\nA,B"), &endpoints_only());
		assert_eq!(graph.edges.len(), 2);
		assert_ne!(graph.edges[0].id, graph.edges[1].id);
		assert_eq!(graph.nodes[0].degree(), Some(2.0));
	}
}
