use std::collections::HashSet;

use network_ingest_canvas::network::ingest::{
	json_to_graph, read_table, suggest_mapping, table_to_graph, to_pretty_json,
};
use network_ingest_canvas::network::{
	ColumnChoice, ColumnRole, GraphModel, IngestError, MappingError, Node, ValidationError, samples,
	tokenize, validate,
};
use serde_json::json;

fn csv_graph(text: &str) -> GraphModel {
	let table = read_table(text).unwrap();
	table_to_graph(&table, &suggest_mapping(&table)).unwrap().graph
}

#[test]
fn scenario_tables() {
	assert_eq!(tokenize("a,b\n1,2"), vec![vec!["a", "b"], vec!["1", "2"]]);
	assert_eq!(tokenize("x,\"y,z\"\n"), vec![vec!["x", "y,z"]]);
}

#[test]
fn csv_to_graph() {
	let graph = csv_graph("source,target,weight\nA,B,7");
	assert_eq!(graph.nodes.len(), 2);
	assert!(graph.nodes.iter().all(|n| n.degree() == Some(1.0)));
	assert_eq!(graph.edges.len(), 1);
	let edge = &graph.edges[0];
	assert_eq!(edge.id, "edge-1");
	assert_eq!(edge.weight, Some(7.0));
	assert_eq!(edge.kind.as_deref(), Some("strong"));
}

#[test]
fn json_scenarios() {
	assert!(validate(&json!({ "nodes": [], "edges": [{ "id": "e1", "source": "x", "target": "y" }] })).is_ok());
	assert_eq!(
		validate(&json!({ "nodes": [{ "id": "1" }], "edges": [] })),
		Err(ValidationError::MalformedNode { index: 0 })
	);
}

#[test]
fn exported_graphs_validate_back_unchanged() {
	for graph in [samples::sample_graph(), csv_graph(samples::SAMPLE_CSV)] {
		let exported = to_pretty_json(&graph).unwrap();
		assert_eq!(json_to_graph(&exported).unwrap(), graph);
	}
}

#[test]
fn odd_json_members_survive_export() {
	let text = r#"{
		"nodes": [
			{ "id": 1, "label": "A", "position": "top-left", "owner": "ops" },
			{ "id": "2", "label": "B", "metadata": "cpu=4", "type": { "k": 1 } }
		],
		"edges": [{ "id": "e1", "source": 1, "target": "2", "weight": "heavy" }]
	}"#;
	let graph = json_to_graph(text).unwrap();
	let exported = to_pretty_json(&graph).unwrap();
	let original: serde_json::Value = serde_json::from_str(text).unwrap();
	let written: serde_json::Value = serde_json::from_str(&exported).unwrap();
	assert_eq!(written, original);
	assert_eq!(json_to_graph(&exported).unwrap(), graph);
}

#[test]
fn distinct_endpoints_become_nodes() {
	let text = "from,to\nA,B\nB,C\n,D\nC,A\nE,E\nF,";
	let graph = csv_graph(text);

	let table = tokenize(text);
	let mut expected = HashSet::new();
	for row in table.iter().skip(1) {
		if let [s, t] = row.as_slice() {
			if !s.is_empty() && !t.is_empty() {
				expected.insert(s.as_str());
				expected.insert(t.as_str());
			}
		}
	}
	let ids: HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, expected);
	assert_eq!(graph.nodes.len(), ids.len());
}

#[test]
fn degrees_sum_to_twice_the_edges() {
	let graph = csv_graph("source,target\nA,B\nB,C\nC,C\nA,C\nA,B");
	let total: f64 = graph.nodes.iter().filter_map(Node::degree).sum();
	assert_eq!(total, 2.0 * graph.edges.len() as f64);
}

#[test]
fn builds_are_deterministic() {
	let a = csv_graph(samples::SAMPLE_CSV);
	let b = csv_graph(samples::SAMPLE_CSV);
	assert_eq!(a, b);
}

#[test]
fn weight_classification_boundaries() {
	let graph = csv_graph("source,target,weight\nA,B,5.0\nA,B,5.01\nA,B,2.0\nA,B,2.01");
	let kinds: Vec<_> = graph.edges.iter().filter_map(|e| e.kind.as_deref()).collect();
	assert_eq!(kinds, vec!["default", "strong", "weak", "default"]);
}

#[test]
fn remapping_after_a_mapping_error() {
	let table = read_table("alpha,beta,gamma\nA,B,3").unwrap();
	let mut mapping = suggest_mapping(&table);
	assert!(matches!(
		table_to_graph(&table, &mapping),
		Err(IngestError::Mapping(MappingError::MissingMandatoryRole(ColumnRole::Source)))
	));

	mapping.set_header(ColumnRole::Source, "alpha");
	mapping.set_header(ColumnRole::Target, "beta");
	mapping.set_header(ColumnRole::Weight, "gamma");
	mapping.set_role(ColumnRole::Label, ColumnChoice::None);
	let report = table_to_graph(&table, &mapping).unwrap();
	assert_eq!(report.graph.edges[0].weight, Some(3.0));
	assert!(report.warnings.is_empty());
}

#[test]
fn json_failures_are_distinguished() {
	assert!(matches!(json_to_graph("not json"), Err(IngestError::InvalidJson(_))));
	assert!(matches!(
		json_to_graph(r#"{ "nodes": [] }"#),
		Err(IngestError::Validation(ValidationError::MissingEdges))
	));
	assert!(matches!(
		json_to_graph(r#"{ "nodes": [], "edges": [{ "id": "e", "source": "a" }] }"#),
		Err(IngestError::Validation(ValidationError::MalformedEdge { index: 0 }))
	));
}
