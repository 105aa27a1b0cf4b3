//! Structural checks on graph JSON supplied directly by the user.
//!
//! Only the shape is checked: `nodes` and `edges` arrays, `id` + `label` on
//! nodes, `id` + `source` + `target` on edges. Dangling edge endpoints,
//! duplicate ids and non-numeric weights are accepted; the canvas drops
//! edges it cannot attach. Input that passes is kept as given: members the
//! typed model cannot reproduce exactly go into `extra` unchanged.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::model::{Edge, Extra, GraphModel, Node};

/// Why graph JSON was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// `nodes` is missing or not an array.
	#[error("Invalid format: missing or invalid nodes array")]
	MissingNodes,
	/// `edges` is missing or not an array.
	#[error("Invalid format: missing or invalid edges array")]
	MissingEdges,
	/// A node lacks a truthy `id` or `label`; the message stays generic.
	#[error("Invalid node format: each node must have id and label")]
	MalformedNode {
		/// First offending node.
		index: usize,
	},
	/// An edge lacks a truthy `id`, `source` or `target`.
	#[error("Invalid edge format: each edge must have id, source, and target")]
	MalformedEdge {
		/// First offending edge.
		index: usize,
	},
}

const NODE_KEYS: [&str; 5] = ["id", "label", "type", "metadata", "position"];
const EDGE_KEYS: [&str; 6] = ["id", "source", "target", "label", "weight", "type"];

/// Checks `parsed` and carries it into a [`GraphModel`] without filling in
/// any defaults.
pub fn validate(parsed: &Value) -> Result<GraphModel, ValidationError> {
	let nodes = parsed
		.get("nodes")
		.and_then(Value::as_array)
		.ok_or(ValidationError::MissingNodes)?;
	let edges = parsed
		.get("edges")
		.and_then(Value::as_array)
		.ok_or(ValidationError::MissingEdges)?;

	if let Some(index) = nodes
		.iter()
		.position(|n| !(truthy(n.get("id")) && truthy(n.get("label"))))
	{
		return Err(ValidationError::MalformedNode { index });
	}
	if let Some(index) = edges
		.iter()
		.position(|e| !(truthy(e.get("id")) && truthy(e.get("source")) && truthy(e.get("target"))))
	{
		return Err(ValidationError::MalformedEdge { index });
	}

	// Truthy members imply objects: `Value::get` on anything else is `None`.
	Ok(GraphModel {
		nodes: nodes.iter().filter_map(Value::as_object).map(to_node).collect(),
		edges: edges.iter().filter_map(Value::as_object).map(to_edge).collect(),
	})
}

/// Loose truthiness: missing, `null`, `false`, `0` and `""` are falsy.
fn truthy(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => false,
		Some(Value::Bool(b)) => *b,
		Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
		Some(Value::String(s)) => !s.is_empty(),
		Some(Value::Array(_) | Value::Object(_)) => true,
	}
}

fn to_node(fields: &Map<String, Value>) -> Node {
	let mut extra = unknown_members(fields, &NODE_KEYS);
	Node {
		id: carry(&mut extra, fields, "id", as_text).unwrap_or_default(),
		label: carry(&mut extra, fields, "label", as_text).unwrap_or_default(),
		kind: carry(&mut extra, fields, "type", as_string),
		metadata: carry(&mut extra, fields, "metadata", typed),
		position: carry(&mut extra, fields, "position", typed),
		extra,
	}
}

fn to_edge(fields: &Map<String, Value>) -> Edge {
	let mut extra = unknown_members(fields, &EDGE_KEYS);
	Edge {
		id: carry(&mut extra, fields, "id", as_text).unwrap_or_default(),
		source: carry(&mut extra, fields, "source", as_text).unwrap_or_default(),
		target: carry(&mut extra, fields, "target", as_text).unwrap_or_default(),
		label: carry(&mut extra, fields, "label", as_string),
		weight: carry(&mut extra, fields, "weight", lenient_number),
		kind: carry(&mut extra, fields, "type", as_string),
		extra,
	}
}

fn unknown_members(fields: &Map<String, Value>, known: &[&str]) -> Extra {
	fields
		.iter()
		.filter(|(key, _)| !known.contains(&key.as_str()))
		.map(|(key, value)| (key.clone(), value.clone()))
		.collect()
}

/// Reads `key` through `view`. The raw value also goes into `extra` unless
/// the view serializes back to exactly the same JSON.
fn carry<T: Serialize>(
	extra: &mut Extra,
	fields: &Map<String, Value>,
	key: &str,
	view: fn(&Value) -> Option<T>,
) -> Option<T> {
	let raw = fields.get(key)?;
	let typed = view(raw);
	let exact = typed
		.as_ref()
		.and_then(|t| serde_json::to_value(t).ok())
		.is_some_and(|v| v == *raw);
	if !exact {
		extra.insert(key.to_owned(), raw.clone());
	}
	typed
}

/// Display text for an identifier: strings verbatim, anything else as JSON.
fn as_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}

fn as_string(value: &Value) -> Option<String> {
	value.as_str().map(str::to_owned)
}

fn typed<T: DeserializeOwned>(value: &Value) -> Option<T> {
	serde_json::from_value(value.clone()).ok()
}

/// Numbers as-is, numeric strings parsed, anything else treated as absent.
fn lenient_number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok().filter(|w| w.is_finite()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::network::model::MetadataValue;

	#[test]
	fn dangling_edge_is_accepted() {
		let graph = validate(&json!({
			"nodes": [],
			"edges": [{ "id": "e1", "source": "x", "target": "y" }]
		}))
		.unwrap();
		assert!(graph.nodes.is_empty());
		assert_eq!(graph.edges, vec![Edge::new("e1", "x", "y")]);
	}

	#[test]
	fn node_without_label_is_rejected() {
		let err = validate(&json!({ "nodes": [{ "id": "1" }], "edges": [] })).unwrap_err();
		assert_eq!(err, ValidationError::MalformedNode { index: 0 });
		assert_eq!(err.to_string(), "Invalid node format: each node must have id and label");
	}

	#[test]
	fn containers_are_checked_first() {
		assert_eq!(validate(&json!({})), Err(ValidationError::MissingNodes));
		assert_eq!(validate(&json!({ "nodes": {} })), Err(ValidationError::MissingNodes));
		assert_eq!(validate(&json!([1, 2])), Err(ValidationError::MissingNodes));
		assert_eq!(
			validate(&json!({ "nodes": [{ "id": "1" }] })),
			Err(ValidationError::MissingEdges)
		);
		assert_eq!(
			validate(&json!({ "nodes": [], "edges": "none" })),
			Err(ValidationError::MissingEdges)
		);
	}

	#[test]
	fn nodes_are_checked_before_edges() {
		let err = validate(&json!({
			"nodes": [{ "id": "a", "label": "A" }, { "id": "", "label": "B" }],
			"edges": [{ "id": "e" }]
		}))
		.unwrap_err();
		assert_eq!(err, ValidationError::MalformedNode { index: 1 });
	}

	#[test]
	fn edges_need_id_source_and_target() {
		for edge in [
			json!({ "source": "a", "target": "b" }),
			json!({ "id": "e", "target": "b" }),
			json!({ "id": "e", "source": "a", "target": null }),
			json!({ "id": 0, "source": "a", "target": "b" }),
			json!("e1"),
		] {
			let err = validate(&json!({ "nodes": [], "edges": [edge] })).unwrap_err();
			assert_eq!(err, ValidationError::MalformedEdge { index: 0 });
		}
	}

	#[test]
	fn numeric_ids_are_read_as_text_and_kept_raw() {
		let input = json!({
			"nodes": [{ "id": 1, "label": "One" }, { "id": 2, "label": 2 }],
			"edges": [{ "id": "e", "source": 1, "target": 2, "weight": "3" }]
		});
		let graph = validate(&input).unwrap();
		assert_eq!(graph.nodes[0].id, "1");
		assert_eq!(graph.nodes[1].label, "2");
		assert_eq!(graph.edges[0].source, "1");
		assert_eq!(graph.edges[0].weight, Some(3.0));
		assert_eq!(graph.edges[0].extra["weight"], json!("3"));
		assert_eq!(serde_json::to_value(&graph).unwrap(), input);
	}

	#[test]
	fn no_defaults_are_applied() {
		let input = json!({
			"nodes": [{ "id": "a", "label": "A" }],
			"edges": [{ "id": "e", "source": "a", "target": "a", "weight": "heavy" }]
		});
		let graph = validate(&input).unwrap();
		assert_eq!(graph.nodes[0], Node::new("a", "A"));
		assert_eq!(graph.edges[0].weight, None);
		assert!(graph.edges[0].label.is_none() && graph.edges[0].kind.is_none());
		assert_eq!(serde_json::to_value(&graph).unwrap(), input);
	}

	#[test]
	fn optional_fields_are_carried() {
		let graph = validate(&json!({
			"nodes": [{
				"id": "1",
				"label": "Web Server",
				"type": "server",
				"metadata": { "cpu": "4 cores" },
				"position": { "x": 10.5, "y": -5.5 }
			}],
			"edges": [{ "id": "e1", "source": "1", "target": "1", "label": "loop", "weight": 2.5, "type": "critical" }]
		}))
		.unwrap();
		let node = &graph.nodes[0];
		assert_eq!(node.kind.as_deref(), Some("server"));
		assert_eq!(
			node.metadata.as_ref().unwrap()["cpu"],
			MetadataValue::String("4 cores".into())
		);
		assert_eq!(node.position.unwrap().y, -5.5);
		assert!(node.extra.is_empty());
		let edge = &graph.edges[0];
		assert_eq!(edge.label.as_deref(), Some("loop"));
		assert_eq!(edge.weight, Some(2.5));
		assert_eq!(edge.kind.as_deref(), Some("critical"));
		assert!(edge.extra.is_empty());
	}

	#[test]
	fn odd_optional_shapes_pass_and_export_unchanged() {
		let input = json!({
			"nodes": [
				{ "id": "1", "label": "A", "position": "top-left" },
				{ "id": "2", "label": "B", "metadata": "cpu=4", "type": { "k": 1 } },
				{ "id": ["x"], "label": "C", "type": null, "owner": "ops" },
				{ "id": "4", "label": "D", "position": { "x": 10, "y": 5 } }
			],
			"edges": [
				{ "id": "e1", "source": "1", "target": "2", "weight": 2, "label": 7, "animated": true }
			]
		});
		let graph = validate(&input).unwrap();
		assert_eq!(graph.nodes[0].position, None);
		assert_eq!(graph.nodes[1].metadata, None);
		assert_eq!(graph.nodes[1].kind, None);
		assert_eq!(graph.nodes[2].id, r#"["x"]"#);
		assert_eq!(graph.nodes[2].extra["owner"], json!("ops"));
		assert_eq!(graph.nodes[3].position.map(|p| p.x), Some(10.0));
		assert_eq!(graph.edges[0].weight, Some(2.0));
		assert_eq!(serde_json::to_value(&graph).unwrap(), input);
	}

	#[test]
	fn truthiness() {
		assert!(!truthy(None));
		assert!(!truthy(Some(&json!(null))));
		assert!(!truthy(Some(&json!(false))));
		assert!(!truthy(Some(&json!(0))));
		assert!(!truthy(Some(&json!(""))));
		assert!(truthy(Some(&json!("0"))));
		assert!(truthy(Some(&json!(-1))));
		assert!(truthy(Some(&json!([]))));
	}
}
