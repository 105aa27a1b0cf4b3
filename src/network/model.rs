//! The graph handed between ingestion, the canvas and export.
//!
//! Typed fields are the read view used by the canvas. JSON input that the
//! typed view cannot reproduce exactly (unknown keys, numeric ids, string
//! weights, integer coordinates) is kept verbatim in `extra`, and export
//! writes those raw values back in place of the typed ones.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Open-ended node/edge attributes.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Raw JSON members carried alongside the typed fields.
pub type Extra = Map<String, Value>;

/// A single metadata value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
	/// JSON `null`.
	Null,
	/// JSON `true` or `false`.
	Bool(bool),
	/// Integers and floats stay distinct, as in the input.
	Number(Number),
	/// JSON string.
	String(String),
	/// JSON array.
	List(Vec<MetadataValue>),
	/// Nested object.
	Map(Metadata),
}

impl MetadataValue {
	/// The value as `f64` when it is a number.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(n) => n.as_f64(),
			_ => None,
		}
	}
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for MetadataValue {
	fn from(n: f64) -> Self {
		Number::from_f64(n).map_or(Self::Null, Self::Number)
	}
}

impl From<u64> for MetadataValue {
	fn from(n: u64) -> Self {
		Self::Number(n.into())
	}
}

impl From<&str> for MetadataValue {
	fn from(s: &str) -> Self {
		Self::String(s.to_owned())
	}
}

/// Initial placement hint for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

/// A graph vertex. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Node {
	/// Unique within a graph; the canvas keeps the first node per id.
	pub id: String,
	/// Text drawn next to the node.
	pub label: String,
	/// Presentational type, e.g. `"server"`.
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	/// Open key/value attributes; tables set `degree`.
	#[serde(default)]
	pub metadata: Option<Metadata>,
	/// Initial placement hint for the canvas.
	#[serde(default)]
	pub position: Option<Position>,
	/// Input members written back verbatim on export.
	#[serde(flatten)]
	pub extra: Extra,
}

impl Node {
	/// A node with only the mandatory fields set.
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			kind: None,
			metadata: None,
			position: None,
			extra: Extra::new(),
		}
	}

	/// Sets `type`.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = Some(kind.into());
		self
	}

	/// Adds one metadata entry.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
		self.metadata
			.get_or_insert_with(Metadata::new)
			.insert(key.into(), value.into());
		self
	}

	/// `metadata.degree` when present and numeric.
	pub fn degree(&self) -> Option<f64> {
		self.metadata.as_ref()?.get("degree")?.as_f64()
	}
}

impl Serialize for Node {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(None)?;
		typed_entry(&mut map, &self.extra, "id", Some(&self.id))?;
		typed_entry(&mut map, &self.extra, "label", Some(&self.label))?;
		typed_entry(&mut map, &self.extra, "type", self.kind.as_ref())?;
		typed_entry(&mut map, &self.extra, "metadata", self.metadata.as_ref())?;
		typed_entry(&mut map, &self.extra, "position", self.position.as_ref())?;
		for (key, value) in &self.extra {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

/// A connection between two nodes. Parallel edges are distinct by `id`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Edge {
	/// Unique per edge, independent of the endpoints.
	pub id: String,
	/// Id of the node the edge starts at; not checked to exist.
	pub source: String,
	/// Id of the node the edge ends at; not checked to exist.
	pub target: String,
	/// Text drawn at the midpoint while highlighted.
	#[serde(default)]
	pub label: Option<String>,
	/// Strength of the connection; sets the stroke width.
	#[serde(default)]
	pub weight: Option<f64>,
	/// `"strong"`, `"default"`, `"weak"` from tables; free text from JSON.
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	/// Input members written back verbatim on export.
	#[serde(flatten)]
	pub extra: Extra,
}

impl Edge {
	pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			label: None,
			weight: None,
			kind: None,
			extra: Extra::new(),
		}
	}

	/// Sets `label`.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets `weight`.
	pub fn with_weight(mut self, weight: f64) -> Self {
		self.weight = Some(weight);
		self
	}

	/// Sets `type`.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = Some(kind.into());
		self
	}
}

impl Serialize for Edge {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(None)?;
		typed_entry(&mut map, &self.extra, "id", Some(&self.id))?;
		typed_entry(&mut map, &self.extra, "source", Some(&self.source))?;
		typed_entry(&mut map, &self.extra, "target", Some(&self.target))?;
		typed_entry(&mut map, &self.extra, "label", self.label.as_ref())?;
		typed_entry(&mut map, &self.extra, "weight", self.weight.as_ref())?;
		typed_entry(&mut map, &self.extra, "type", self.kind.as_ref())?;
		for (key, value) in &self.extra {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

/// Writes a typed field unless it is absent or `extra` holds its raw value.
fn typed_entry<M: SerializeMap, T: Serialize>(
	map: &mut M,
	extra: &Extra,
	key: &str,
	value: Option<&T>,
) -> Result<(), M::Error> {
	match value {
		Some(value) if !extra.contains_key(key) => map.serialize_entry(key, value),
		_ => Ok(()),
	}
}

/// The graph handed to the canvas and written out on export.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
	/// Vertices, in input order.
	pub nodes: Vec<Node>,
	/// Connections, in input order.
	pub edges: Vec<Edge>,
}

impl GraphModel {
	/// No nodes and no edges.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Distinct node types in first-seen order; untyped nodes count as `"default"`.
	pub fn node_types(&self) -> Vec<&str> {
		let mut seen: Vec<&str> = Vec::new();
		for node in &self.nodes {
			let kind = node.kind.as_deref().unwrap_or("default");
			if !seen.contains(&kind) {
				seen.push(kind);
			}
		}
		seen
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn optional_fields_are_omitted_on_export() {
		let graph = GraphModel {
			nodes: vec![Node::new("1", "One")],
			edges: vec![Edge::new("e1", "1", "1")],
		};
		let json = serde_json::to_value(&graph).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"nodes": [{ "id": "1", "label": "One" }],
				"edges": [{ "id": "e1", "source": "1", "target": "1" }]
			})
		);
	}

	#[test]
	fn type_field_uses_json_name() {
		let node = Node::new("a", "A").with_kind("server");
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(json["type"], "server");
	}

	#[test]
	fn metadata_accepts_nested_values() {
		let node: Node = serde_json::from_value(serde_json::json!({
			"id": "1",
			"label": "Web",
			"metadata": { "cpu": "4 cores", "replicas": 3, "tags": ["a", true], "extra": { "x": null } }
		}))
		.unwrap();
		let meta = node.metadata.unwrap();
		assert_eq!(meta["cpu"], MetadataValue::String("4 cores".into()));
		assert_eq!(meta["replicas"], MetadataValue::Number(3.into()));
		assert_eq!(
			meta["tags"],
			MetadataValue::List(vec![MetadataValue::String("a".into()), MetadataValue::Bool(true)])
		);
		let MetadataValue::Map(extra) = &meta["extra"] else {
			panic!("expected nested map");
		};
		assert_eq!(extra["x"], MetadataValue::Null);
	}

	#[test]
	fn node_types_are_distinct_in_first_seen_order() {
		let graph = GraphModel {
			nodes: vec![
				Node::new("1", "a").with_kind("server"),
				Node::new("2", "b"),
				Node::new("3", "c").with_kind("server"),
				Node::new("4", "d").with_kind("user"),
			],
			edges: vec![],
		};
		assert_eq!(graph.node_types(), vec!["server", "default", "user"]);
	}

	#[test]
	fn extra_members_replace_typed_fields_on_export() {
		let mut node = Node::new("1", "One");
		node.extra.insert("id".into(), serde_json::json!(1));
		node.extra.insert("owner".into(), serde_json::json!("ops"));
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(json, serde_json::json!({ "id": 1, "label": "One", "owner": "ops" }));
	}

	#[test]
	fn unknown_members_are_kept_on_deserialize() {
		let edge: Edge = serde_json::from_value(serde_json::json!({
			"id": "e", "source": "a", "target": "b", "animated": true
		}))
		.unwrap();
		assert_eq!(edge.extra["animated"], serde_json::json!(true));
		assert_eq!(edge.weight, None);
	}

	#[test]
	fn degree_reads_numeric_metadata() {
		assert_eq!(Node::new("a", "a").with_metadata("degree", 3.0).degree(), Some(3.0));
		assert_eq!(Node::new("a", "a").with_metadata("degree", "3").degree(), None);
		assert_eq!(Node::new("a", "a").degree(), None);
	}
}
