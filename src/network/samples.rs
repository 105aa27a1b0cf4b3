//! Built-in data behind the "Load sample" buttons.

use super::model::{Edge, GraphModel, Node};

/// Eight edges between seven hosts, with weight and label columns.
pub const SAMPLE_CSV: &str = "source,target,weight,label
Server1,Database1,5,SQL
Server1,Cache1,3,Redis
Server2,Database1,4,SQL
User1,Server1,2,HTTPS
User2,Server2,3,HTTPS
Cache1,Database1,2,Sync
Server1,API1,4,REST
API1,Database1,5,Query";

/// A small typed infrastructure graph.
pub fn sample_graph() -> GraphModel {
	GraphModel {
		nodes: vec![
			Node::new("1", "Web Server")
				.with_kind("server")
				.with_metadata("cpu", "4 cores")
				.with_metadata("ram", "16GB"),
			Node::new("2", "Database")
				.with_kind("database")
				.with_metadata("type", "PostgreSQL")
				.with_metadata("size", "100GB"),
			Node::new("3", "User Alice")
				.with_kind("user")
				.with_metadata("role", "admin")
				.with_metadata("lastLogin", "2024-01-15"),
			Node::new("4", "API Gateway")
				.with_kind("service")
				.with_metadata("version", "2.1.0"),
			Node::new("5", "Cache Server")
				.with_kind("server")
				.with_metadata("type", "Redis")
				.with_metadata("memory", "8GB"),
		],
		edges: vec![
			Edge::new("e1", "3", "1").with_label("HTTPS").with_weight(3.0).with_kind("strong"),
			Edge::new("e2", "1", "4").with_label("REST API").with_weight(2.0).with_kind("default"),
			Edge::new("e3", "4", "2").with_label("SQL").with_weight(4.0).with_kind("critical"),
			Edge::new("e4", "1", "5").with_label("Cache").with_weight(1.0).with_kind("weak"),
			Edge::new("e5", "5", "2").with_label("Sync").with_weight(2.0).with_kind("default"),
		],
	}
}
