//! Canonical graph payload and the shape shim that produces it.
//!
//! The mining backend has shipped several response shapes over time:
//!
//! 1. `{ "nodes": [...], "links": [...] }`
//! 2. `{ "nodes": [...], "edges": [...] }`
//! 3. a bare array of links
//! 4. anything else, searched for `nodes`/`node_list` and `links`/`edges`/`edge_list`
//!
//! Node and link records are passed through untouched; only the container is
//! reshaped. A field counts as present when it is set to anything other than
//! `null`, `false`, `0` or `""`. A present field that is not an array yields an
//! empty sequence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the rendering surface consumes. Both sequences are always present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
	/// Opaque node records, minimally `{ "id": ... }`.
	#[serde(default)]
	pub nodes: Vec<Value>,
	/// Opaque link records between node ids.
	#[serde(default)]
	pub links: Vec<Value>,
}

impl GraphPayload {
	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

/// True for bodies that carry no data at all: `null`, `false`, `0`, `""` or `[]`.
pub fn is_blank(body: &Value) -> bool {
	match body {
		Value::Array(items) => items.is_empty(),
		other => !is_truthy(other),
	}
}

/// Reshape a parsed success body into a [`GraphPayload`].
pub fn normalize(body: &Value) -> GraphPayload {
	if let Value::Array(items) = body {
		return GraphPayload {
			nodes: Vec::new(),
			links: items.clone(),
		};
	}

	let nodes = field(body, "nodes");
	let links = field(body, "links");
	let edges = field(body, "edges");

	let (nodes, links) = match (nodes, links, edges) {
		(Some(nodes), Some(links), _) => (Some(nodes), Some(links)),
		(Some(nodes), None, Some(edges)) => (Some(nodes), Some(edges)),
		_ => (
			first_present(body, &["nodes", "node_list"]),
			first_present(body, &["links", "edges", "edge_list"]),
		),
	};

	GraphPayload {
		nodes: sequence(nodes),
		links: sequence(links),
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

fn field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
	body.get(key).filter(|v| is_truthy(v))
}

fn first_present<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Value> {
	keys.iter().find_map(|key| field(body, key))
}

fn sequence(value: Option<&Value>) -> Vec<Value> {
	match value {
		Some(Value::Array(items)) => items.clone(),
		_ => Vec::new(),
	}
}
