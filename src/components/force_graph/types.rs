//! Typed graph input for the canvas, built from the opaque payload records.

use std::collections::HashSet;

use log::warn;
use serde_json::Value;

use crate::api::GraphPayload;

/// A GitHub user in the community graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// GitHub login. Used to reference nodes in links.
	pub id: String,
	/// Community the user was clustered into.
	pub group: Option<i64>,
	/// Display name of the community.
	pub group_name: Option<String>,
	/// Sizing weight; larger values draw larger nodes.
	pub val: Option<f64>,
}

impl GraphNode {
	/// A node known only by its id.
	pub fn bare(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			group: None,
			group_name: None,
			val: None,
		}
	}

	/// Hover text: the login, then the community name or number, or `?` for a
	/// node with neither.
	pub fn tooltip(&self) -> String {
		match (&self.group_name, self.group) {
			(Some(name), _) => format!("{}\nCommunity: {}", self.id, name),
			(None, Some(group)) => format!("{}\nCommunity: Group {}", self.id, group),
			(None, None) => format!("{}\nCommunity: Group ?", self.id),
		}
	}

	/// Profile page opened when the node is clicked.
	pub fn profile_url(&self) -> String {
		format!("https://github.com/{}", self.id)
	}

	fn from_record(record: &Value) -> Option<Self> {
		Some(Self {
			id: endpoint_id(record)?,
			group: record.get("group").and_then(as_group),
			group_name: record
				.get("group_name")
				.and_then(Value::as_str)
				.filter(|name| !name.is_empty())
				.map(String::from),
			val: record.get("val").and_then(Value::as_f64),
		})
	}
}

/// An edge between two users, drawn with an arrow at `target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

impl GraphLink {
	fn from_record(record: &Value) -> Option<Self> {
		Some(Self {
			source: endpoint_id(record.get("source")?)?,
			target: endpoint_id(record.get("target")?)?,
		})
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes in payload order, then any implied by links.
	pub nodes: Vec<GraphNode>,
	/// Links whose endpoints could be read.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Read what can be drawn from a payload.
	///
	/// Records without a usable id are skipped. A link endpoint with no
	/// matching node gets a bare node, so link-only payloads still render.
	pub fn from_payload(payload: &GraphPayload) -> Self {
		let mut nodes: Vec<GraphNode> = Vec::with_capacity(payload.nodes.len());
		let mut seen = HashSet::new();
		for record in &payload.nodes {
			match GraphNode::from_record(record) {
				Some(node) if seen.insert(node.id.clone()) => nodes.push(node),
				Some(node) => warn!("cosmic-network: duplicate node {}", node.id),
				None => warn!("cosmic-network: skipping node without id: {}", record),
			}
		}

		let mut links = Vec::with_capacity(payload.links.len());
		for record in &payload.links {
			let Some(link) = GraphLink::from_record(record) else {
				warn!("cosmic-network: skipping malformed link: {}", record);
				continue;
			};
			for id in [&link.source, &link.target] {
				if seen.insert(id.clone()) {
					nodes.push(GraphNode::bare(id.clone()));
				}
			}
			links.push(link);
		}

		Self { nodes, links }
	}
}

/// A node reference is a string, a number, or an object carrying `id`.
fn endpoint_id(value: &Value) -> Option<String> {
	match value {
		Value::String(s) if !s.is_empty() => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Object(fields) => fields.get("id").and_then(endpoint_id),
		_ => None,
	}
}

fn as_group(value: &Value) -> Option<i64> {
	value
		.as_i64()
		.or_else(|| value.as_f64().map(|f| f as i64))
		.or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn reads_known_node_fields() {
		let payload = GraphPayload {
			nodes: vec![json!({"id": "octocat", "group": 2, "group_name": "Cats", "val": 9, "extra": true})],
			links: vec![],
		};
		let data = GraphData::from_payload(&payload);
		assert_eq!(
			data.nodes,
			vec![GraphNode {
				id: "octocat".into(),
				group: Some(2),
				group_name: Some("Cats".into()),
				val: Some(9.0),
			}]
		);
	}

	#[test]
	fn link_only_payload_implies_nodes() {
		let payload = GraphPayload {
			nodes: vec![],
			links: vec![json!({"source": "a", "target": "b"}), json!({"source": "b", "target": "a"})],
		};
		let data = GraphData::from_payload(&payload);
		let ids: Vec<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b"]);
		assert_eq!(data.links.len(), 2);
	}

	#[test]
	fn endpoints_may_be_objects_or_numbers() {
		let payload = GraphPayload {
			nodes: vec![json!({"id": 7}), json!({"id": "x"})],
			links: vec![json!({"source": {"id": "x"}, "target": 7})],
		};
		let data = GraphData::from_payload(&payload);
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(
			data.links,
			vec![GraphLink {
				source: "x".into(),
				target: "7".into()
			}]
		);
	}

	#[test]
	fn malformed_records_are_skipped() {
		let payload = GraphPayload {
			nodes: vec![json!({"name": "no id"}), json!({"id": "a"}), json!({"id": "a"})],
			links: vec![json!({"source": "a"}), json!("a->b")],
		};
		let data = GraphData::from_payload(&payload);
		assert_eq!(data.nodes, vec![GraphNode::bare("a")]);
		assert!(data.links.is_empty());
	}

	#[test]
	fn tooltip_prefers_group_name() {
		let mut node = GraphNode::bare("octocat");
		node.group = Some(3);
		assert_eq!(node.tooltip(), "octocat\nCommunity: Group 3");
		node.group_name = Some("Rustaceans".into());
		assert_eq!(node.tooltip(), "octocat\nCommunity: Rustaceans");
	}

	#[test]
	fn tooltip_for_ungrouped_node() {
		assert_eq!(GraphNode::bare("hubot").tooltip(), "hubot\nCommunity: Group ?");
	}

	#[test]
	fn profile_url() {
		assert_eq!(GraphNode::bare("octocat").profile_url(), "https://github.com/octocat");
	}
}
