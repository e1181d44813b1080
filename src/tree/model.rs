use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{EditError, EditResult};

/// Separator substituted for whitespace when deriving a node id from its title.
pub const ID_SEPARATOR: char = '-';

/// Derive the lookup id for a title: whitespace becomes [`ID_SEPARATOR`], then lowercase.
///
/// Relations are stored as titles, so every comparison against a placed node
/// goes through this function.
pub fn derive_id(title: &str) -> String {
	title
		.chars()
		.map(|c| if c.is_whitespace() { ID_SEPARATOR } else { c })
		.collect::<String>()
		.to_lowercase()
}

/// Visual classification of a node. Has no effect on layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
	/// Foundational technology other work builds on.
	#[default]
	CoreTechnology,
	/// Directly targets longevity.
	LongevityTech,
	/// Broad quality-of-life improvement.
	GeneralImprovement,
}

impl NodeType {
	/// Every variant, in legend order.
	pub const ALL: [NodeType; 3] = [
		NodeType::CoreTechnology,
		NodeType::LongevityTech,
		NodeType::GeneralImprovement,
	];

	/// Wire name, also used as the CSS class of the rendered node.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeType::CoreTechnology => "core-technology",
			NodeType::LongevityTech => "longevity-tech",
			NodeType::GeneralImprovement => "general-improvement",
		}
	}

	/// Human-readable label shown in the legend and type selector.
	pub fn label(self) -> &'static str {
		match self {
			NodeType::CoreTechnology => "Core Technology",
			NodeType::LongevityTech => "Longevity Tech",
			NodeType::GeneralImprovement => "General Improvement",
		}
	}
}

impl fmt::Display for NodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NodeType {
	type Err = EditError;

	/// Accepts either the wire name or the display label.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = derive_id(s.trim());
		NodeType::ALL
			.into_iter()
			.find(|t| t.as_str() == normalized)
			.ok_or_else(|| EditError::Validation(format!("unknown node type '{s}'")))
	}
}

/// A labeled entry of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
	pub title: String,
	#[serde(rename = "type")]
	pub kind: NodeType,
	/// Titles of the nodes this one follows. The first entry drives placement.
	#[serde(default)]
	pub relations: Vec<String>,
}

impl Node {
	/// A node with no relations.
	pub fn new(title: impl Into<String>, kind: NodeType) -> Self {
		Self {
			title: title.into(),
			kind,
			relations: Vec::new(),
		}
	}

	/// Builder-style relation list.
	pub fn with_relations<I, S>(mut self, relations: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.relations = relations.into_iter().map(Into::into).collect();
		self
	}

	pub fn id(&self) -> String {
		derive_id(&self.title)
	}

	/// True when the node has no backward relations and seeds its own row.
	pub fn is_starter(&self) -> bool {
		self.relations.is_empty()
	}

	/// The relation that decides where this node is placed.
	pub fn primary_relation(&self) -> Option<&str> {
		self.relations.first().map(String::as_str)
	}

	/// Relations joined the way the edit form displays them.
	pub fn relations_csv(&self) -> String {
		self.relations.join(", ")
	}
}

/// Split a comma separated relation list as typed in the edit form.
pub fn parse_relations_csv(csv: &str) -> Vec<String> {
	csv.split(',')
		.map(str::trim)
		.filter(|r| !r.is_empty())
		.map(str::to_owned)
		.collect()
}

/// A problem in the model that rendering tolerates but an editor should see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Diagnostic {
	/// Two or more titles normalize to the same id; the earliest wins alignment.
	DuplicateId { id: String, titles: Vec<String> },
	/// A node lists itself as a relation.
	SelfRelation { title: String },
	/// A relation names a title with no matching node.
	DanglingRelation { title: String, relation: String },
	/// Layout put two nodes at the same position. The greedy pass never
	/// rechecks records it scanned before aligning, so this can happen.
	Overlap { a: String, b: String },
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::DuplicateId { id, titles } => {
				write!(f, "duplicate id '{id}' shared by {}", titles.join(", "))
			}
			Diagnostic::SelfRelation { title } => write!(f, "'{title}' relates to itself"),
			Diagnostic::DanglingRelation { title, relation } => {
				write!(f, "'{title}' relates to missing node '{relation}'")
			}
			Diagnostic::Overlap { a, b } => write!(f, "'{a}' and '{b}' overlap"),
		}
	}
}

/// The ordered node sequence.
///
/// Order matters: it is the layout iteration order and decides where new
/// nodes are inserted. Every edit produces a new `Tree`; see [`super::edit`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
	nodes: Vec<Node>,
}

impl Tree {
	pub fn new(nodes: Vec<Node>) -> Self {
		Self { nodes }
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Find a node by exact title.
	pub fn get(&self, title: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.title == title)
	}

	/// Index of the first node with this exact title.
	pub fn position_of(&self, title: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.title == title)
	}

	/// Index of the first node whose derived id matches.
	pub fn position_of_id(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id() == id)
	}

	pub fn contains_title(&self, title: &str) -> bool {
		self.get(title).is_some()
	}

	pub fn into_nodes(self) -> Vec<Node> {
		self.nodes
	}

	/// Load a tree from the JSON array form used by the export.
	pub fn from_json(json: &str) -> EditResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Serialize as a JSON array of `{ title, type, relations }` records.
	pub fn to_json(&self) -> EditResult<String> {
		Ok(serde_json::to_string(self)?)
	}

	/// Problems the renderer degrades around instead of rejecting.
	pub fn diagnostics(&self) -> Vec<Diagnostic> {
		let mut out = Vec::new();
		let mut seen: Vec<(String, Vec<String>)> = Vec::new();
		for node in &self.nodes {
			let id = node.id();
			match seen.iter_mut().find(|(seen_id, _)| *seen_id == id) {
				Some((_, titles)) => titles.push(node.title.clone()),
				None => seen.push((id, vec![node.title.clone()])),
			}
		}
		out.extend(
			seen.into_iter()
				.filter(|(_, titles)| titles.len() > 1)
				.map(|(id, titles)| Diagnostic::DuplicateId { id, titles }),
		);

		let ids: HashSet<String> = self.nodes.iter().map(Node::id).collect();
		for node in &self.nodes {
			let own_id = node.id();
			for relation in &node.relations {
				let relation_id = derive_id(relation);
				if relation_id == own_id {
					out.push(Diagnostic::SelfRelation {
						title: node.title.clone(),
					});
				} else if !ids.contains(&relation_id) {
					out.push(Diagnostic::DanglingRelation {
						title: node.title.clone(),
						relation: relation.clone(),
					});
				}
			}
		}
		out
	}
}

impl From<Vec<Node>> for Tree {
	fn from(nodes: Vec<Node>) -> Self {
		Self::new(nodes)
	}
}
