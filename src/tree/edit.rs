//! The mutation protocol over [`Tree`].
//!
//! The free functions are pure transitions: they borrow the previous tree and
//! return a fresh one, leaving the original untouched. [`EditController`]
//! layers the editing session on top and is the only place that replaces the
//! current tree.

use log::{info, warn};

use super::error::{EditError, EditResult};
use super::model::{Node, NodeType, Tree, derive_id, parse_relations_csv};

/// Prefix of titles synthesized by [`insert_after`].
pub const DEFAULT_TITLE_PREFIX: &str = "Node";

/// Field values submitted from the edit form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDraft {
	pub title: String,
	pub kind: NodeType,
	pub relations: Vec<String>,
}

impl NodeDraft {
	/// Build a draft from the raw form inputs.
	pub fn from_form(title: &str, kind: &str, relations_csv: &str) -> EditResult<Self> {
		Ok(Self {
			title: title.trim().to_owned(),
			kind: kind.parse()?,
			relations: parse_relations_csv(relations_csv),
		})
	}

	fn validate(&self) -> EditResult<()> {
		if self.title.trim().is_empty() {
			return Err(EditError::Validation("title must not be empty".into()));
		}
		Ok(())
	}

	fn into_node(self) -> Node {
		Node {
			title: self.title.trim().to_owned(),
			kind: self.kind,
			relations: self.relations,
		}
	}
}

/// First free `"Node {k}"` title for a node inserted at `after_index + 1`.
///
/// Candidates start at `after_index + 1` (the new node's zero-based index)
/// and count upward, skipping any title whose id is already taken anywhere
/// in the tree.
pub fn default_title(tree: &Tree, after_index: usize) -> EditResult<String> {
	let start = after_index + 1;
	(start..=start + tree.len())
		.map(|k| format!("{DEFAULT_TITLE_PREFIX} {k}"))
		.find(|title| tree.position_of_id(&derive_id(title)).is_none())
		.ok_or_else(|| {
			EditError::InternalInvariant(format!(
				"no free default title after position {after_index}"
			))
		})
}

/// Insert a default node directly after `after_title`, relating back to it.
///
/// Returns the new tree and the synthesized title.
pub fn insert_after(tree: &Tree, after_title: &str) -> EditResult<(Tree, String)> {
	let index = tree
		.position_of(after_title)
		.ok_or_else(|| EditError::NodeNotFound(after_title.to_owned()))?;
	let title = default_title(tree, index)?;
	let created = Node::new(title.clone(), NodeType::CoreTechnology).with_relations([after_title]);

	let mut nodes = tree.nodes().to_vec();
	nodes.insert(index + 1, created);
	Ok((Tree::new(nodes), title))
}

/// Replace the node titled `old_title` with `draft`, keeping its index.
///
/// References to `old_title` in other nodes' relations are rewritten to the
/// new title.
pub fn replace(tree: &Tree, old_title: &str, draft: NodeDraft) -> EditResult<Tree> {
	draft.validate()?;
	let index = tree
		.position_of(old_title)
		.ok_or_else(|| EditError::NodeNotFound(old_title.to_owned()))?;
	let replacement = draft.into_node();

	let mut nodes: Vec<Node> = tree
		.nodes()
		.iter()
		.filter(|n| n.title != old_title)
		.map(|n| Node {
			relations: n
				.relations
				.iter()
				.map(|r| {
					if r == old_title {
						replacement.title.clone()
					} else {
						r.clone()
					}
				})
				.collect(),
			..n.clone()
		})
		.collect();
	nodes.insert(index.min(nodes.len()), replacement);
	Ok(Tree::new(nodes))
}

/// Remove every node titled `title`. Relations naming it are left dangling.
pub fn remove(tree: &Tree, title: &str) -> EditResult<Tree> {
	if !tree.contains_title(title) {
		return Err(EditError::NodeNotFound(title.to_owned()));
	}
	Ok(tree
		.nodes()
		.iter()
		.filter(|n| n.title != title)
		.cloned()
		.collect::<Vec<_>>()
		.into())
}

/// Remove every node whose derived id is `id`.
pub fn remove_id(tree: &Tree, id: &str) -> EditResult<Tree> {
	if tree.position_of_id(id).is_none() {
		return Err(EditError::NodeNotFound(id.to_owned()));
	}
	Ok(tree
		.nodes()
		.iter()
		.filter(|n| n.id() != id)
		.cloned()
		.collect::<Vec<_>>()
		.into())
}

/// The node currently open in the edit form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
	pub id: String,
	pub title: String,
	/// Created by [`EditController::create`] and not yet committed.
	pub is_new: bool,
}

impl EditSession {
	fn new(title: &str, is_new: bool) -> Self {
		Self {
			id: derive_id(title),
			title: title.to_owned(),
			is_new,
		}
	}
}

/// Owns the current tree and the single active edit session.
#[derive(Clone, Debug, Default)]
pub struct EditController {
	tree: Tree,
	editing: Option<EditSession>,
	made_changes: bool,
}

impl EditController {
	pub fn new(tree: Tree) -> Self {
		Self {
			tree,
			editing: None,
			made_changes: false,
		}
	}

	pub fn tree(&self) -> &Tree {
		&self.tree
	}

	pub fn editing(&self) -> Option<&EditSession> {
		self.editing.as_ref()
	}

	pub fn is_editing(&self, id: &str) -> bool {
		self.editing.as_ref().is_some_and(|s| s.id == id)
	}

	/// Whether a commit or delete has happened since load.
	pub fn made_changes(&self) -> bool {
		self.made_changes
	}

	/// Add a default node after `after_title` and open it for editing.
	///
	/// An open session is abandoned; an uncommitted node it created stays in
	/// the tree under its default title.
	pub fn create(&mut self, after_title: &str) -> EditResult<String> {
		let (tree, title) = insert_after(&self.tree, after_title)?;
		info!("created '{title}' after '{after_title}'");
		self.tree = tree;
		self.editing = Some(EditSession::new(&title, true));
		Ok(title)
	}

	/// Open an existing node in the edit form.
	pub fn begin_edit(&mut self, title: &str) -> EditResult<()> {
		if !self.tree.contains_title(title) {
			return Err(EditError::NodeNotFound(title.to_owned()));
		}
		self.editing = Some(EditSession::new(title, false));
		Ok(())
	}

	/// Apply `draft` to the node being edited and close the session.
	///
	/// On error the session stays open and the tree is unchanged.
	pub fn commit(&mut self, draft: NodeDraft) -> EditResult<()> {
		let session = self.editing.as_ref().ok_or(EditError::NoActiveEdit)?;
		let tree = replace(&self.tree, &session.title, draft).inspect_err(|err| {
			warn!("declined commit of '{}': {err}", session.title);
		})?;
		info!("committed edit of '{}'", session.title);
		self.tree = tree;
		self.editing = None;
		self.made_changes = true;
		Ok(())
	}

	/// Close the session, discarding the node if it was never committed.
	pub fn cancel(&mut self) -> EditResult<()> {
		let session = self.editing.take().ok_or(EditError::NoActiveEdit)?;
		if session.is_new {
			info!("discarded new node '{}'", session.title);
			self.tree = remove_id(&self.tree, &session.id)?;
		}
		Ok(())
	}

	/// Delete every node titled `title`.
	pub fn delete(&mut self, title: &str) -> EditResult<()> {
		self.tree = remove(&self.tree, title)?;
		info!("deleted '{title}'");
		if self.editing.as_ref().is_some_and(|s| s.title == title) {
			self.editing = None;
		}
		self.made_changes = true;
		Ok(())
	}
}
