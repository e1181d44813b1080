//! Serialized form handed to the submission collaborator.
//!
//! Nothing here talks to the network: the payload describes the pull request
//! that the collaborator opens against the data repository.

use serde::Serialize;

use super::error::{EditError, EditResult};
use super::model::Tree;

/// Branch the pull request targets.
pub const BASE_BRANCH: &str = "staging";
/// File in the data repository that holds the tree.
pub const DATA_FILE_PATH: &str = "src/Data.js";

/// Wrap the tree JSON as the data module the site imports.
pub fn data_module(tree: &Tree) -> EditResult<String> {
	Ok(format!("const Data={}; export default Data;", tree.to_json()?))
}

/// Contact details the editor supplies before submitting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
	pub name: String,
	pub email: String,
}

impl SubmissionDraft {
	/// Both fields are filled in.
	pub fn is_complete(&self) -> bool {
		!self.name.trim().is_empty() && !self.email.trim().is_empty()
	}
}

/// Everything needed to open the pull request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
	pub title: String,
	pub body: String,
	pub base: String,
	pub head: String,
	pub commit_message: String,
	pub path: String,
	pub content: String,
}

/// Build the payload for `tree`; `timestamp_ms` makes the head branch unique.
pub fn submission_payload(
	tree: &Tree,
	draft: &SubmissionDraft,
	timestamp_ms: u64,
) -> EditResult<SubmissionPayload> {
	if !draft.is_complete() {
		return Err(EditError::Validation(
			"name and email are required to submit".into(),
		));
	}
	let name = draft.name.trim();
	Ok(SubmissionPayload {
		title: format!("Tech Tree Changes from {name}"),
		body: format!("Submitted from {}", draft.email.trim()),
		base: BASE_BRANCH.to_owned(),
		head: format!("tree-change/{}-{timestamp_ms}", name.replacen(' ', "-", 1)),
		commit_message: format!("Tech tree changes from {name}"),
		path: DATA_FILE_PATH.to_owned(),
		content: data_module(tree)?,
	})
}
