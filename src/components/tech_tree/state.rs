use leptos::prelude::*;
use log::{info, warn};

use crate::tree::edit::NodeDraft;
use crate::tree::export::{SubmissionDraft, SubmissionPayload, submission_payload};
use crate::tree::{
	EditController, EditResult, LayoutParameters, Node, NodeType, RenderPlan, RouteParameters,
	Tree,
};

/// Raw contents of the edit form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditForm {
	pub title: String,
	pub kind: String,
	pub relations: String,
}

impl EditForm {
	fn from_node(node: &Node) -> Self {
		Self {
			title: node.title.clone(),
			kind: node.kind.as_str().to_owned(),
			relations: node.relations_csv(),
		}
	}

	/// Whether the type selector option `value` shows the form's type.
	pub fn selects(&self, value: &str) -> bool {
		match (self.kind.parse::<NodeType>(), value.parse::<NodeType>()) {
			(Ok(kind), Ok(option)) => kind == option,
			_ => false,
		}
	}
}

/// Reactive handles shared by every tree component.
#[derive(Clone, Copy)]
pub struct TreeState {
	pub controller: RwSignal<EditController>,
	pub plan: Memo<RenderPlan>,
	pub edit_mode: RwSignal<bool>,
	pub form: RwSignal<EditForm>,
	/// Message of the last declined operation.
	pub error: RwSignal<Option<String>>,
	pub submission: RwSignal<SubmissionDraft>,
	pub payload: RwSignal<Option<SubmissionPayload>>,
}

impl TreeState {
	pub fn new(tree: Tree, layout: LayoutParameters, route: RouteParameters) -> Self {
		let controller = RwSignal::new(EditController::new(tree));
		let plan = Memo::new(move |_| {
			controller.with(|c| RenderPlan::build(c.tree(), &layout, &route))
		});
		Self {
			controller,
			plan,
			edit_mode: RwSignal::new(false),
			form: RwSignal::new(EditForm::default()),
			error: RwSignal::new(None),
			submission: RwSignal::new(SubmissionDraft::default()),
			payload: RwSignal::new(None),
		}
	}

	/// Run `op` against the controller, surfacing a failure in [`Self::error`].
	fn apply<R>(&self, op: impl FnOnce(&mut EditController) -> EditResult<R>) -> Option<R> {
		let mut outcome = None;
		self.controller.update(|c| outcome = Some(op(c)));
		match outcome? {
			Ok(value) => {
				self.error.set(None);
				Some(value)
			}
			Err(err) => {
				warn!("{err}");
				self.error.set(Some(err.to_string()));
				None
			}
		}
	}

	fn load_form(&self, title: &str) {
		let form = self
			.controller
			.with_untracked(|c| c.tree().get(title).map(EditForm::from_node));
		if let Some(form) = form {
			self.form.set(form);
		}
	}

	pub fn is_editing(&self, id: &str) -> bool {
		self.controller.with(|c| c.is_editing(id))
	}

	pub fn made_changes(&self) -> bool {
		self.controller.with(|c| c.made_changes())
	}

	pub fn toggle_edit_mode(&self) {
		self.edit_mode.update(|on| *on = !*on);
	}

	pub fn create(&self, after: &str) {
		if let Some(title) = self.apply(|c| c.create(after)) {
			self.load_form(&title);
		}
	}

	pub fn begin_edit(&self, title: &str) {
		if self.apply(|c| c.begin_edit(title)).is_some() {
			self.load_form(title);
		}
	}

	pub fn commit(&self) {
		let draft = self
			.form
			.with_untracked(|f| NodeDraft::from_form(&f.title, &f.kind, &f.relations));
		match draft {
			Ok(draft) => {
				self.apply(|c| c.commit(draft));
			}
			Err(err) => {
				warn!("declined commit: {err}");
				self.error.set(Some(err.to_string()));
			}
		}
	}

	pub fn cancel(&self) {
		self.apply(|c| c.cancel());
		self.error.set(None);
	}

	pub fn delete(&self, title: &str) {
		self.apply(|c| c.delete(title));
	}

	pub fn can_submit(&self) -> bool {
		self.submission.with(|s| s.is_complete())
	}

	/// Assemble the pull request payload for the current tree.
	pub fn prepare_submission(&self) {
		let timestamp = js_sys::Date::now() as u64;
		let prepared = self.controller.with_untracked(|c| {
			self.submission
				.with_untracked(|draft| submission_payload(c.tree(), draft, timestamp))
		});
		match prepared {
			Ok(payload) => {
				info!("prepared submission on branch '{}'", payload.head);
				self.payload.set(Some(payload));
			}
			Err(err) => {
				warn!("{err}");
				self.error.set(Some(err.to_string()));
			}
		}
	}
}

/// Options for the type selector, in legend order.
pub fn type_options() -> impl Iterator<Item = (&'static str, &'static str)> {
	NodeType::ALL.into_iter().map(|t| (t.as_str(), t.label()))
}
