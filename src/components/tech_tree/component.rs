use leptos::prelude::*;

use super::node::TreeNode;
use super::state::TreeState;
use crate::tree::NodeType;

/// The interactive tree: nodes at their computed positions plus edit chrome.
#[component]
pub fn TechTree(state: TreeState) -> impl IntoView {
	let nodes = move || {
		state
			.plan
			.get()
			.nodes
			.into_iter()
			.map(|placed| view! { <TreeNode state=state placed=placed /> })
			.collect_view()
	};
	let spacer = move || format!("height: {}px;", state.plan.with(|p| p.spacer_height));

	view! {
		<div class=move || {
			if state.edit_mode.get() { "tree editing" } else { "tree viewing" }
		}>
			<div class="sections">
				<EditCover state=state />
				<div class="nodes">
					{nodes}
					<div class="node-height" style=spacer></div>
				</div>
			</div>
		</div>
	}
}

/// Colour key for the node types.
#[component]
pub fn Legend() -> impl IntoView {
	let color = |kind: NodeType| match kind {
		NodeType::CoreTechnology => "blue",
		NodeType::LongevityTech => "purple",
		NodeType::GeneralImprovement => "yellow",
	};
	view! {
		<div class="header-block">
			<h4>"Key:"</h4>
			<br />
			{NodeType::ALL
				.into_iter()
				.map(|kind| view! { <div class=format!("key {}", color(kind))>{kind.label()}</div> })
				.collect_view()}
		</div>
	}
}

/// Edit mode toggle and, once something changed, the submission form.
#[component]
fn EditCover(state: TreeState) -> impl IntoView {
	let show_submit = move || state.edit_mode.get() && state.made_changes();
	let submit_class = move || {
		if state.can_submit() { "submit" } else { "submit disabled" }
	};

	view! {
		<div class="edit-cover">
			<Show when=show_submit>
				<div class="submit-cover">
					<input
						type="text"
						id="name"
						placeholder="Name"
						on:input=move |ev| state.submission.update(|s| s.name = event_target_value(&ev))
					/>
					<input
						type="email"
						id="email"
						placeholder="Email"
						on:input=move |ev| state.submission.update(|s| s.email = event_target_value(&ev))
					/>
					<div
						class=submit_class
						on:click=move |_| {
							if state.can_submit() {
								state.prepare_submission();
							}
						}
					>
						"Submit "
						<i class="fa fa-check" />
					</div>
				</div>
			</Show>
			<div class="edit" on:click=move |_| state.toggle_edit_mode()>
				{move || {
					if state.edit_mode.get() {
						view! {
							<p>"View Mode"</p>
							<i class="fa fa-eye" />
						}
							.into_any()
					} else {
						view! {
							<p>"Edit Mode"</p>
							<i class="fa fa-network-wired" />
						}
							.into_any()
					}
				}}
			</div>
			<SubmissionReview state=state />
		</div>
	}
}

/// Shows a prepared pull request for the submission collaborator to send.
#[component]
fn SubmissionReview(state: TreeState) -> impl IntoView {
	move || {
		state.payload.get().map(|payload| {
			view! {
				<div class="success">
					<h1>"Submission prepared"</h1>
					<p>{payload.title}</p>
					<p>{format!("{} → {}", payload.head, payload.base)}</p>
					<textarea readonly=true prop:value=payload.content></textarea>
					<div class="success-buttons">
						<button on:click=move |_| state.payload.set(None)>"Return to Tree"</button>
					</div>
				</div>
			}
		})
	}
}
