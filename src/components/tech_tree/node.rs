use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::connectors::{Carets, Connectors};
use super::state::{TreeState, type_options};
use crate::tree::PlacedNode;

/// One positioned node with its connectors, carets and edit controls.
#[component]
pub fn TreeNode(state: TreeState, placed: PlacedNode) -> impl IntoView {
	let PlacedNode {
		node,
		id,
		position,
		connectors,
	} = placed;
	let anchors: Vec<f64> = connectors.iter().map(|c| c.anchor_offset).collect();
	let kind = node.kind.as_str();
	let title = node.title;

	let editing = {
		let id = id.clone();
		Signal::derive(move || state.is_editing(&id))
	};
	let show_form = move || state.edit_mode.get() && editing.get();

	let node_ref = NodeRef::<leptos::html::Div>::new();
	Effect::new(move |_| {
		if !editing.get() {
			return;
		}
		if let Some(el) = node_ref.get() {
			let options = ScrollIntoViewOptions::new();
			options.set_behavior(ScrollBehavior::Smooth);
			options.set_block(ScrollLogicalPosition::Center);
			el.scroll_into_view_with_scroll_into_view_options(&options);
		}
	});

	let label = title.clone();
	view! {
		<div>
			<Connectors connectors=connectors />
			<div
				node_ref=node_ref
				class=move || format!("node {kind} {}", if editing.get() { "top" } else { "" })
				id=id
				style=format!("top: {}px; left: {}px;", position.top, position.left)
			>
				{move || {
					if show_form() {
						view! { <EditInputs state=state /> }.into_any()
					} else {
						label.clone().into_any()
					}
				}}
				<Carets anchors=anchors />
				<Show when=move || state.edit_mode.get()>
					<EditIcons state=state title=title.clone() editing=editing />
				</Show>
			</div>
		</div>
	}
}

#[component]
fn EditInputs(state: TreeState) -> impl IntoView {
	view! {
		<div class="edit-inputs">
			<label for="title">"Title:"</label>
			<input
				id="title"
				type="text"
				prop:value=move || state.form.with(|f| f.title.clone())
				on:input=move |ev| state.form.update(|f| f.title = event_target_value(&ev))
			/>
			<label for="relations">"Relations (separate by commas):"</label>
			<input
				id="relations"
				type="text"
				prop:value=move || state.form.with(|f| f.relations.clone())
				on:input=move |ev| state.form.update(|f| f.relations = event_target_value(&ev))
			/>
			<label for="type">"Type:"</label>
			<select
				id="type"
				on:change=move |ev| state.form.update(|f| f.kind = event_target_value(&ev))
			>
				{type_options()
					.map(|(value, label)| {
						view! {
							<option
								value=value
								selected=move || state.form.with(|f| f.selects(value))
							>
								{label}
							</option>
						}
					})
					.collect_view()}
			</select>
			{move || state.error.get().map(|message| view! { <p class="edit-error">{message}</p> })}
		</div>
	}
}

#[component]
fn EditIcons(state: TreeState, title: String, editing: Signal<bool>) -> impl IntoView {
	view! {
		<div class="edit-icons">
			{move || {
				if editing.get() {
					view! {
						<i class="fa fa-check" on:click=move |_| state.commit() />
						<i class="fa fa-ban" on:click=move |_| state.cancel() />
					}
						.into_any()
				} else {
					let (create, edit, delete) = (title.clone(), title.clone(), title.clone());
					view! {
						<i class="fa fa-plus" on:click=move |_| state.create(&create) />
						<i class="fa fa-pencil" on:click=move |_| state.begin_edit(&edit) />
						<i class="fa fa-trash" on:click=move |_| state.delete(&delete) />
					}
						.into_any()
				}
			}}
		</div>
	}
}
