use leptos::prelude::*;
use log::error;

use crate::components::tech_tree::{Legend, TechTree, TreeState};
use crate::tree::{LayoutParameters, RouteParameters, Tree, seed};

/// Load the bundled tree, falling back to an empty one if it fails to parse.
fn initial_tree() -> Tree {
	seed().unwrap_or_else(|err| {
		error!("failed to load initial tree: {err}");
		Tree::default()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let state = TreeState::new(
		initial_tree(),
		LayoutParameters::default(),
		RouteParameters::default(),
	);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="header">
				<div class="header-block">
					<h1>"Longevity Tech Tree"</h1>
					<h3>"Prototype v0.1"</h3>
				</div>
				<Legend />
			</div>
			<TechTree state=state />
		</ErrorBoundary>
	}
}
