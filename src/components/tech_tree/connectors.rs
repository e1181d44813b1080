use leptos::prelude::*;

use crate::tree::Connector;

/// Offset applied to every connector so lines meet the node's visible border.
const CONNECTOR_MARGIN_TOP: f64 = 7.0;
/// `(begin, duration)` in seconds for out, across and in.
const REVEAL: [(f64, f64); 3] = [(0.0, 2.0), (2.0, 1.0), (3.0, 0.5)];

/// Elbow lines for one node's incoming relations.
#[component]
pub fn Connectors(connectors: Vec<Connector>) -> impl IntoView {
	connectors
		.into_iter()
		.map(|connector| {
			let lines = connector
				.segments
				.iter()
				.zip(REVEAL)
				.enumerate()
				.map(|(i, (segment, (begin, duration)))| {
					view! {
						<line
							class=format!("segment segment-{}", i + 1)
							x1=segment.from.x.to_string()
							y1=segment.from.y.to_string()
							x2=segment.to.x.to_string()
							y2=segment.to.y.to_string()
							stroke-width="2"
							stroke-opacity=connector.weight.to_string()
							style=format!("animation-delay: {begin}s; animation-duration: {duration}s;")
						/>
					}
				})
				.collect_view();
			view! {
				<svg
					class="connector"
					data-source=connector.source_id.clone()
					style=format!("margin-top: {CONNECTOR_MARGIN_TOP}px;")
				>
					{lines}
				</svg>
			}
		})
		.collect_view()
}

/// Inbound caret markers on the node's left border.
#[component]
pub fn Carets(anchors: Vec<f64>) -> impl IntoView {
	anchors
		.into_iter()
		.map(|top| view! { <i class="fa fa-caret-right caret" style=format!("top: {top}px;") /> })
		.collect_view()
}
