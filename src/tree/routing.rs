//! Elbow connectors from relation sources into a target node.

use serde::Serialize;

use super::layout::{ConnectorEdge, Position};
use super::params::{LayoutParameters, RouteParameters};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A straight line piece of a connector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
	pub from: Point,
	pub to: Point,
}

/// One routed incoming relation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Connector {
	pub source_id: String,
	/// Distance below the target's top border where the connector and its caret land.
	pub anchor_offset: f64,
	/// Stroke opacity, fading with vertical distance.
	pub weight: f64,
	/// Out, across, in. Renderers reveal them in this order.
	pub segments: [Segment; 3],
}

/// Opacity for a connector spanning `distance` rows of layout units.
pub fn weight_for(distance: f64) -> f64 {
	match distance.abs() {
		d if d < 200.0 => 1.0,
		d if d < 400.0 => 0.75,
		d if d < 600.0 => 0.5,
		_ => 0.25,
	}
}

/// Anchor offsets for `count` connectors, centered on the node's height.
pub fn anchor_offsets(count: usize, params: &RouteParameters) -> Vec<f64> {
	let first = (params.node_height - count as f64 * params.marker_height) / 2.0;
	(0..count)
		.map(|i| first + i as f64 * params.marker_height)
		.collect()
}

/// Route every incoming edge of the node placed at `target`.
///
/// Output order follows `incoming`; the function reads nothing but its
/// arguments, so repeated calls agree.
pub fn route(
	target: Position,
	incoming: &[ConnectorEdge],
	layout: &LayoutParameters,
	params: &RouteParameters,
) -> Vec<Connector> {
	incoming
		.iter()
		.zip(anchor_offsets(incoming.len(), params))
		.map(|(edge, anchor)| {
			let elbow_x = target.left - (anchor + params.elbow_gap);
			let source_y = edge.source.top + anchor;
			let target_y = target.top + anchor;
			let source_right = edge.source.left + layout.label_width(&edge.source_id);

			Connector {
				source_id: edge.source_id.clone(),
				anchor_offset: anchor,
				weight: weight_for(target.top - edge.source.top),
				segments: [
					Segment {
						from: Point::new(source_right, source_y),
						to: Point::new(elbow_x, source_y),
					},
					Segment {
						from: Point::new(elbow_x, source_y),
						to: Point::new(elbow_x, target_y),
					},
					Segment {
						from: Point::new(elbow_x, target_y),
						to: Point::new(target.left, target_y),
					},
				],
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn edge(id: &str, top: f64, left: f64) -> ConnectorEdge {
		ConnectorEdge {
			source_id: id.into(),
			source: Position::new(top, left),
		}
	}

	#[test]
	fn weight_breakpoints() {
		assert_eq!(weight_for(0.0), 1.0);
		assert_eq!(weight_for(199.0), 1.0);
		assert_eq!(weight_for(200.0), 0.75);
		assert_eq!(weight_for(-399.0), 0.75);
		assert_eq!(weight_for(400.0), 0.5);
		assert_eq!(weight_for(600.0), 0.25);
		assert_eq!(weight_for(-5000.0), 0.25);
	}

	#[test]
	fn weight_never_increases_with_distance() {
		let weights: Vec<f64> = (0..80).map(|d| weight_for(d as f64 * 10.0)).collect();
		assert!(weights.windows(2).all(|w| w[1] <= w[0]));
	}

	#[test]
	fn anchors_are_centered_and_stacked() {
		let params = RouteParameters::default();
		assert_eq!(anchor_offsets(1, &params), vec![17.5]);
		assert_eq!(anchor_offsets(3, &params), vec![5.5, 17.5, 29.5]);
		assert!(anchor_offsets(0, &params).is_empty());
	}

	#[test]
	fn single_edge_forms_an_elbow() {
		let target = Position::new(200.0, 110.0);
		let routed = route(
			target,
			&[edge("a", 100.0, 0.0)],
			&LayoutParameters::default(),
			&RouteParameters::default(),
		);
		assert_eq!(routed.len(), 1);
		let c = &routed[0];
		assert_eq!(c.weight, 1.0);
		assert_eq!(c.anchor_offset, 17.5);
		let [out, across, into] = c.segments;
		assert_eq!(out.from, Point::new(10.0, 117.5));
		assert_eq!(out.to, Point::new(57.5, 117.5));
		assert_eq!(across.from, out.to);
		assert_eq!(across.to, Point::new(57.5, 217.5));
		assert_eq!(into.from, across.to);
		assert_eq!(into.to, Point::new(110.0, 217.5));
	}

	#[test]
	fn long_edges_fade_and_keep_input_order() {
		let target = Position::new(800.0, 300.0);
		let routed = route(
			target,
			&[edge("far", 100.0, 0.0), edge("near", 700.0, 0.0)],
			&LayoutParameters::default(),
			&RouteParameters::default(),
		);
		let summary: Vec<(&str, f64)> = routed
			.iter()
			.map(|c| (c.source_id.as_str(), c.weight))
			.collect();
		assert_eq!(summary, vec![("far", 0.25), ("near", 1.0)]);
		assert_eq!(routed[1].anchor_offset - routed[0].anchor_offset, 12.0);
	}

	#[test]
	fn routing_is_reproducible() {
		let incoming = [edge("a", 100.0, 0.0), edge("b", 300.0, 0.0)];
		let target = Position::new(300.0, 110.0);
		let (layout, params) = (LayoutParameters::default(), RouteParameters::default());
		assert_eq!(
			route(target, &incoming, &layout, &params),
			route(target, &incoming, &layout, &params)
		);
	}
}
