//! Greedy single-pass placement of the ordered node sequence.
//!
//! Starters (nodes without relations) open a new row at `left = 0`. Every
//! other node is aligned to the right of its primary relation, then pushed
//! down past any already placed node occupying the same row. The pass is a
//! fold over the sequence, so identical input always yields identical output.

use log::debug;
use serde::Serialize;

use super::model::{Diagnostic, Node, Tree, derive_id};
use super::params::LayoutParameters;

/// Top-left corner of a node in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Position {
	pub top: f64,
	pub left: f64,
}

impl Position {
	pub fn new(top: f64, left: f64) -> Self {
		Self { top, left }
	}
}

/// Source end of one incoming relation, captured while the target was placed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConnectorEdge {
	pub source_id: String,
	pub source: Position,
}

/// Result of placing a single node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
	pub id: String,
	pub position: Position,
	/// One entry per relation that matched an earlier node, in scan order.
	pub incoming: Vec<ConnectorEdge>,
}

/// Positions for a whole tree, index-aligned with [`Tree::nodes`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Layout {
	pub placements: Vec<Placement>,
	pub starter_count: usize,
	/// Height the renderer reserves after the last node for the tallest column.
	pub spacer_height: f64,
}

impl Layout {
	/// Pairs of placements sharing an identical position, by id.
	pub fn overlaps(&self) -> Vec<Diagnostic> {
		self.placements
			.iter()
			.enumerate()
			.flat_map(|(i, a)| {
				self.placements[i + 1..]
					.iter()
					.filter(move |b| b.position == a.position)
					.map(move |b| Diagnostic::Overlap {
						a: a.id.clone(),
						b: b.id.clone(),
					})
			})
			.collect()
	}
}

#[derive(Clone, Debug)]
struct LocationRecord {
	id: String,
	position: Position,
}

/// Accumulator threaded through the fold.
#[derive(Default)]
struct Pass {
	records: Vec<LocationRecord>,
	placements: Vec<Placement>,
	starter_count: usize,
}

impl Pass {
	fn place(mut self, node: &Node, params: &LayoutParameters) -> Self {
		let id = node.id();
		let fallback = params.pixel_spacing * (self.starter_count + 1) as f64;
		let mut incoming = Vec::new();

		let position = match node.primary_relation() {
			None => {
				self.starter_count += 1;
				Position::new(fallback, 0.0)
			}
			Some(primary) => {
				let primary_id = derive_id(primary);
				let relation_ids: Vec<String> =
					node.relations.iter().map(|r| derive_id(r)).collect();
				let mut candidate = Position::new(fallback, fallback);
				let (mut aligned, mut reserved) = (false, false);

				for placed in &self.records {
					if !aligned && placed.id == primary_id {
						// first match wins when ids are duplicated
						candidate = Position::new(
							placed.position.top,
							placed.position.left
								+ params.label_width(&placed.id)
								+ params.pixel_spacing,
						);
						aligned = true;
					} else if placed.position.top == candidate.top {
						candidate.top += params.pixel_spacing;
						if placed.position.left == candidate.left && !reserved {
							self.starter_count += 1;
							reserved = true;
						}
					}

					incoming.extend(
						relation_ids
							.iter()
							.filter(|rid| **rid == placed.id)
							.map(|_| ConnectorEdge {
								source_id: placed.id.clone(),
								source: placed.position,
							}),
					);
				}
				candidate
			}
		};

		self.records.push(LocationRecord {
			id: id.clone(),
			position,
		});
		self.placements.push(Placement {
			id,
			position,
			incoming,
		});
		self
	}
}

/// Place every node of `tree`.
pub fn layout(tree: &Tree, params: &LayoutParameters) -> Layout {
	let pass = tree
		.nodes()
		.iter()
		.fold(Pass::default(), |pass, node| pass.place(node, params));

	debug!(
		"laid out {} nodes across {} starter rows",
		pass.placements.len(),
		pass.starter_count
	);

	Layout {
		spacer_height: pass.starter_count as f64 * (params.pixel_spacing + params.spacer_padding),
		starter_count: pass.starter_count,
		placements: pass.placements,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tree::model::NodeType;

	fn node(title: &str, relations: &[&str]) -> Node {
		Node::new(title, NodeType::CoreTechnology).with_relations(relations.iter().copied())
	}

	fn positions(layout: &Layout) -> Vec<(f64, f64)> {
		layout
			.placements
			.iter()
			.map(|p| (p.position.top, p.position.left))
			.collect()
	}

	#[test]
	fn empty_tree_has_no_placements() {
		let out = layout(&Tree::default(), &LayoutParameters::default());
		assert!(out.placements.is_empty());
		assert_eq!(out.spacer_height, 0.0);
	}

	#[test]
	fn starters_stack_in_rows_at_left_zero() {
		let tree = Tree::new(vec![node("A", &[]), node("B", &[]), node("C", &[])]);
		let out = layout(&tree, &LayoutParameters::default());
		assert_eq!(positions(&out), vec![(100.0, 0.0), (200.0, 0.0), (300.0, 0.0)]);
		assert_eq!(out.starter_count, 3);
		assert_eq!(out.spacer_height, 301.5);
	}

	#[test]
	fn siblings_align_then_push_down() {
		let tree = Tree::new(vec![node("A", &[]), node("B", &["A"]), node("C", &["A"])]);
		let out = layout(&tree, &LayoutParameters::default());
		assert_eq!(
			positions(&out),
			vec![(100.0, 0.0), (100.0, 110.0), (200.0, 110.0)]
		);
		assert_eq!(out.starter_count, 2);
		for placement in &out.placements[1..] {
			assert_eq!(
				placement.incoming,
				vec![ConnectorEdge {
					source_id: "a".into(),
					source: Position::new(100.0, 0.0),
				}]
			);
		}
	}

	#[test]
	fn offset_uses_rendered_id_width() {
		let tree = Tree::new(vec![node("Gene Therapy", &[]), node("Delivery", &["gene therapy"])]);
		let out = layout(&tree, &LayoutParameters::default());
		// "gene-therapy" is 12 characters wide
		assert_eq!(out.placements[1].position, Position::new(100.0, 220.0));
	}

	#[test]
	fn secondary_relations_add_edges_without_moving_node() {
		let tree = Tree::new(vec![
			node("A", &[]),
			node("B", &[]),
			node("C", &["B", "A"]),
		]);
		let out = layout(&tree, &LayoutParameters::default());
		let c = &out.placements[2];
		assert_eq!(c.position, Position::new(200.0, 110.0));
		let sources: Vec<&str> = c.incoming.iter().map(|e| e.source_id.as_str()).collect();
		assert_eq!(sources, vec!["a", "b"]);
	}

	#[test]
	fn dangling_primary_falls_back_to_default_slot() {
		let tree = Tree::new(vec![node("B", &["A"]), node("C", &["A"])]);
		let out = layout(&tree, &LayoutParameters::default());
		assert_eq!(positions(&out), vec![(100.0, 100.0), (200.0, 100.0)]);
		assert!(out.placements.iter().all(|p| p.incoming.is_empty()));
		assert_eq!(out.starter_count, 1);
	}

	#[test]
	fn duplicate_ids_align_to_earliest() {
		let tree = Tree::new(vec![
			node("X", &[]),
			node("x", &[]),
			node("Y", &["X"]),
		]);
		let out = layout(&tree, &LayoutParameters::default());
		assert_eq!(out.placements[2].position.top, 100.0);
	}

	#[test]
	fn self_relation_is_never_matched() {
		let tree = Tree::new(vec![node("A", &["A"])]);
		let out = layout(&tree, &LayoutParameters::default());
		assert!(out.placements[0].incoming.is_empty());
		assert_eq!(out.placements[0].position, Position::new(100.0, 100.0));
	}

	#[test]
	fn alignment_can_land_on_an_earlier_fallback_slot() {
		let tree = Tree::new(vec![
			node("S", &[]),
			node("A", &["Missing"]),
			node("Bbbbbbbbbb", &[]),
			node("C", &["Bbbbbbbbbb"]),
		]);
		let out = layout(&tree, &LayoutParameters::default());
		assert_eq!(out.placements[1].position, Position::new(200.0, 200.0));
		assert_eq!(out.placements[3].position, Position::new(200.0, 200.0));
		assert_eq!(
			out.overlaps(),
			vec![Diagnostic::Overlap {
				a: "a".into(),
				b: "c".into(),
			}]
		);
	}

	#[test]
	fn siblings_do_not_overlap() {
		let tree = Tree::new(vec![node("A", &[]), node("B", &["A"]), node("C", &["A"])]);
		assert!(layout(&tree, &LayoutParameters::default()).overlaps().is_empty());
	}

	#[test]
	fn layout_is_deterministic() {
		let tree = Tree::new(vec![
			node("A", &[]),
			node("B", &["A"]),
			node("C", &["A", "B"]),
			node("D", &[]),
			node("E", &["D", "C"]),
		]);
		let params = LayoutParameters::default();
		assert_eq!(layout(&tree, &params), layout(&tree, &params));
	}
}
