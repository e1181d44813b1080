use std::collections::HashSet;

use tech_tree::tree::{
	Diagnostic, LayoutParameters, Node, NodeType, Position, RenderPlan, RouteParameters, Tree,
	layout,
};

fn node(title: &str, relations: &[&str]) -> Node {
	Node::new(title, NodeType::CoreTechnology).with_relations(relations.iter().copied())
}

fn abc() -> Tree {
	Tree::new(vec![node("A", &[]), node("B", &["A"]), node("C", &["A"])])
}

#[test]
fn siblings_share_source_and_split_rows() {
	let out = layout(&abc(), &LayoutParameters::default());
	let [a, b, c] = &out.placements[..] else {
		panic!("expected three placements");
	};
	assert_eq!(a.position, Position::new(100.0, 0.0));
	assert_eq!(b.position, Position::new(100.0, 110.0));
	assert_eq!(c.position, Position::new(200.0, 110.0));
	assert_eq!(out.starter_count, 2);
	for placement in [b, c] {
		assert_eq!(placement.incoming.len(), 1);
		assert_eq!(placement.incoming[0].source, a.position);
	}
}

#[test]
fn starter_rows_are_distinct_in_a_mixed_tree() {
	let tree = Tree::new(vec![
		node("A", &[]),
		node("B", &["A"]),
		node("C", &["A"]),
		node("D", &[]),
		node("E", &["D"]),
		node("F", &[]),
		node("G", &["Missing"]),
		node("H", &[]),
	]);
	let out = layout(&tree, &LayoutParameters::default());
	let starter_tops: Vec<u64> = tree
		.nodes()
		.iter()
		.zip(&out.placements)
		.filter(|(n, _)| n.is_starter())
		.map(|(_, p)| p.position.top as u64)
		.collect();
	let distinct: HashSet<u64> = starter_tops.iter().copied().collect();
	assert_eq!(distinct.len(), starter_tops.len());
	assert!(out.overlaps().is_empty());
}

#[test]
fn overlapping_placements_are_reported_by_the_plan() {
	let tree = Tree::new(vec![
		node("S", &[]),
		node("A", &["Missing"]),
		node("Bbbbbbbbbb", &[]),
		node("C", &["Bbbbbbbbbb"]),
	]);
	let plan = RenderPlan::build(&tree, &LayoutParameters::default(), &RouteParameters::default());
	let at: Vec<(&str, f64, f64)> = plan
		.nodes
		.iter()
		.map(|p| (p.id.as_str(), p.position.top, p.position.left))
		.collect();
	assert_eq!(
		at,
		vec![
			("s", 100.0, 0.0),
			("a", 200.0, 200.0),
			("bbbbbbbbbb", 200.0, 0.0),
			("c", 200.0, 200.0),
		]
	);
	assert!(plan.diagnostics.contains(&Diagnostic::Overlap {
		a: "a".into(),
		b: "c".into(),
	}));
	assert!(plan.diagnostics.contains(&Diagnostic::DanglingRelation {
		title: "A".into(),
		relation: "Missing".into(),
	}));
}

#[test]
fn plan_routes_connectors_for_every_matched_relation() {
	let tree = Tree::new(vec![node("A", &[]), node("B", &[]), node("C", &["A", "B"])]);
	let plan = RenderPlan::build(&tree, &LayoutParameters::default(), &RouteParameters::default());
	let c = &plan.nodes[2];
	assert_eq!(c.id, "c");
	assert_eq!(c.connectors.len(), 2);
	let anchors: Vec<f64> = c.connectors.iter().map(|k| k.anchor_offset).collect();
	assert_eq!(anchors, vec![11.5, 23.5]);
	assert!(c.connectors.iter().all(|k| k.weight == 1.0));
	assert_eq!(plan.spacer_height, 2.0 * 100.5);
}

#[test]
fn plans_are_identical_for_identical_input() {
	let (lp, rp) = (LayoutParameters::default(), RouteParameters::default());
	assert_eq!(RenderPlan::build(&abc(), &lp, &rp), RenderPlan::build(&abc(), &lp, &rp));
}
