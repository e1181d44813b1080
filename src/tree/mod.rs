//! Framework-free core of the tech tree: model, placement, connector routing
//! and the edit protocol. The components only read [`RenderPlan`]s and call
//! into [`EditController`].

pub mod edit;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod params;
pub mod routing;

use log::warn;
use serde::Serialize;

pub use edit::{EditController, EditSession, NodeDraft};
pub use error::{EditError, EditResult};
pub use layout::{ConnectorEdge, Layout, Position, layout};
pub use model::{Diagnostic, Node, NodeType, Tree, derive_id};
pub use params::{LayoutParameters, RouteParameters};
pub use routing::{Connector, Point, Segment, route};

const SEED_JSON: &str = include_str!("../../assets/tree.json");

/// The bundled initial tree.
pub fn seed() -> EditResult<Tree> {
	Tree::from_json(SEED_JSON)
}

/// A node with its computed position and routed incoming connectors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedNode {
	pub node: Node,
	pub id: String,
	pub position: Position,
	pub connectors: Vec<Connector>,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderPlan {
	pub nodes: Vec<PlacedNode>,
	pub spacer_height: f64,
	/// Model and placement problems found while building, also logged.
	pub diagnostics: Vec<Diagnostic>,
}

impl RenderPlan {
	/// Lay out `tree` and route each node's incoming edges.
	pub fn build(tree: &Tree, layout_params: &LayoutParameters, route_params: &RouteParameters) -> Self {
		let laid_out = layout(tree, layout_params);
		let mut diagnostics = tree.diagnostics();
		diagnostics.extend(laid_out.overlaps());
		for diagnostic in &diagnostics {
			warn!("{diagnostic}");
		}
		let Layout {
			placements,
			spacer_height,
			..
		} = laid_out;

		let nodes = tree
			.nodes()
			.iter()
			.zip(placements)
			.map(|(node, placement)| PlacedNode {
				connectors: route(
					placement.position,
					&placement.incoming,
					layout_params,
					route_params,
				),
				node: node.clone(),
				id: placement.id,
				position: placement.position,
			})
			.collect();

		Self {
			nodes,
			spacer_height,
			diagnostics,
		}
	}
}
