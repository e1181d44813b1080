use serde::Deserialize;

/// Constants driving [`super::layout::layout`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
	/// Node footprint plus the gap between neighbours.
	pub pixel_spacing: f64,
	/// Rendered width of one id character.
	pub font_width: f64,
	/// Extra height per starter row reserved by the trailing spacer.
	pub spacer_padding: f64,
}

impl Default for LayoutParameters {
	fn default() -> Self {
		Self {
			pixel_spacing: 100.0,
			font_width: 10.0,
			spacer_padding: 0.5,
		}
	}
}

impl LayoutParameters {
	/// Width a node's id label occupies.
	pub fn label_width(&self, id: &str) -> f64 {
		id.chars().count() as f64 * self.font_width
	}
}

/// Constants driving [`super::routing::route`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteParameters {
	pub node_height: f64,
	/// Height of one inbound caret; anchors are stacked by this amount.
	pub marker_height: f64,
	/// Distance between the anchor offset and the elbow's vertical line.
	pub elbow_gap: f64,
}

impl Default for RouteParameters {
	fn default() -> Self {
		Self {
			node_height: 47.0,
			marker_height: 12.0,
			elbow_gap: 35.0,
		}
	}
}
