use serde::Deserialize;

use super::error::SankeyError;
use super::layout::{Extent, SankeyLayout};

/// Diagram sizing and styling. Every field falls back to its default when absent from the JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
	/// Layout extent, excluding the label margins.
	pub width: f64,
	/// Layout height.
	pub height: f64,
	/// Horizontal size of every node.
	pub node_width: f64,
	/// Vertical gap between nodes in a column.
	pub node_padding: f64,
	/// Room left of the team column for team labels.
	pub margin_left: f64,
	/// Room right of the status column for status labels.
	pub margin_right: f64,
	/// Status nodes are drawn this much narrower on each side than their layout rectangle.
	pub status_inset: f64,
	/// Team nodes are drawn shifted this far left of their layout rectangle.
	pub team_offset: f64,
	/// Opacity of emphasized link bands.
	pub link_opacity: f64,
	/// Opacity of dimmed nodes, links and labels.
	pub dimmed_opacity: f64,
	/// Opacity multiplier for shadow nodes.
	pub shadow_opacity: f64,
	/// Canvas font for labels and tooltips.
	pub font: String,
	/// Canvas fill colour.
	pub background: String,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		Self {
			width: 964.0,
			height: 600.0,
			node_width: 35.0,
			node_padding: 10.0,
			margin_left: 75.0,
			margin_right: 120.0,
			status_inset: 10.0,
			team_offset: 10.0,
			link_opacity: 0.6,
			dimmed_opacity: 0.1,
			shadow_opacity: 0.25,
			font: "bold 12px sans-serif".into(),
			background: "#ffffff".into(),
		}
	}
}

impl DiagramConfig {
	/// Parses a config object; missing fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, SankeyError> {
		serde_json::from_str(json).map_err(SankeyError::Config)
	}

	/// Layout extent.
	pub fn extent(&self) -> Extent {
		Extent {
			width: self.width,
			height: self.height,
		}
	}

	/// Layout configured with this node width and padding.
	pub fn layout(&self) -> SankeyLayout {
		SankeyLayout {
			node_width: self.node_width,
			node_padding: self.node_padding,
		}
	}

	/// Full canvas size including label margins.
	pub fn canvas_size(&self) -> (f64, f64) {
		(self.margin_left + self.width + self.margin_right, self.height)
	}
}
