use log::{info, warn};

use super::aggregate::format_count;
use super::builder::{build_graph, check_records};
use super::config::DiagramConfig;
use super::highlight::{HighlightEngine, LinkView, NodeView};
use super::layout::{Layout, Rect};
use super::types::{ElementRef, NodeKind, TeamRecord};

/// Minimum hit thickness for thin link bands, in canvas pixels.
pub const LINK_HIT_MIN: f64 = 4.0;

/// Canvas-side state: the highlight engine plus what is under the pointer.
pub struct SankeyState {
	/// Graph, geometry and focus.
	pub engine: HighlightEngine,
	/// Sizing and styling.
	pub config: DiagramConfig,
	/// Element under the pointer, for the tooltip.
	pub hovered: Option<ElementRef>,
	/// Last pointer position in canvas coordinates.
	pub pointer: Option<(f64, f64)>,
}

impl SankeyState {
	/// Builds and lays out the graph for `records`, logging any record warnings.
	pub fn new(records: &[TeamRecord], config: DiagramConfig) -> Self {
		for warning in check_records(records) {
			warn!("{warning}");
		}
		let graph = build_graph(records);
		let layout = config.layout().layout(&graph, config.extent());
		info!(
			"Built flow graph: {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		);

		Self {
			engine: HighlightEngine::new(graph, &layout),
			config,
			hovered: None,
			pointer: None,
		}
	}

	/// Canvas coordinates to layout coordinates.
	pub fn screen_to_layout(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx - self.config.margin_left, sy)
	}

	/// The rectangle a node is drawn with: status nodes inset, team nodes shifted left.
	pub fn primary_rect(&self, node: &NodeView) -> Rect {
		let r = node.rect;
		match node.kind {
			NodeKind::Status(_) => {
				let inset = self.config.status_inset.min(r.width() / 2.0);
				Rect {
					x0: r.x0 + inset,
					x1: r.x1 - inset,
					..r
				}
			}
			NodeKind::Team => Rect {
				x0: r.x0 - self.config.team_offset,
				x1: r.x1 - self.config.team_offset,
				..r
			},
		}
	}

	/// Nodes win over links; later-drawn links win over earlier ones.
	pub fn element_at_position(&self, sx: f64, sy: f64) -> Option<ElementRef> {
		let (x, y) = self.screen_to_layout(sx, sy);

		let node = self
			.engine
			.nodes()
			.iter()
			.rev()
			.find(|n| n.rect.height() > 0.0 && self.primary_rect(n).contains(x, y));
		if let Some(node) = node {
			return Some(ElementRef::Node(node.id));
		}

		self.engine
			.links()
			.iter()
			.rev()
			.find(|l| link_contains(l, x, y))
			.map(|l| ElementRef::Link(l.key()))
	}

	/// Routes a pointer move. Empty canvas space keeps the current focus.
	pub fn pointer_moved(&mut self, sx: f64, sy: f64) {
		self.pointer = Some((sx, sy));
		self.hovered = self.element_at_position(sx, sy);
		if let Some(element) = self.hovered {
			self.engine.on_pointer_enter(element);
		}
	}

	/// Pointer left the canvas.
	pub fn pointer_left(&mut self) {
		self.pointer = None;
		self.hovered = None;
		self.engine.on_pointer_leave_surface();
	}

	/// Mouse-down landed outside the canvas.
	pub fn outside_click(&mut self) {
		self.hovered = None;
		self.engine.on_outside_click();
	}

	/// Tooltip lines for the hovered element.
	pub fn tooltip(&self) -> Option<Vec<String>> {
		let graph = self.engine.graph();
		let name = |id| graph.node(id).map_or("?", |n| n.name.as_str());
		match self.hovered? {
			ElementRef::Node(id) => {
				let node = self.engine.node(id)?;
				Some(vec![name(id).to_string(), format_count(node.value)])
			}
			ElementRef::Link(key) => {
				let link = self.engine.link(key)?;
				Some(vec![
					format!("{} → {}", name(key.source), name(key.target)),
					format_count(link.value),
				])
			}
		}
	}
}

fn link_contains(link: &LinkView, x: f64, y: f64) -> bool {
	if link.width <= 0.0 {
		return false;
	}
	let half = link.width.max(LINK_HIT_MIN) / 2.0;
	link.path.y_at(x).is_some_and(|cy| (y - cy).abs() <= half)
}

#[cfg(test)]
mod tests {
	use super::super::highlight::Focus;
	use super::super::types::LinkKey;
	use super::*;

	fn state() -> SankeyState {
		SankeyState::new(
			&[
				TeamRecord::new("A", 5, 3, 2),
				TeamRecord::new("B", 2, 2, 6),
				TeamRecord::new("Z", 0, 0, 0),
			],
			DiagramConfig::default(),
		)
	}

	fn center_of(state: &SankeyState, id: usize) -> (f64, f64) {
		let node = state.engine.node(id).unwrap();
		let r = state.primary_rect(node);
		(
			(r.x0 + r.x1) / 2.0 + state.config.margin_left,
			r.center_y(),
		)
	}

	#[test]
	fn primary_rects_inset_statuses_and_shift_teams() {
		let state = state();
		let status = state.engine.node(0).unwrap();
		let team = state.engine.node(3).unwrap();

		assert_eq!(state.primary_rect(status).width(), 15.0);
		assert_eq!(state.primary_rect(status).x0, status.rect.x0 + 10.0);
		assert_eq!(state.primary_rect(team).x0, team.rect.x0 - 10.0);
		assert_eq!(state.primary_rect(team).width(), team.rect.width());
	}

	#[test]
	fn hit_testing_finds_nodes_and_links() {
		let state = state();

		let (x, y) = center_of(&state, 4);
		assert_eq!(state.element_at_position(x, y), Some(ElementRef::Node(4)));
		let (x, y) = center_of(&state, 1);
		assert_eq!(state.element_at_position(x, y), Some(ElementRef::Node(1)));

		let link = state
			.engine
			.link(LinkKey {
				source: 3,
				target: 0,
			})
			.unwrap();
		let mid = link.path.mid_x();
		let cy = link.path.y_at(mid).unwrap();
		assert_eq!(
			state.element_at_position(mid + state.config.margin_left, cy),
			Some(ElementRef::Link(link.key()))
		);

		assert_eq!(state.element_at_position(1.0, 1.0), None);
	}

	#[test]
	fn zero_height_nodes_are_not_hit() {
		let state = state();
		let (x, y) = center_of(&state, 5);
		assert_ne!(state.element_at_position(x, y), Some(ElementRef::Node(5)));
	}

	#[test]
	fn zero_width_links_are_not_hit() {
		let state = state();
		let link = state
			.engine
			.link(LinkKey {
				source: 5,
				target: 1,
			})
			.unwrap();
		assert_eq!(link.width, 0.0);

		let mid = link.path.mid_x();
		let cy = link.path.y_at(mid).unwrap();
		assert_ne!(
			state.element_at_position(mid + state.config.margin_left, cy),
			Some(ElementRef::Link(link.key()))
		);
	}

	#[test]
	fn huge_counts_saturate_without_panicking() {
		let big = 5_000_000_000_000_000_000;
		let mut state = SankeyState::new(
			&[TeamRecord::new("A", big, 0, 0), TeamRecord::new("B", big, 0, 0)],
			DiagramConfig::default(),
		);

		assert_eq!(state.engine.graph().grand_total(), i64::MAX);
		assert_eq!(
			state.engine.node(0).map(|n| n.value_text.as_str()),
			Some("9,223,372,036,854,775,807 - 100%")
		);
		assert!(state.engine.nodes().iter().all(|n| n.rect.height().is_finite()));

		let (x, y) = center_of(&state, 4);
		state.pointer_moved(x, y);
		assert_eq!(state.engine.focus(), Focus::Node(4));
		assert_eq!(
			state.engine.node(0).map(|n| n.value_text.as_str()),
			Some("5,000,000,000,000,000,000 - 100%")
		);
	}

	#[test]
	fn pointer_over_empty_space_keeps_focus() {
		let mut state = state();
		let (x, y) = center_of(&state, 3);
		state.pointer_moved(x, y);
		assert_eq!(state.engine.focus(), Focus::Node(3));

		state.pointer_moved(1.0, 1.0);
		assert_eq!(state.engine.focus(), Focus::Node(3));
		assert_eq!(state.hovered, None);

		state.pointer_left();
		assert_eq!(state.engine.focus(), Focus::Idle);
		assert_eq!(state.pointer, None);
	}

	#[test]
	fn tooltips_describe_nodes_and_links() {
		let mut state = state();
		state.hovered = Some(ElementRef::Node(2));
		assert_eq!(state.tooltip(), Some(vec!["NOT BEGUN".to_string(), "8".to_string()]));

		state.hovered = Some(ElementRef::Link(LinkKey {
			source: 4,
			target: 2,
		}));
		assert_eq!(state.tooltip(), Some(vec!["B → NOT BEGUN".to_string(), "6".to_string()]));

		state.hovered = None;
		assert_eq!(state.tooltip(), None);
	}
}
