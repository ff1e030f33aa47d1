//! Pointer-driven cross-highlighting.
//!
//! [`HighlightEngine`] owns the graph, its geometry and the single focus register. Every transition replaces
//! the focus and re-evaluates emphasis and value text for every node and link from scratch, so the views
//! are a pure function of `(graph, layout, focus)`.

use log::debug;

use super::aggregate::{format_count, share_label};
use super::layout::{LaidOutGraph, LinkPath, Rect};
use super::types::{ElementRef, Graph, LinkKey, NodeId, NodeKind};

/// The single focus register: nothing, a team node, or a link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
	/// Nothing focused; default labels, no dimming.
	#[default]
	Idle,
	/// A team node.
	Node(NodeId),
	/// A link, highlighting its source team.
	Link(LinkKey),
}

/// Opacity class of a drawn element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emphasis {
	/// Full opacity.
	#[default]
	Full,
	/// Faded out.
	Dimmed,
}

impl Emphasis {
	fn from_full(full: bool) -> Self {
		if full { Self::Full } else { Self::Dimmed }
	}
}

/// Everything the presentation layer needs to draw one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	/// Node id.
	pub id: NodeId,
	/// Tier tag.
	pub kind: NodeKind,
	/// Layout rectangle.
	pub rect: Rect,
	/// Opacity class.
	pub emphasis: Emphasis,
	/// Node name.
	pub label_text: String,
	/// Count, or `"count - percent"` for statuses.
	pub value_text: String,
	/// Layout value (larger of inflow and outflow), used for tooltips.
	pub value: i64,
}

/// Everything the presentation layer needs to draw one link.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkView {
	/// Team node id.
	pub source: NodeId,
	/// Status node id.
	pub target: NodeId,
	/// Band centre line.
	pub path: LinkPath,
	/// Band thickness.
	pub width: f64,
	/// Item count.
	pub value: i64,
	/// Opacity class.
	pub emphasis: Emphasis,
}

impl LinkView {
	/// Endpoint key of this link.
	pub fn key(&self) -> LinkKey {
		LinkKey {
			source: self.source,
			target: self.target,
		}
	}
}

/// Owns the graph, its geometry and the focus; hands out per-element views.
pub struct HighlightEngine {
	graph: Graph,
	focus: Focus,
	nodes: Vec<NodeView>,
	links: Vec<LinkView>,
}

impl HighlightEngine {
	/// Starts in [`Focus::Idle`]. `layout` must be index-aligned with `graph`; missing geometry is drawn as
	/// an empty rectangle.
	pub fn new(graph: Graph, layout: &LaidOutGraph) -> Self {
		let nodes = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let geometry = layout.nodes.get(i).cloned().unwrap_or_default();
				NodeView {
					id: node.id,
					kind: node.kind,
					rect: geometry.rect,
					emphasis: Emphasis::Full,
					label_text: node.name.clone(),
					value_text: String::new(),
					value: geometry.value,
				}
			})
			.collect();
		let links = graph
			.links
			.iter()
			.enumerate()
			.map(|(i, link)| {
				let geometry = layout.links.get(i).cloned().unwrap_or_default();
				LinkView {
					source: link.source,
					target: link.target,
					path: geometry.path,
					width: geometry.width,
					value: link.value,
					emphasis: Emphasis::Full,
				}
			})
			.collect();

		let mut engine = Self {
			graph,
			focus: Focus::Idle,
			nodes,
			links,
		};
		engine.apply(None);
		engine
	}

	/// The graph the views were built from.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Current focus register.
	pub fn focus(&self) -> Focus {
		self.focus
	}

	/// Node views in graph order.
	pub fn nodes(&self) -> &[NodeView] {
		&self.nodes
	}

	/// Link views in graph order.
	pub fn links(&self) -> &[LinkView] {
		&self.links
	}

	/// View of node `id`.
	pub fn node(&self, id: NodeId) -> Option<&NodeView> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// View of the link with endpoints `key`.
	pub fn link(&self, key: LinkKey) -> Option<&LinkView> {
		self.links.iter().find(|l| l.key() == key)
	}

	/// Pointer entered a node or link.
	///
	/// Team nodes and links focus their source team. Status nodes and teams without outflow restore the
	/// idle view. References that resolve to nothing are ignored.
	pub fn on_pointer_enter(&mut self, element: ElementRef) {
		let (focus, team) = match element {
			ElementRef::Node(id) => match self.graph.node(id).map(|n| n.kind) {
				Some(NodeKind::Team) => (Focus::Node(id), id),
				Some(NodeKind::Status(_)) => return self.restore_idle(),
				None => {
					debug!("ignoring pointer enter on unknown node {id}");
					return;
				}
			},
			ElementRef::Link(key) => {
				if !self.graph.contains_link(key) {
					debug!("ignoring pointer enter on unknown link {key:?}");
					return;
				}
				(Focus::Link(key), key.source)
			}
		};

		if self.graph.outflow_total(team) == 0 {
			debug!("team {team} has no outflow, staying idle");
			return self.restore_idle();
		}

		debug!("focus {:?} -> {:?}", self.focus, focus);
		self.focus = focus;
		self.apply(Some(team));
	}

	/// Pointer left the diagram surface.
	pub fn on_pointer_leave_surface(&mut self) {
		self.restore_idle();
	}

	/// Click landed outside the diagram surface.
	pub fn on_outside_click(&mut self) {
		self.restore_idle();
	}

	fn restore_idle(&mut self) {
		if self.focus != Focus::Idle {
			debug!("focus {:?} -> Idle", self.focus);
		}
		self.focus = Focus::Idle;
		self.apply(None);
	}

	/// Recomputes every view for the focused `team`, or the idle defaults when `None`.
	fn apply(&mut self, team: Option<NodeId>) {
		let graph = &self.graph;

		for link in &mut self.links {
			link.emphasis = Emphasis::from_full(team.is_none_or(|t| link.source == t));
		}

		let grand_total = graph.grand_total();
		let team_total = team.map(|t| graph.outflow_total(t));
		for node in &mut self.nodes {
			match node.kind {
				NodeKind::Status(_) => {
					node.emphasis = Emphasis::Full;
					node.value_text = match (team, team_total) {
						(Some(t), Some(total)) => {
							share_label(graph.link_value_between(t, node.id), total)
						}
						_ => share_label(graph.inflow_total(node.id), grand_total),
					};
				}
				NodeKind::Team => {
					node.emphasis = Emphasis::from_full(team.is_none_or(|t| node.id == t));
					node.value_text = format_count(graph.outflow_total(node.id));
				}
			}
		}
	}
}
