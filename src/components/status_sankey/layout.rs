//! Geometry for the flow graph.
//!
//! The highlight engine only reads node rectangles and link widths/paths through [`LaidOutGraph`], so any
//! [`Layout`] implementation can be swapped in. [`SankeyLayout`] is the default two-column placement:
//! teams on the left, statuses on the right.

use super::aggregate::saturating_sum;
use super::types::{Graph, NodeKind};

/// Axis-aligned rectangle in layout coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x0: f64,
	/// Top edge.
	pub y0: f64,
	/// Right edge.
	pub x1: f64,
	/// Bottom edge.
	pub y1: f64,
}

impl Rect {
	/// Horizontal size.
	pub fn width(&self) -> f64 {
		self.x1 - self.x0
	}

	/// Vertical size.
	pub fn height(&self) -> f64 {
		self.y1 - self.y0
	}

	/// Vertical midpoint.
	pub fn center_y(&self) -> f64 {
		(self.y0 + self.y1) / 2.0
	}

	/// Whether `(x, y)` lies inside, edges included.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
	}
}

/// Canvas area the layout may occupy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
	/// Horizontal size.
	pub width: f64,
	/// Vertical size.
	pub height: f64,
}

/// Horizontal cubic band centre line from `(x0, y0)` to `(x1, y1)`; both control points sit at the
/// horizontal midpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinkPath {
	/// Start x, at the source node's right edge.
	pub x0: f64,
	/// Start y.
	pub y0: f64,
	/// End x, at the target node's left edge.
	pub x1: f64,
	/// End y.
	pub y1: f64,
}

impl LinkPath {
	/// X of both control points.
	pub fn mid_x(&self) -> f64 {
		(self.x0 + self.x1) / 2.0
	}

	fn point_at(&self, t: f64) -> (f64, f64) {
		let u = 1.0 - t;
		let (b0, b1, b2, b3) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		let xm = self.mid_x();
		(
			b0 * self.x0 + (b1 + b2) * xm + b3 * self.x1,
			(b0 + b1) * self.y0 + (b2 + b3) * self.y1,
		)
	}

	/// Y of the centre line at horizontal position `x`, or `None` outside the span.
	pub fn y_at(&self, x: f64) -> Option<f64> {
		let (lo, hi) = (self.x0.min(self.x1), self.x0.max(self.x1));
		if x < lo || x > hi {
			return None;
		}
		if hi - lo < f64::EPSILON {
			return Some(self.y0);
		}
		// x(t) is monotonic for midpoint control points
		let (mut a, mut b) = (0.0, 1.0);
		for _ in 0..32 {
			let t = (a + b) / 2.0;
			let (px, _) = self.point_at(t);
			if (px < x) == (self.x0 < self.x1) {
				a = t;
			} else {
				b = t;
			}
		}
		Some(self.point_at((a + b) / 2.0).1)
	}
}

/// Placed node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeGeometry {
	/// Layout rectangle.
	pub rect: Rect,
	/// max(inflow, outflow) with negative link values counted as zero.
	pub value: i64,
}

/// Routed link.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkGeometry {
	/// Band centre line.
	pub path: LinkPath,
	/// Band thickness.
	pub width: f64,
}

/// Layout output, index-aligned with `graph.nodes` and `graph.links`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaidOutGraph {
	/// One entry per graph node.
	pub nodes: Vec<NodeGeometry>,
	/// One entry per graph link.
	pub links: Vec<LinkGeometry>,
}

/// Places nodes and routes links within an extent.
pub trait Layout {
	/// Geometry for `graph` inside `extent`, index-aligned with its nodes and links.
	fn layout(&self, graph: &Graph, extent: Extent) -> LaidOutGraph;
}

/// Two-column d3-sankey style placement.
#[derive(Clone, Debug, PartialEq)]
pub struct SankeyLayout {
	/// Horizontal size of every node.
	pub node_width: f64,
	/// Vertical gap between nodes in a column.
	pub node_padding: f64,
}

impl Default for SankeyLayout {
	fn default() -> Self {
		Self {
			node_width: 35.0,
			node_padding: 10.0,
		}
	}
}

impl Layout for SankeyLayout {
	fn layout(&self, graph: &Graph, extent: Extent) -> LaidOutGraph {
		let bounds = Rect {
			x0: 1.0,
			y0: 1.0,
			x1: extent.width - 1.0,
			y1: extent.height - 5.0,
		};
		let n = graph.nodes.len();

		let mut inflow = vec![0i64; n];
		let mut outflow = vec![0i64; n];
		for link in &graph.links {
			let v = link.value.max(0);
			if let Some(slot) = outflow.get_mut(link.source) {
				*slot = slot.saturating_add(v);
			}
			if let Some(slot) = inflow.get_mut(link.target) {
				*slot = slot.saturating_add(v);
			}
		}
		let values: Vec<i64> = (0..n).map(|i| inflow[i].max(outflow[i])).collect();

		let teams: Vec<usize> = (0..n).filter(|&i| graph.nodes[i].kind == NodeKind::Team).collect();
		let statuses: Vec<usize> = (0..n).filter(|&i| graph.nodes[i].kind != NodeKind::Team).collect();

		// shared vertical scale, limited by the most crowded column
		let ky = [&teams, &statuses]
			.iter()
			.filter(|col| !col.is_empty())
			.filter_map(|col| {
				let sum = saturating_sum(col.iter().map(|&i| values[i]));
				let free = bounds.height() - (col.len() as f64 - 1.0) * self.node_padding;
				(sum > 0).then(|| free.max(0.0) / sum as f64)
			})
			.fold(f64::INFINITY, f64::min);
		let ky = if ky.is_finite() { ky } else { 0.0 };

		let mut rects = vec![Rect::default(); n];
		let columns = [
			(&teams, bounds.x0),
			(&statuses, bounds.x1 - self.node_width),
		];
		for (column, x0) in columns {
			let used: f64 = column.iter().map(|&i| values[i] as f64 * ky).sum::<f64>()
				+ column.len().saturating_sub(1) as f64 * self.node_padding;
			let mut y = bounds.y0 + ((bounds.height() - used) / 2.0).max(0.0);
			for &i in column.iter() {
				let h = values[i] as f64 * ky;
				rects[i] = Rect {
					x0,
					y0: y,
					x1: x0 + self.node_width,
					y1: y + h,
				};
				y += h + self.node_padding;
			}
		}

		// stack bands inside each node, ordered by the vertical position of the opposite end
		let mut source_y = vec![0.0; graph.links.len()];
		let mut target_y = vec![0.0; graph.links.len()];
		for (i, rect) in rects.iter().enumerate() {
			let mut out: Vec<usize> = (0..graph.links.len())
				.filter(|&l| graph.links[l].source == i)
				.collect();
			out.sort_by(|&a, &b| {
				let ya = rects.get(graph.links[a].target).map_or(0.0, |r| r.y0);
				let yb = rects.get(graph.links[b].target).map_or(0.0, |r| r.y0);
				ya.total_cmp(&yb)
			});
			let mut y = rect.y0;
			for l in out {
				let w = graph.links[l].value.max(0) as f64 * ky;
				source_y[l] = y + w / 2.0;
				y += w;
			}

			let mut inc: Vec<usize> = (0..graph.links.len())
				.filter(|&l| graph.links[l].target == i)
				.collect();
			inc.sort_by(|&a, &b| {
				let ya = rects.get(graph.links[a].source).map_or(0.0, |r| r.y0);
				let yb = rects.get(graph.links[b].source).map_or(0.0, |r| r.y0);
				ya.total_cmp(&yb)
			});
			let mut y = rect.y0;
			for l in inc {
				let w = graph.links[l].value.max(0) as f64 * ky;
				target_y[l] = y + w / 2.0;
				y += w;
			}
		}

		let links = graph
			.links
			.iter()
			.enumerate()
			.map(|(l, link)| {
				let x0 = rects.get(link.source).map_or(bounds.x0, |r| r.x1);
				let x1 = rects.get(link.target).map_or(bounds.x1, |r| r.x0);
				LinkGeometry {
					path: LinkPath {
						x0,
						y0: source_y[l],
						x1,
						y1: target_y[l],
					},
					width: link.value.max(0) as f64 * ky,
				}
			})
			.collect();

		let nodes = rects
			.into_iter()
			.zip(values)
			.map(|(rect, value)| NodeGeometry { rect, value })
			.collect();

		LaidOutGraph { nodes, links }
	}
}

#[cfg(test)]
mod tests {
	use super::super::builder::build_graph;
	use super::super::types::TeamRecord;
	use super::*;

	const EXTENT: Extent = Extent {
		width: 964.0,
		height: 600.0,
	};

	fn laid_out() -> (Graph, LaidOutGraph) {
		let graph = build_graph(&[TeamRecord::new("A", 5, 3, 2), TeamRecord::new("B", 2, 2, 6)]);
		let layout = SankeyLayout::default().layout(&graph, EXTENT);
		(graph, layout)
	}

	#[test]
	fn teams_left_statuses_right() {
		let (graph, layout) = laid_out();

		assert_eq!(layout.nodes.len(), graph.nodes.len());
		assert_eq!(layout.links.len(), graph.links.len());
		for status in &layout.nodes[..3] {
			assert_eq!(status.rect.x1, 963.0);
			assert_eq!(status.rect.width(), 35.0);
		}
		for team in &layout.nodes[3..] {
			assert_eq!(team.rect.x0, 1.0);
		}
	}

	#[test]
	fn heights_and_widths_share_one_scale() {
		let (_, layout) = laid_out();
		let ky = layout.nodes[3].rect.height() / 10.0;

		assert!(ky > 0.0);
		assert!((layout.nodes[0].rect.height() - 7.0 * ky).abs() < 1e-9);
		assert!((layout.nodes[2].rect.height() - 8.0 * ky).abs() < 1e-9);
		assert!((layout.links[5].width - 6.0 * ky).abs() < 1e-9);
		assert_eq!(layout.nodes[0].value, 7);
		assert_eq!(layout.nodes[4].value, 10);

		// status column is the tallest: 20 units plus two gaps fill the extent
		let span = layout.nodes[2].rect.y1 - layout.nodes[0].rect.y0;
		assert!((span - 594.0).abs() < 1e-6);
	}

	#[test]
	fn bands_stack_inside_their_nodes() {
		let (_, layout) = laid_out();
		let a = layout.nodes[3].rect;
		let a_completed = &layout.links[0];
		let a_partial = &layout.links[1];

		assert_eq!(a_completed.path.x0, a.x1);
		assert_eq!(a_completed.path.x1, layout.nodes[0].rect.x0);
		assert!((a_completed.path.y0 - (a.y0 + a_completed.width / 2.0)).abs() < 1e-9);
		assert!(a_partial.path.y0 > a_completed.path.y0);

		// B's completed band arrives below A's
		let b_completed = &layout.links[3];
		assert!(b_completed.path.y1 > a_completed.path.y1);
	}

	#[test]
	fn zero_flow_graph_collapses_to_flat_nodes() {
		let graph = build_graph(&[TeamRecord::new("Idle", 0, 0, 0)]);
		let layout = SankeyLayout::default().layout(&graph, EXTENT);

		assert!(layout.nodes.iter().all(|n| n.rect.height() == 0.0));
		assert!(layout.links.iter().all(|l| l.width == 0.0));
	}

	#[test]
	fn centre_line_follows_the_curve() {
		let path = LinkPath {
			x0: 0.0,
			y0: 10.0,
			x1: 100.0,
			y1: 50.0,
		};

		assert_eq!(path.y_at(-1.0), None);
		assert!((path.y_at(0.0).unwrap() - 10.0).abs() < 1e-6);
		assert!((path.y_at(50.0).unwrap() - 30.0).abs() < 1e-6);
		assert!((path.y_at(100.0).unwrap() - 50.0).abs() < 1e-6);
	}
}
