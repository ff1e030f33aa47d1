use serde::Deserialize;

/// Index of a node inside [`Graph::nodes`]. Status nodes occupy `0..3`, teams follow in input order.
pub type NodeId = usize;

/// Per-team item counts as supplied by the record source.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
	/// Team display name.
	pub name: String,
	/// Declared item count; not guaranteed to match the three buckets.
	pub total: i64,
	/// Items finished.
	pub completed: i64,
	/// Items started but unfinished.
	pub partial: i64,
	/// Items not started.
	pub not_begun: i64,
}

impl TeamRecord {
	/// Record whose `total` is the (saturating) sum of the three counts.
	pub fn new(name: impl Into<String>, completed: i64, partial: i64, not_begun: i64) -> Self {
		Self {
			name: name.into(),
			total: completed.saturating_add(partial).saturating_add(not_begun),
			completed,
			partial,
			not_begun,
		}
	}
}

/// The three completion buckets. Discriminants double as the fixed status node ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
	/// `COMPLETED`, node 0.
	Completed = 0,
	/// `PARTIAL`, node 1.
	Partial = 1,
	/// `NOT BEGUN`, node 2.
	NotBegun = 2,
}

impl Status {
	/// Statuses in node-id order.
	pub const ALL: [Self; 3] = [Self::Completed, Self::Partial, Self::NotBegun];

	/// Fixed node id of this status.
	pub fn id(self) -> NodeId {
		self as NodeId
	}

	/// Status whose node id is `id`, if any.
	pub fn from_id(id: NodeId) -> Option<Self> {
		Self::ALL.get(id).copied()
	}

	/// Node name shown on the diagram.
	pub fn label(self) -> &'static str {
		match self {
			Self::Completed => "COMPLETED",
			Self::Partial => "PARTIAL",
			Self::NotBegun => "NOT BEGUN",
		}
	}

	/// The record count feeding this status.
	pub fn count(self, record: &TeamRecord) -> i64 {
		match self {
			Self::Completed => record.completed,
			Self::Partial => record.partial,
			Self::NotBegun => record.not_begun,
		}
	}
}

/// Which tier a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// One of the three status buckets.
	Status(Status),
	/// A team built from a record.
	Team,
}

/// A status bucket or a team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	/// Position in [`Graph::nodes`].
	pub id: NodeId,
	/// Status label or team name.
	pub name: String,
	/// Tier tag.
	pub kind: NodeKind,
}

impl Node {
	/// Whether this is a team node.
	pub fn is_team(&self) -> bool {
		self.kind == NodeKind::Team
	}
}

/// Directed team -> status flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
	/// Team node id.
	pub source: NodeId,
	/// Status node id.
	pub target: NodeId,
	/// Item count flowing along the link.
	pub value: i64,
}

impl Link {
	/// Endpoint key of this link.
	pub fn key(&self) -> LinkKey {
		LinkKey {
			source: self.source,
			target: self.target,
		}
	}
}

/// Identifies a link by its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkKey {
	/// Team node id.
	pub source: NodeId,
	/// Status node id.
	pub target: NodeId,
}

/// What the presentation layer reports under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRef {
	/// A node by id.
	Node(NodeId),
	/// A link by endpoints.
	Link(LinkKey),
}

/// Status nodes, team nodes and the team -> status links between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
	/// Status nodes first, then teams in input order.
	pub nodes: Vec<Node>,
	/// Three links per team, in status order.
	pub links: Vec<Link>,
}

impl Graph {
	/// Node with id `id`.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id).filter(|n| n.id == id)
	}

	/// Team nodes in input order.
	pub fn teams(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter().filter(|n| n.is_team())
	}

	/// Whether a link with these endpoints exists.
	pub fn contains_link(&self, key: LinkKey) -> bool {
		self.links.iter().any(|l| l.key() == key)
	}
}
