mod aggregate;
mod builder;
mod component;
mod config;
mod error;
mod highlight;
mod layout;
mod render;
mod source;
mod state;
mod types;

pub use aggregate::{average_percentage, format_count, percentage_of, share_label};
pub use builder::{build_graph, check_records};
pub use component::StatusSankey;
pub use config::DiagramConfig;
pub use error::{RecordWarning, SankeyError};
pub use highlight::{Emphasis, Focus, HighlightEngine, LinkView, NodeView};
pub use layout::{Extent, LaidOutGraph, Layout, LinkGeometry, LinkPath, NodeGeometry, Rect, SankeyLayout};
pub use source::{load_config, load_records, parse_records, sample_records};
pub use state::SankeyState;
pub use types::{ElementRef, Graph, Link, LinkKey, Node, NodeId, NodeKind, Status, TeamRecord};
