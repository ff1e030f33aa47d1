use super::error::RecordWarning;
use super::types::{Graph, Link, Node, NodeKind, Status, TeamRecord};

/// Turns team records into the two-tier flow graph.
///
/// The three status nodes always come first with ids `0..3`; team `i` gets id `3 + i`. Each team emits one
/// link per status in status order, zero-valued links included, so node and link indices are stable for a
/// given input order.
pub fn build_graph(records: &[TeamRecord]) -> Graph {
	let status_count = Status::ALL.len();
	let mut nodes = Vec::with_capacity(status_count + records.len());
	let mut links = Vec::with_capacity(status_count * records.len());

	for status in Status::ALL {
		nodes.push(Node {
			id: status.id(),
			name: status.label().into(),
			kind: NodeKind::Status(status),
		});
	}

	for (i, record) in records.iter().enumerate() {
		let id = status_count + i;
		nodes.push(Node {
			id,
			name: record.name.clone(),
			kind: NodeKind::Team,
		});
		for status in Status::ALL {
			links.push(Link {
				source: id,
				target: status.id(),
				value: status.count(record),
			});
		}
	}

	Graph { nodes, links }
}

/// Reports records whose counts are negative or do not add up to `total`.
pub fn check_records(records: &[TeamRecord]) -> Vec<RecordWarning> {
	let mut warnings = Vec::new();
	for record in records {
		for (field, value) in [
			("total", record.total),
			("completed", record.completed),
			("partial", record.partial),
			("notBegun", record.not_begun),
		] {
			if value < 0 {
				warnings.push(RecordWarning::NegativeCount {
					name: record.name.clone(),
					field,
					value,
				});
			}
		}

		let sum = record
			.completed
			.checked_add(record.partial)
			.and_then(|s| s.checked_add(record.not_begun));
		match sum {
			None => warnings.push(RecordWarning::CountOverflow {
				name: record.name.clone(),
			}),
			Some(sum) if sum != record.total => warnings.push(RecordWarning::SumMismatch {
				name: record.name.clone(),
				total: record.total,
				sum,
			}),
			Some(_) => {}
		}
	}
	warnings
}
