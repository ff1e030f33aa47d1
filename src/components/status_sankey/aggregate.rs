//! Totals and percentages derived from the flow graph.
//!
//! Every query is a fresh scan over the link list; nothing is cached. Sums saturate at the `i64` bounds.

use super::types::{Graph, NodeId, TeamRecord};

impl Graph {
	/// Sum of link values arriving at `id`.
	pub fn inflow_total(&self, id: NodeId) -> i64 {
		saturating_sum(self.links.iter().filter(|l| l.target == id).map(|l| l.value))
	}

	/// Sum of link values leaving `id`.
	pub fn outflow_total(&self, id: NodeId) -> i64 {
		saturating_sum(self.links.iter().filter(|l| l.source == id).map(|l| l.value))
	}

	/// Sum of link values from `source` to `target`.
	pub fn link_value_between(&self, source: NodeId, target: NodeId) -> i64 {
		saturating_sum(
			self.links
				.iter()
				.filter(|l| l.source == source && l.target == target)
				.map(|l| l.value),
		)
	}

	/// Sum of every link value.
	pub fn grand_total(&self) -> i64 {
		saturating_sum(self.links.iter().map(|l| l.value))
	}
}

pub(crate) fn saturating_sum(values: impl IntoIterator<Item = i64>) -> i64 {
	values.into_iter().fold(0, i64::saturating_add)
}

/// Rounds halves towards positive infinity, like `Math.round`.
fn round_half_up(x: f64) -> i64 {
	(x + 0.5).floor() as i64
}

/// `part` as a whole-number percentage of `whole`, e.g. `"35%"`. A zero `whole` yields `"0%"`.
pub fn percentage_of(part: i64, whole: i64) -> String {
	if whole == 0 {
		return "0%".into();
	}
	format!("{}%", round_half_up(part as f64 * 100.0 / whole as f64))
}

/// Mean of the per-record rounded percentages of `selector(record)` over `record.total`.
///
/// Records with a non-positive total are left out of both the sum and the count; with none left the mean
/// is 0.
pub fn average_percentage<F>(records: &[TeamRecord], selector: F) -> i64
where
	F: Fn(&TeamRecord) -> i64,
{
	let (sum, count) = records
		.iter()
		.filter(|r| r.total > 0)
		.map(|r| round_half_up(selector(r) as f64 * 100.0 / r.total as f64))
		.fold((0i64, 0i64), |(sum, count), pct| (sum.saturating_add(pct), count + 1));

	if count == 0 {
		return 0;
	}
	round_half_up(sum as f64 / count as f64)
}

/// Formats a count with thousands separators (`1234567` -> `"1,234,567"`).
pub fn format_count(value: i64) -> String {
	let digits = value.unsigned_abs().to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if value < 0 {
		out.push('-');
	}
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

/// `"{count} - {percent}"`, the text shown next to status nodes.
pub fn share_label(part: i64, whole: i64) -> String {
	format!("{} - {}", format_count(part), percentage_of(part, whole))
}

#[cfg(test)]
mod tests {
	use super::super::builder::build_graph;
	use super::*;

	fn scenario() -> Vec<TeamRecord> {
		vec![TeamRecord::new("A", 5, 3, 2), TeamRecord::new("B", 2, 2, 6)]
	}

	#[test]
	fn status_inflows_and_grand_total() {
		let graph = build_graph(&scenario());

		assert_eq!(graph.inflow_total(0), 7);
		assert_eq!(graph.inflow_total(1), 5);
		assert_eq!(graph.inflow_total(2), 8);
		assert_eq!(graph.grand_total(), 20);
		assert_eq!(share_label(graph.inflow_total(0), graph.grand_total()), "7 - 35%");
	}

	#[test]
	fn outflow_matches_supplied_counts_even_when_total_disagrees() {
		let mut records = scenario();
		records[0].total = 99;
		let graph = build_graph(&records);

		assert_eq!(graph.outflow_total(3), 10);
		assert_eq!(graph.outflow_total(4), 10);
		// status nodes have no outgoing links
		assert_eq!(graph.outflow_total(0), 0);
	}

	#[test]
	fn link_value_between_sums_matching_links() {
		let mut graph = build_graph(&scenario());
		assert_eq!(graph.link_value_between(4, 1), 2);
		assert_eq!(graph.link_value_between(1, 4), 0);

		graph.links.push(graph.links[4].clone());
		assert_eq!(graph.link_value_between(4, 1), 4);
	}

	#[test]
	fn percentages_round_half_up_and_guard_zero() {
		assert_eq!(percentage_of(1, 3), "33%");
		assert_eq!(percentage_of(2, 3), "67%");
		assert_eq!(percentage_of(1, 8), "13%");
		assert_eq!(percentage_of(0, 10), "0%");
		assert_eq!(percentage_of(5, 0), "0%");
	}

	#[test]
	fn average_percentage_skips_zero_totals() {
		let mut records = scenario();
		records.push(TeamRecord::new("Empty", 0, 0, 0));

		// (50 + 20) / 2
		assert_eq!(average_percentage(&records, |r| r.completed), 35);
		// (20 + 60) / 2
		assert_eq!(average_percentage(&records, |r| r.not_begun), 40);
		assert_eq!(average_percentage(&records[2..], |r| r.completed), 0);
		assert_eq!(average_percentage(&[], |r| r.partial), 0);
	}

	#[test]
	fn totals_saturate_instead_of_wrapping() {
		let big = 5_000_000_000_000_000_000;
		let graph = build_graph(&[TeamRecord::new("A", big, 0, 0), TeamRecord::new("B", big, 0, 0)]);

		assert_eq!(graph.inflow_total(0), i64::MAX);
		assert_eq!(graph.grand_total(), i64::MAX);
		assert_eq!(graph.outflow_total(3), big);
		assert_eq!(percentage_of(graph.inflow_total(0), graph.grand_total()), "100%");
		assert_eq!(average_percentage(&[TeamRecord::new("C", i64::MAX, 0, 0)], |r| r.completed), 100);
	}

	#[test]
	fn counts_get_thousands_separators() {
		assert_eq!(format_count(0), "0");
		assert_eq!(format_count(999), "999");
		assert_eq!(format_count(1000), "1,000");
		assert_eq!(format_count(1234567), "1,234,567");
		assert_eq!(format_count(-4200), "-4,200");
	}
}
