use thiserror::Error;

/// Failures loading data or talking to the browser.
#[derive(Debug, Error)]
pub enum SankeyError {
	/// Team records JSON did not parse.
	#[error("failed to parse team records: {0}")]
	Records(#[source] serde_json::Error),
	/// Diagram config JSON did not parse.
	#[error("failed to parse diagram config: {0}")]
	Config(#[source] serde_json::Error),
	/// No element with this id in the page.
	#[error("element `#{0}` not found in document")]
	MissingElement(String),
	/// Window, document or canvas context missing.
	#[error("browser API unavailable: {0}")]
	Browser(String),
}

/// Data-quality problems in a team record. Never fatal: the graph is still built from the numbers as given.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordWarning {
	/// The three buckets do not add up to `total`.
	#[error("team `{name}`: statuses sum to {sum} but total is {total}")]
	SumMismatch {
		/// Team name.
		name: String,
		/// Declared total.
		total: i64,
		/// Sum of the three buckets.
		sum: i64,
	},
	/// A count below zero.
	#[error("team `{name}`: negative {field} count ({value})")]
	NegativeCount {
		/// Team name.
		name: String,
		/// Offending JSON field.
		field: &'static str,
		/// Its value.
		value: i64,
	},
	/// The three buckets add up past `i64::MAX`; totals involving this team saturate.
	#[error("team `{name}`: status counts overflow")]
	CountOverflow {
		/// Team name.
		name: String,
	},
}
