//! Where team records and diagram config come from.
//!
//! Pages embed them as JSON in `<script type="application/json">` elements; missing elements fall back to
//! the built-in sample data and default config.

use log::{error, info};

use super::config::DiagramConfig;
use super::error::SankeyError;
use super::types::TeamRecord;

/// Id of the script element holding team records.
pub const RECORDS_ELEMENT_ID: &str = "team-records";
/// Id of the script element holding diagram config.
pub const CONFIG_ELEMENT_ID: &str = "sankey-config";

/// Parses a JSON array of team records.
pub fn parse_records(json: &str) -> Result<Vec<TeamRecord>, SankeyError> {
	serde_json::from_str(json).map_err(SankeyError::Records)
}

/// The eight-team dataset the dashboard ships with.
pub fn sample_records() -> Vec<TeamRecord> {
	[
		("TEAM A", 9, 6, 4),
		("TEAM B", 9, 12, 4),
		("TEAM C", 5, 3, 3),
		("TEAM D", 13, 6, 2),
		("TEAM E", 8, 5, 12),
		("TEAM F", 4, 4, 6),
		("TEAM G", 12, 10, 9),
		("TEAM H", 5, 9, 2),
	]
	.into_iter()
	.map(|(name, completed, partial, not_begun)| TeamRecord::new(name, completed, partial, not_begun))
	.collect()
}

fn element_text(id: &str) -> Result<String, SankeyError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| SankeyError::Browser("no document".into()))?;
	document
		.get_element_by_id(id)
		.and_then(|el| el.text_content())
		.ok_or_else(|| SankeyError::MissingElement(id.into()))
}

/// Records embedded in the page, or the sample dataset.
pub fn load_records() -> Vec<TeamRecord> {
	match element_text(RECORDS_ELEMENT_ID).and_then(|text| parse_records(&text)) {
		Ok(records) => {
			info!("Loaded {} team records from page", records.len());
			records
		}
		Err(SankeyError::MissingElement(_)) => sample_records(),
		Err(err) => {
			error!("{err}; falling back to sample records");
			sample_records()
		}
	}
}

/// Config embedded in the page, or the defaults.
pub fn load_config() -> DiagramConfig {
	match element_text(CONFIG_ELEMENT_ID).and_then(|text| DiagramConfig::from_json(&text)) {
		Ok(config) => config,
		Err(SankeyError::MissingElement(_)) => DiagramConfig::default(),
		Err(err) => {
			error!("{err}; using default diagram config");
			DiagramConfig::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn records_use_camel_case_fields() {
		let records = parse_records(
			r#"[{ "name": "TEAM A", "total": 20, "notBegun": 9, "partial": 6, "completed": 5 }]"#,
		)
		.unwrap();

		assert_eq!(
			records,
			[TeamRecord {
				name: "TEAM A".into(),
				total: 20,
				completed: 5,
				partial: 6,
				not_begun: 9,
			}]
		);
	}

	#[test]
	fn missing_field_is_a_records_error() {
		let err = parse_records(r#"[{ "name": "TEAM A", "total": 20 }]"#).unwrap_err();

		assert!(matches!(err, SankeyError::Records(_)));
		assert!(err.to_string().starts_with("failed to parse team records"));
	}

	#[test]
	fn sample_records_are_consistent() {
		let records = sample_records();

		assert_eq!(records.len(), 8);
		assert!(super::super::builder::check_records(&records).is_empty());
		assert_eq!(records[1].total, 25);
	}
}
