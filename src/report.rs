use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::classifier::AGENT_NAME;
use crate::error::Error;

/// Confidence recorded for every classification. The classifier is
/// local and deterministic, so there is no uncertainty signal.
pub const CONFIDENCE_POSITIVE: &str = "POSITIVE";

/// One successfully classified file, with provenance.
///
/// Field order here is the serialized field order of the report; keep
/// it stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRecord {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "FileIdentificationFormatName")]
    pub format_name: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "SoftwareAgentName")]
    pub agent_name: String,
    #[serde(rename = "SoftwareAgentVersion")]
    pub agent_version: String,
    #[serde(rename = "FileIdentificationFormatConfidence")]
    pub confidence: String,
}

impl ClassificationRecord {
    /// Build a record for one classified file, stamped with the
    /// current UTC time.
    pub fn new(filename: &str, format_name: String, agent_version: &str) -> Self {
        Self {
            filename: filename.to_string(),
            format_name,
            timestamp: utc_timestamp(Utc::now()),
            agent_name: AGENT_NAME.to_string(),
            agent_version: agent_version.to_string(),
            confidence: CONFIDENCE_POSITIVE.to_string(),
        }
    }
}

pub fn utc_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Report file name, unique across runs via the embedded generation
/// timestamp.
pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("FileIdentificationReport_{}.json", utc_timestamp(now))
}

/// Serialize the collected records into the report document: a JSON
/// array in production order.
pub fn build_report(records: &[ClassificationRecord]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(records)?)
}
