//! # Knowledge Base Loader
//!
//! Fetches the fault-case knowledge base from a published spreadsheet CSV
//! export and serializes it into a flat text block suitable for prompt
//! grounding. The knowledge base is refetched on every call; there is no
//! caching layer.

use crate::errors::KbError;
use regex::Regex;
use std::time::Duration;
use tracing::{info, warn};

/// Bound on the knowledge-base fetch. The model call deliberately has no
/// such bound and relies on provider defaults.
pub const KB_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One row of the fault knowledge base, trimmed field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub equipment: String,
    pub fault_type: String,
    pub symptom: String,
    pub possible_causes: String,
    pub diagnostic_steps: String,
    pub solution: String,
}

impl CaseRecord {
    /// A record is usable only when the fields that anchor a diagnosis are
    /// all present.
    pub fn is_complete(&self) -> bool {
        !self.equipment.is_empty() && !self.symptom.is_empty() && !self.solution.is_empty()
    }

    /// Serializes the record into the fixed field-labeled line format.
    pub fn serialize(&self) -> String {
        format!(
            "Equipment: {}; Fault Type: {}; Symptom: {}; Possible Causes: {}; Diagnostic Steps: {}; Solution: {}",
            self.equipment,
            self.fault_type,
            self.symptom,
            self.possible_causes,
            self.diagnostic_steps,
            self.solution
        )
    }
}

/// Transforms a Google Sheet URL into its CSV export URL.
///
/// URLs that do not look like a `spreadsheets/d/<id>` document (e.g. a direct
/// CSV link) are returned unchanged.
pub fn construct_export_url(url_str: &str) -> Result<String, KbError> {
    let parsed_url = reqwest::Url::parse(url_str)
        .map_err(|e| KbError::LoadFailed(format!("Invalid knowledge base URL: {e}")))?;

    // Published-to-web links (`/spreadsheets/d/e/<token>/pub`) are already
    // CSV exports; leave them alone.
    if parsed_url.path().contains("/spreadsheets/d/e/") {
        return Ok(url_str.to_string());
    }

    let re = Regex::new(r"/spreadsheets/d/([a-zA-Z0-9-_]+)")
        .map_err(|e| KbError::ProcessFailed(format!("Regex compilation failed: {e}")))?;
    let Some(caps) = re.captures(parsed_url.path()) else {
        return Ok(url_str.to_string());
    };

    let spreadsheet_id = caps
        .get(1)
        .map(|m| m.as_str())
        .ok_or_else(|| KbError::LoadFailed("Sheet ID capture group is missing.".to_string()))?;

    // Local hosts are kept as-is so tests can stand in for docs.google.com.
    let base_url = match parsed_url.host_str() {
        Some("127.0.0.1") | Some("localhost") => {
            format!("{}://{}", parsed_url.scheme(), parsed_url.authority())
        }
        _ => "https://docs.google.com".to_string(),
    };

    Ok(format!(
        "{base_url}/spreadsheets/d/{spreadsheet_id}/export?format=csv"
    ))
}

/// The fault-case knowledge base source.
#[derive(Clone, Debug)]
pub struct KnowledgeBase {
    client: reqwest::Client,
    csv_url: String,
}

impl KnowledgeBase {
    pub fn new(client: reqwest::Client, url: &str) -> Result<Self, KbError> {
        let csv_url = construct_export_url(url)?;
        Ok(Self { client, csv_url })
    }

    /// Fetches the CSV export and serializes the valid case records.
    ///
    /// Returns an empty string when the feed parses but yields no complete
    /// rows; that is not an error.
    pub async fn load(&self) -> Result<String, KbError> {
        info!("Fetching knowledge base CSV from: {}", self.csv_url);
        let response = self
            .client
            .get(&self.csv_url)
            .timeout(KB_FETCH_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KbError::LoadFailed(format!(
                "Request failed with status: {}",
                response.status()
            )));
        }

        let csv_data = response.text().await?;
        serialize_cases(&csv_data)
    }
}

/// Parses CSV text (first row as headers) and joins the complete case
/// records, one serialized record per line.
pub fn serialize_cases(csv_data: &str) -> Result<String, KbError> {
    let csv_data = csv_data.strip_prefix('\u{feff}').unwrap_or(csv_data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| KbError::ProcessFailed(format!("Failed to read header row: {e}")))?
        .clone();

    let find_idx = |names: &[&str]| {
        headers.iter().position(|h| {
            let h_trimmed = h.trim();
            names
                .iter()
                .any(|name| h_trimmed.eq_ignore_ascii_case(name))
        })
    };

    let equipment_idx = find_idx(&["equipment", "equipment name"]).ok_or_else(|| {
        KbError::ProcessFailed("Missing required header: 'equipment'".to_string())
    })?;
    let symptom_idx = find_idx(&["symptom", "symptoms"]).ok_or_else(|| {
        KbError::ProcessFailed("Missing required header: 'symptom'".to_string())
    })?;
    let solution_idx = find_idx(&["solution", "control action"]).ok_or_else(|| {
        KbError::ProcessFailed("Missing required header: 'solution'".to_string())
    })?;
    let fault_type_idx = find_idx(&["fault type", "fault"]);
    let causes_idx = find_idx(&["possible causes", "causes"]);
    let steps_idx = find_idx(&["diagnostic steps", "diagnostics"]);

    let get = |record: &csv::StringRecord, idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut lines = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| KbError::ProcessFailed(format!("Failed to parse row: {e}")))?;

        let case = CaseRecord {
            equipment: get(&record, Some(equipment_idx)),
            fault_type: get(&record, fault_type_idx),
            symptom: get(&record, Some(symptom_idx)),
            possible_causes: get(&record, causes_idx),
            diagnostic_steps: get(&record, steps_idx),
            solution: get(&record, Some(solution_idx)),
        };

        if !case.is_complete() {
            warn!("Skipping knowledge base row with missing equipment, symptom, or solution.");
            continue;
        }

        lines.push(case.serialize());
    }

    Ok(lines.join("\n"))
}
