//! Loading parameter samples from CSV and JSON files
//!
//! CSV files carry a header row. The delimiter is detected from the header
//! (`,` `;` tab or `|`, whichever occurs most often). Recognized columns:
//!
//! | column                                  | required |
//! |-----------------------------------------|----------|
//! | `parameter_name`, `parameter`, `name`   | yes      |
//! | `value`, `parameter_value`              | yes      |
//! | `unit`                                  | no       |
//! | `timestamp`, `measurement_timestamp`    | no (RFC 3339) |
//!
//! JSON files hold an array of [`ParameterSample`].

use crate::sample::ParameterSample;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Load samples from a file, choosing the parser by extension
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<ParameterSample>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let samples = if is_json {
        parse_json(&content)
    } else {
        parse_csv(&content)
    }
    .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Parse a JSON array of samples
pub fn parse_json(content: &str) -> Result<Vec<ParameterSample>> {
    let samples: Vec<ParameterSample> =
        serde_json::from_str(content).context("Invalid sample JSON")?;

    for (i, sample) in samples.iter().enumerate() {
        if !sample.value.is_finite() {
            bail!(
                "Sample {} ('{}') has non-finite value",
                i,
                sample.parameter_name
            );
        }
    }

    Ok(samples)
}

/// Pick the delimiter that occurs most often in the header line
pub fn detect_delimiter(line: &str) -> u8 {
    let mut best = b',';
    let mut max_count = 0;

    for delimiter in DELIMITERS {
        let count = line.bytes().filter(|&b| b == delimiter).count();
        if count > max_count {
            max_count = count;
            best = delimiter;
        }
    }

    best
}

/// Column positions resolved from the header row
struct Columns {
    name: usize,
    value: usize,
    unit: Option<usize>,
    timestamp: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let find = |aliases: &[&str]| {
            header
                .iter()
                .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
        };

        let Some(name) = find(&["parameter_name", "parameter", "name"]) else {
            bail!("Missing parameter name column (parameter_name, parameter or name)");
        };
        let Some(value) = find(&["value", "parameter_value"]) else {
            bail!("Missing value column (value or parameter_value)");
        };

        Ok(Self {
            name,
            value,
            unit: find(&["unit"]),
            timestamp: find(&["timestamp", "measurement_timestamp"]),
        })
    }
}

/// Parse CSV content with a header row into samples
///
/// Fields follow RFC 4180 quoting (`""` inside a quoted field is a literal
/// quote) and are trimmed. Rows may be shorter than the header; missing
/// optional fields read as empty.
pub fn parse_csv(content: &str) -> Result<Vec<ParameterSample>> {
    let Some(header_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        bail!("CSV input is empty");
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(header_line))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let columns = Columns::from_header(reader.headers().context("Failed to read CSV header")?)?;

    let mut samples = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV record {}", idx + 1))?;
        let line_no = record.position().map_or(idx as u64 + 2, |pos| pos.line());

        if record.iter().all(str::is_empty) {
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or("");

        let name = field(columns.name);
        if name.is_empty() {
            bail!("Line {}: empty parameter name", line_no);
        }

        let raw_value = field(columns.value);
        let value: f64 = raw_value
            .parse()
            .with_context(|| format!("Line {}: invalid value '{}'", line_no, raw_value))?;
        if !value.is_finite() {
            bail!("Line {}: non-finite value '{}'", line_no, raw_value);
        }

        let timestamp = match columns.timestamp.map(field) {
            Some(raw) if !raw.is_empty() => Some(
                DateTime::parse_from_rfc3339(raw)
                    .with_context(|| format!("Line {}: invalid timestamp '{}'", line_no, raw))?
                    .with_timezone(&Utc),
            ),
            _ => None,
        };

        samples.push(ParameterSample {
            parameter_name: name.to_string(),
            value,
            unit: columns.unit.map(field).unwrap_or("").to_string(),
            timestamp,
        });
    }

    Ok(samples)
}
