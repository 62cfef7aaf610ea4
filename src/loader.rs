use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::models::{TicketRecord, TicketSet, Timestamp};

pub const TEAM_COLUMN: &str = "Team";
pub const ACTIVE_REQUIRED: &[&str] = &["Status", "Assignee", "Requester"];
pub const CLOSED_REQUIRED: &[&str] = &["Status", "Assignee", "Requester", "Last Modified Date"];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Deserialize)]
struct CsvTicket {
    #[serde(rename = "Id", default)]
    id: Option<String>,
    #[serde(rename = "Request", default)]
    request: Option<String>,
    #[serde(rename = "Requester", default)]
    requester: Option<String>,
    #[serde(rename = "Priority", default)]
    priority: Option<String>,
    #[serde(rename = "Category", default)]
    category: Option<String>,
    #[serde(rename = "Created Date", default)]
    created_date: Option<String>,
    #[serde(rename = "Last Modified Date", default)]
    last_modified_date: Option<String>,
    #[serde(rename = "Assignee", default)]
    assignee: Option<String>,
    #[serde(rename = "Team", default)]
    team: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
}

impl From<CsvTicket> for TicketRecord {
    fn from(row: CsvTicket) -> Self {
        TicketRecord {
            id: non_empty(row.id),
            request: non_empty(row.request),
            requester: non_empty(row.requester),
            priority: non_empty(row.priority),
            category: non_empty(row.category),
            created: timestamp(non_empty(row.created_date)),
            last_modified: timestamp(non_empty(row.last_modified_date)),
            assignee: non_empty(row.assignee),
            team: non_empty(row.team),
            status: non_empty(row.status),
            status_type: None,
        }
    }
}

pub fn load_tickets(path: &Path, required: &[&str]) -> anyhow::Result<TicketSet> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_tickets(file, required).with_context(|| format!("failed to read {}", path.display()))
}

pub fn read_tickets<R: Read>(source: R, required: &[&str]) -> anyhow::Result<TicketSet> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in required {
        if !headers.iter().any(|header| header == *column) {
            bail!("missing required column '{column}'");
        }
    }
    let has_team_column = headers.iter().any(|header| header == TEAM_COLUMN);

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<CsvTicket>().enumerate() {
        let row = result.with_context(|| format!("invalid row {}", index + 1))?;
        records.push(TicketRecord::from(row));
    }

    Ok(TicketSet {
        has_team_column,
        records,
    })
}

/// Parses an export timestamp into a timezone-naive UTC value. Offset-aware
/// inputs are shifted to UTC before the offset is dropped. Anything that
/// does not match a known shape yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc).naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(value) = DateTime::parse_from_str(raw, format) {
            return Some(value.with_timezone(&Utc).naive_utc());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn timestamp(raw: Option<String>) -> Timestamp {
    let parsed = raw.as_deref().and_then(parse_timestamp);
    Timestamp { raw, parsed }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
