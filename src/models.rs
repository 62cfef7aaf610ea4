use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusType {
    Active,
    Closed,
}

/// A timestamp cell as it arrived in the export, plus its parsed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timestamp {
    pub raw: Option<String>,
    pub parsed: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default)]
pub struct TicketRecord {
    pub id: Option<String>,
    pub request: Option<String>,
    pub requester: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub created: Timestamp,
    pub last_modified: Timestamp,
    pub assignee: Option<String>,
    pub team: Option<String>,
    pub status: Option<String>,
    pub status_type: Option<StatusType>,
}

impl TicketRecord {
    /// Assignee name, or `None` when the cell was empty or missing.
    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_deref().filter(|name| !name.is_empty())
    }
}

/// One CSV export after loading. `has_team_column` records whether the
/// export carried a `Team` column at all.
#[derive(Debug, Clone, Default)]
pub struct TicketSet {
    pub has_team_column: bool,
    pub records: Vec<TicketRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassifiedTickets {
    pub active: Vec<TicketRecord>,
    pub closed: Vec<TicketRecord>,
    pub resolved_promoted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeSummary {
    pub assignee: String,
    pub active: usize,
    pub closed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCount {
    pub store: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetRow {
    pub cells: Vec<Cell>,
    pub bold: bool,
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub column_widths: Vec<f64>,
    pub wrap_column: Option<u16>,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output: String,
    pub active_tickets: usize,
    pub closed_tickets: usize,
    pub resolved_promoted: usize,
    pub assignees: usize,
    pub cutoff: NaiveDateTime,
}
