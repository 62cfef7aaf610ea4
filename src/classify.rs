use chrono::{Duration, NaiveDateTime};

use crate::models::{ClassifiedTickets, StatusType, TicketRecord, TicketSet};

pub const DEFAULT_TEAM: &str = "IT Helpdesk";
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    pub team: String,
    pub window_days: i64,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            team: DEFAULT_TEAM.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

pub fn cutoff(now: NaiveDateTime, window_days: i64) -> NaiveDateTime {
    now - Duration::days(window_days.max(1))
}

/// Restricts a set to one team. Sets without a team column pass through.
pub fn filter_team(set: TicketSet, team: &str) -> Vec<TicketRecord> {
    if !set.has_team_column {
        return set.records;
    }
    set.records
        .into_iter()
        .filter(|record| record.team.as_deref() == Some(team))
        .collect()
}

pub fn within_window(record: &TicketRecord, cutoff: NaiveDateTime) -> bool {
    record
        .last_modified
        .parsed
        .is_some_and(|modified| modified >= cutoff)
}

pub fn is_resolved(record: &TicketRecord) -> bool {
    record
        .status
        .as_deref()
        .is_some_and(|status| status.to_lowercase().contains("resolved"))
}

/// Splits the two exports into tagged active and closed sets.
///
/// Only records from the closed export are held to the trailing window.
/// Resolved records pulled out of the active export join the closed set
/// whatever their last-modified date.
pub fn classify(
    active: TicketSet,
    closed: TicketSet,
    options: &ClassifyOptions,
    now: NaiveDateTime,
) -> ClassifiedTickets {
    let active = filter_team(active, &options.team);
    let cutoff = cutoff(now, options.window_days);

    let mut closed: Vec<TicketRecord> = filter_team(closed, &options.team)
        .into_iter()
        .filter(|record| within_window(record, cutoff))
        .collect();

    let (resolved, mut active): (Vec<_>, Vec<_>) = active.into_iter().partition(is_resolved);
    let resolved_promoted = resolved.len();
    closed.extend(resolved);

    for record in active.iter_mut() {
        record.status_type = Some(StatusType::Active);
    }
    for record in closed.iter_mut() {
        record.status_type = Some(StatusType::Closed);
    }

    ClassifiedTickets {
        active,
        closed,
        resolved_promoted,
    }
}
