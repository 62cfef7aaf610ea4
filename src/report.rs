use std::collections::BTreeMap;

use crate::models::{
    AssigneeSummary, Cell, ClassifiedTickets, Sheet, SheetRow, StatusType, StoreCount,
    TicketRecord, Timestamp,
};
use crate::stores;

pub const ASSIGNEE_SUMMARY: &str = "Assignee Summary";
pub const ACTIVE_TICKETS: &str = "Active Tickets";
pub const CLOSED_TICKETS: &str = "Closed Tickets";
pub const STORE_COUNTS: &str = "Store Counts";

pub const UNASSIGNED: &str = "UNASSIGNED";
pub const TICKET_ID: &str = "Ticket ID";

const ACTIVE_HEADERS: &[&str] = &[
    TICKET_ID,
    "Request",
    "Requester",
    "Priority",
    "Category",
    "Created Date",
    "Assignee",
];

const CLOSED_HEADERS: &[&str] = &[
    TICKET_ID,
    "Request",
    "Requester",
    "Priority",
    "Category",
    "Created Date",
    "Last Modified Date",
    "Assignee",
];

const REQUEST_COLUMN: u16 = 1;

pub fn summarize_by_assignee(tickets: &ClassifiedTickets) -> Vec<AssigneeSummary> {
    let mut map: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for record in tickets.active.iter().chain(tickets.closed.iter()) {
        let Some(assignee) = record.assignee_name() else {
            continue;
        };
        let entry = map.entry(assignee).or_insert((0, 0));
        match record.status_type {
            Some(StatusType::Active) => entry.0 += 1,
            Some(StatusType::Closed) => entry.1 += 1,
            None => {}
        }
    }

    map.into_iter()
        .map(|(assignee, (active, closed))| AssigneeSummary {
            assignee: assignee.to_string(),
            active,
            closed,
            total: active + closed,
        })
        .collect()
}

pub fn count_stores(tickets: &ClassifiedTickets, store_names: &[&str]) -> Vec<StoreCount> {
    let requesters: Vec<&str> = tickets
        .active
        .iter()
        .chain(tickets.closed.iter())
        .filter_map(|record| record.requester.as_deref())
        .collect();

    let mut counts: Vec<StoreCount> = store_names
        .iter()
        .map(|store| StoreCount {
            store: store.to_string(),
            count: requesters
                .iter()
                .filter(|requester| stores::requester_matches(requester, store))
                .count(),
        })
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Renders a timestamp as `YYYY-MM-DD HH:MM:SS`. Values that never parsed
/// fall back to the first 19 characters of the raw text.
pub fn format_timestamp(value: &Timestamp) -> String {
    match (&value.parsed, &value.raw) {
        (Some(parsed), _) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        (None, Some(raw)) => raw.chars().take(19).collect(),
        (None, None) => String::new(),
    }
}

pub fn build_sheets(tickets: &ClassifiedTickets, window_days: i64) -> Vec<Sheet> {
    vec![
        assignee_summary_sheet(&summarize_by_assignee(tickets), window_days),
        active_tickets_sheet(&tickets.active),
        closed_tickets_sheet(&tickets.closed, window_days),
        store_counts_sheet(&count_stores(tickets, stores::ALL_STORES)),
    ]
}

pub fn assignee_summary_sheet(summaries: &[AssigneeSummary], window_days: i64) -> Sheet {
    let closed_header = format!("Closed (Last {window_days} Days)");
    let mut rows = vec![header_row(&[
        "Assignee",
        "Active Tickets",
        closed_header.as_str(),
        "Total",
    ])];

    rows.extend(summaries.iter().map(|summary| SheetRow {
        cells: vec![
            text(&summary.assignee),
            Cell::Number(summary.active as f64),
            Cell::Number(summary.closed as f64),
            Cell::Number(summary.total as f64),
        ],
        ..SheetRow::default()
    }));

    Sheet {
        name: ASSIGNEE_SUMMARY.to_string(),
        column_widths: vec![25.0, 15.0, 20.0, 10.0],
        wrap_column: None,
        rows,
    }
}

pub fn active_tickets_sheet(active: &[TicketRecord]) -> Sheet {
    let mut rows = Vec::new();

    let unassigned: Vec<&TicketRecord> = active
        .iter()
        .filter(|record| record.assignee_name().is_none())
        .collect();
    if !unassigned.is_empty() {
        push_section(
            &mut rows,
            UNASSIGNED,
            ACTIVE_HEADERS,
            &unassigned,
            true,
            active_row,
        );
    }

    for (assignee, records) in group_by_assignee(active) {
        push_section(&mut rows, assignee, ACTIVE_HEADERS, &records, false, active_row);
    }

    Sheet {
        name: ACTIVE_TICKETS.to_string(),
        column_widths: vec![10.0, 60.0, 20.0, 12.0, 20.0, 20.0, 18.0],
        wrap_column: Some(REQUEST_COLUMN),
        rows,
    }
}

pub fn closed_tickets_sheet(closed: &[TicketRecord], window_days: i64) -> Sheet {
    let mut rows = Vec::new();
    let groups = group_by_assignee(closed);

    if groups.is_empty() {
        rows.push(SheetRow {
            cells: vec![Cell::Text(format!(
                "No closed tickets in the last {window_days} days"
            ))],
            ..SheetRow::default()
        });
    }

    for (assignee, records) in groups {
        push_section(&mut rows, assignee, CLOSED_HEADERS, &records, false, closed_row);
    }

    Sheet {
        name: CLOSED_TICKETS.to_string(),
        column_widths: vec![10.0, 60.0, 20.0, 12.0, 20.0, 20.0, 20.0, 18.0],
        wrap_column: Some(REQUEST_COLUMN),
        rows,
    }
}

pub fn store_counts_sheet(counts: &[StoreCount]) -> Sheet {
    let mut rows = vec![header_row(&["Store Name", "Number of Tickets"])];

    rows.extend(counts.iter().map(|count| SheetRow {
        cells: vec![text(&count.store), Cell::Number(count.count as f64)],
        ..SheetRow::default()
    }));

    Sheet {
        name: STORE_COUNTS.to_string(),
        column_widths: vec![25.0, 18.0],
        wrap_column: None,
        rows,
    }
}

fn group_by_assignee(records: &[TicketRecord]) -> BTreeMap<&str, Vec<&TicketRecord>> {
    let mut groups: BTreeMap<&str, Vec<&TicketRecord>> = BTreeMap::new();
    for record in records {
        if let Some(assignee) = record.assignee_name() {
            groups.entry(assignee).or_default().push(record);
        }
    }
    groups
}

/// Appends one titled section: bold title, column headers, data rows and a
/// blank separator. `highlight` marks every row but the separator.
fn push_section(
    rows: &mut Vec<SheetRow>,
    title: &str,
    headers: &[&str],
    records: &[&TicketRecord],
    highlight: bool,
    to_cells: fn(&TicketRecord, &str) -> Vec<Cell>,
) {
    let width = headers.len();

    let mut title_cells = vec![text(title)];
    title_cells.resize(width, Cell::Empty);
    rows.push(SheetRow {
        cells: title_cells,
        bold: true,
        highlight,
    });

    rows.push(SheetRow {
        cells: headers.iter().map(|header| text(header)).collect(),
        bold: false,
        highlight,
    });

    for record in records {
        rows.push(SheetRow {
            cells: to_cells(record, title),
            bold: false,
            highlight,
        });
    }

    rows.push(SheetRow {
        cells: vec![Cell::Empty; width],
        ..SheetRow::default()
    });
}

fn active_row(record: &TicketRecord, assignee: &str) -> Vec<Cell> {
    vec![
        id_cell(record.id.as_deref()),
        optional_text(record.request.as_deref()),
        optional_text(record.requester.as_deref()),
        optional_text(record.priority.as_deref()),
        optional_text(record.category.as_deref()),
        timestamp_cell(&record.created),
        text(assignee),
    ]
}

fn closed_row(record: &TicketRecord, assignee: &str) -> Vec<Cell> {
    vec![
        id_cell(record.id.as_deref()),
        optional_text(record.request.as_deref()),
        optional_text(record.requester.as_deref()),
        optional_text(record.priority.as_deref()),
        optional_text(record.category.as_deref()),
        timestamp_cell(&record.created),
        timestamp_cell(&record.last_modified),
        text(assignee),
    ]
}

fn header_row(headers: &[&str]) -> SheetRow {
    SheetRow {
        cells: headers.iter().map(|header| text(header)).collect(),
        bold: true,
        highlight: false,
    }
}

fn id_cell(id: Option<&str>) -> Cell {
    match id {
        Some(value) => match value.parse::<i64>() {
            Ok(number) => Cell::Number(number as f64),
            Err(_) => text(value),
        },
        None => Cell::Empty,
    }
}

fn timestamp_cell(value: &Timestamp) -> Cell {
    let formatted = format_timestamp(value);
    if formatted.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(formatted)
    }
}

fn optional_text(value: Option<&str>) -> Cell {
    value.map(text).unwrap_or(Cell::Empty)
}

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(id: &str, assignee: &str, requester: &str, status_type: StatusType) -> TicketRecord {
        TicketRecord {
            id: Some(id.to_string()),
            assignee: Some(assignee.to_string()).filter(|name| !name.is_empty()),
            requester: Some(requester.to_string()),
            status_type: Some(status_type),
            ..TicketRecord::default()
        }
    }

    fn tickets(active: Vec<TicketRecord>, closed: Vec<TicketRecord>) -> ClassifiedTickets {
        ClassifiedTickets {
            active,
            closed,
            resolved_promoted: 0,
        }
    }

    fn first_texts(sheet: &Sheet) -> Vec<String> {
        sheet
            .rows
            .iter()
            .map(|row| match row.cells.first() {
                Some(Cell::Text(value)) => value.clone(),
                Some(Cell::Number(value)) => value.to_string(),
                _ => String::new(),
            })
            .collect()
    }

    #[test]
    fn summary_counts_each_status_per_assignee() {
        let data = tickets(
            vec![
                record("1", "Zoe", "Neon", StatusType::Active),
                record("2", "Alice", "Neon", StatusType::Active),
                record("3", "", "Neon", StatusType::Active),
            ],
            vec![
                record("4", "Alice", "Neon", StatusType::Closed),
                record("5", "Alice", "Neon", StatusType::Closed),
            ],
        );

        let summary = summarize_by_assignee(&data);
        assert_eq!(
            summary,
            vec![
                AssigneeSummary {
                    assignee: "Alice".to_string(),
                    active: 1,
                    closed: 2,
                    total: 3,
                },
                AssigneeSummary {
                    assignee: "Zoe".to_string(),
                    active: 1,
                    closed: 0,
                    total: 1,
                },
            ]
        );
    }

    #[test]
    fn store_counts_sort_descending_and_keep_every_store() {
        let data = tickets(
            vec![
                record("1", "Alice", "neon store", StatusType::Active),
                record("2", "Alice", "NEON", StatusType::Active),
            ],
            vec![record("3", "Bob", "Jenkins", StatusType::Closed)],
        );

        let counts = count_stores(&data, stores::ALL_STORES);
        assert_eq!(counts.len(), stores::ALL_STORES.len());
        assert_eq!(counts[0].store, "Neon");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].store, "Jenkins");
        assert_eq!(counts[1].count, 1);
        assert!(counts.windows(2).all(|pair| pair[0].count >= pair[1].count));
        // zero-count stores stay in reference order
        assert_eq!(counts[2].store, "Harlan 1");
    }

    #[test]
    fn active_sheet_puts_unassigned_first_and_highlights_it() {
        let sheet = active_tickets_sheet(&[
            record("7", "Bob", "Neon", StatusType::Active),
            record("8", "", "Neon", StatusType::Active),
            record("9", "Alice", "Neon", StatusType::Active),
        ]);

        assert_eq!(
            first_texts(&sheet),
            vec![
                "UNASSIGNED", "Ticket ID", "8", "", "Alice", "Ticket ID", "9", "", "Bob",
                "Ticket ID", "7", "",
            ]
        );
        assert!(sheet.rows[..3].iter().all(|row| row.highlight));
        assert!(sheet.rows[3..].iter().all(|row| !row.highlight));
        assert_eq!(sheet.rows[2].cells[6], Cell::Text(UNASSIGNED.to_string()));
        assert_eq!(sheet.wrap_column, Some(1));
    }

    #[test]
    fn active_sheet_without_unassigned_has_no_unassigned_section() {
        let sheet = active_tickets_sheet(&[record("1", "Alice", "Neon", StatusType::Active)]);
        assert!(!first_texts(&sheet).contains(&UNASSIGNED.to_string()));
    }

    #[test]
    fn every_section_title_precedes_a_bold_header() {
        let sheet = active_tickets_sheet(&[
            record("1", "", "Neon", StatusType::Active),
            record("2", "Alice", "Neon", StatusType::Active),
        ]);
        for (index, row) in sheet.rows.iter().enumerate() {
            let next_is_header = sheet
                .rows
                .get(index + 1)
                .is_some_and(|next| next.cells[0] == Cell::Text(TICKET_ID.to_string()));
            assert_eq!(row.bold, next_is_header);
        }
    }

    #[test]
    fn closed_sheet_drops_unassigned_and_adds_modified_column() {
        let mut closed = record("4", "Bob", "Neon", StatusType::Closed);
        closed.last_modified = Timestamp {
            raw: Some("2026-10-15T08:00:00Z".to_string()),
            parsed: NaiveDateTime::parse_from_str("2026-10-15 08:00:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
        };
        let sheet = closed_tickets_sheet(
            &[closed, record("5", "", "Neon", StatusType::Closed)],
            7,
        );

        assert_eq!(first_texts(&sheet), vec!["Bob", "Ticket ID", "4", ""]);
        assert_eq!(sheet.rows[1].cells[6], Cell::Text("Last Modified Date".to_string()));
        assert_eq!(sheet.rows[2].cells[6], Cell::Text("2026-10-15 08:00:00".to_string()));
        assert_eq!(sheet.rows[2].cells[7], Cell::Text("Bob".to_string()));
    }

    #[test]
    fn closed_sheet_placeholder_when_nothing_assigned() {
        let sheet = closed_tickets_sheet(&[record("5", "", "Neon", StatusType::Closed)], 7);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(
            sheet.rows[0].cells,
            vec![Cell::Text("No closed tickets in the last 7 days".to_string())]
        );
    }

    #[test]
    fn timestamps_format_or_truncate() {
        let parsed = Timestamp {
            raw: Some("ignored".to_string()),
            parsed: NaiveDateTime::parse_from_str("2026-10-12 09:15:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
        };
        assert_eq!(format_timestamp(&parsed), "2026-10-12 09:15:00");

        let unparsed = Timestamp {
            raw: Some("sometime around lunch on monday".to_string()),
            parsed: None,
        };
        assert_eq!(format_timestamp(&unparsed), "sometime around lun");
        assert_eq!(format_timestamp(&Timestamp::default()), "");
    }

    #[test]
    fn numeric_ids_become_numbers() {
        assert_eq!(id_cell(Some("1042")), Cell::Number(1042.0));
        assert_eq!(id_cell(Some("INC-7")), Cell::Text("INC-7".to_string()));
        assert_eq!(id_cell(None), Cell::Empty);
    }

    #[test]
    fn sheets_come_out_in_workbook_order() {
        let names: Vec<String> = build_sheets(&tickets(vec![], vec![]), 7)
            .into_iter()
            .map(|sheet| sheet.name)
            .collect();
        assert_eq!(
            names,
            vec![ASSIGNEE_SUMMARY, ACTIVE_TICKETS, CLOSED_TICKETS, STORE_COUNTS]
        );
    }
}
