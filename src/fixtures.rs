use chrono::{DateTime, NaiveDateTime, Utc};

use crate::tickets::{Ticket, TicketDraft};

pub fn utc(value: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .expect("fixture timestamp")
        .and_utc()
}

pub fn draft(
    name: &str,
    priority_num: i64,
    integration: &str,
    created: &str,
    closed: Option<&str>,
) -> TicketDraft {
    TicketDraft {
        name: name.to_owned(),
        date_created: Some(utc(created)),
        date_progress: None,
        date_closed: closed.map(utc),
        priority_num: Some(priority_num),
        integration: Some(integration.to_owned()),
        assigned_dev: None,
        status: Some(if closed.is_some() { "closed" } else { "open" }.to_owned()),
    }
}

pub fn ticket(
    name: &str,
    priority_num: i64,
    integration: &str,
    created: &str,
    closed: Option<&str>,
) -> Ticket {
    Ticket::try_from(draft(name, priority_num, integration, created, closed)).expect("fixture ticket")
}

pub fn with_dev(mut ticket: Ticket, dev: &str) -> Ticket {
    ticket.assigned_dev = Some(dev.to_owned());
    ticket
}

pub fn with_progress(mut ticket: Ticket, progress: &str) -> Ticket {
    ticket.date_progress = Some(utc(progress));
    ticket
}

/// The three-ticket dataset used across the aggregation tests.
pub fn january_scenario() -> Vec<Ticket> {
    vec![
        ticket("T-1", 1, "shopify", "2024-01-05 00:00:00", Some("2024-01-10 00:00:00")),
        ticket("T-2", 3, "shopify", "2024-01-06 00:00:00", None),
        ticket("T-3", 2, "zendesk", "2024-02-01 00:00:00", Some("2024-02-03 00:00:00")),
    ]
}
