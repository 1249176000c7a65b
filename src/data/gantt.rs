use chrono::{DateTime, Utc};

use crate::data::non_empty;
use crate::error::DashboardResult;
use crate::filter::TicketView;
use crate::tickets::Priority;

#[derive(Debug, Clone, PartialEq)]
pub struct GanttInterval {
    pub integration: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub priority: Priority,
}

impl GanttInterval {
    pub fn priority_text(&self) -> &'static str {
        self.priority.text()
    }
}

/// One interval per closed ticket, from creation to close, urgent first.
pub fn intervals(view: &TicketView<'_>) -> DashboardResult<Vec<GanttInterval>> {
    let closed = view.closed();
    closed.require_rows()?;

    let mut rows: Vec<GanttInterval> = closed
        .iter()
        .filter_map(|ticket| {
            ticket.date_closed.map(|end| GanttInterval {
                integration: ticket.integration.clone(),
                start: ticket.date_created,
                end,
                priority: ticket.priority,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.integration.cmp(&b.integration))
            .then_with(|| a.start.cmp(&b.start))
    });

    non_empty(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::filter::TicketFilter;
    use crate::fixtures::{january_scenario, ticket, utc};

    fn everything() -> TicketFilter {
        TicketFilter::new(
            utc("2023-01-01 00:00:00"),
            utc("2025-01-01 00:00:00"),
            Priority::ALL.into_iter().collect(),
            ["shopify", "zendesk"].iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn only_closed_tickets_become_intervals() {
        let tickets = january_scenario();
        let rows = intervals(&everything().apply(&tickets)).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].integration, "shopify");
        assert_eq!(rows[0].priority_text(), "urgent");
        assert_eq!(rows[0].start, utc("2024-01-05 00:00:00"));
        assert_eq!(rows[0].end, utc("2024-01-10 00:00:00"));
        assert_eq!(rows[1].priority, Priority::High);
    }

    #[test]
    fn ordered_urgent_to_low() {
        let tickets = vec![
            ticket("a", 4, "zendesk", "2024-01-01 00:00:00", Some("2024-01-02 00:00:00")),
            ticket("b", 2, "zendesk", "2024-01-01 00:00:00", Some("2024-01-02 00:00:00")),
            ticket("c", 1, "shopify", "2024-01-01 00:00:00", Some("2024-01-02 00:00:00")),
        ];
        let rows = intervals(&everything().apply(&tickets)).unwrap();
        let order: Vec<u8> = rows.iter().map(|r| r.priority.num()).collect();
        assert_eq!(order, [1, 2, 4]);
    }

    #[test]
    fn all_open_is_empty_result() {
        let tickets = vec![ticket("open", 1, "shopify", "2024-01-01 00:00:00", None)];
        let err = intervals(&everything().apply(&tickets)).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyResult));
    }
}
