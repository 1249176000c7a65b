use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{DashboardError, DashboardResult};
use crate::tickets::{start_of_day, Priority, Ticket};

/// Date range, priority and integration predicates over the ticket table.
///
/// Both date bounds are inclusive and compared against `date_created`. An
/// empty priority or integration set lets nothing through.
#[derive(Debug, Clone)]
pub struct TicketFilter {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub priorities: BTreeSet<Priority>,
    pub integrations: BTreeSet<String>,
}

impl TicketFilter {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        priorities: BTreeSet<Priority>,
        integrations: BTreeSet<String>,
    ) -> Self {
        Self {
            start,
            end,
            priorities,
            integrations,
        }
    }

    /// Calendar dates are normalized to midnight UTC.
    pub fn for_dates(
        start: NaiveDate,
        end: NaiveDate,
        priorities: BTreeSet<Priority>,
        integrations: BTreeSet<String>,
    ) -> Self {
        Self::new(start_of_day(start), start_of_day(end), priorities, integrations)
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        ticket.date_created >= self.start
            && ticket.date_created <= self.end
            && self.priorities.contains(&ticket.priority)
            && self.integrations.contains(&ticket.integration)
    }

    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> TicketView<'a> {
        TicketView {
            tickets: tickets.iter().filter(|ticket| self.matches(ticket)).collect(),
        }
    }
}

/// Borrowed, filtered view of the base table. The table itself is never
/// touched.
#[derive(Debug, Clone, Default)]
pub struct TicketView<'a> {
    tickets: Vec<&'a Ticket>,
}

impl<'a> TicketView<'a> {
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Ticket> + '_ {
        self.tickets.iter().copied()
    }

    /// Status predicate for the charts that only make sense for finished
    /// work (Gantt, cycle and waiting time).
    pub fn closed(&self) -> TicketView<'a> {
        TicketView {
            tickets: self.iter().filter(|ticket| ticket.is_closed()).collect(),
        }
    }

    pub fn require_rows(&self) -> DashboardResult<&Self> {
        if self.is_empty() {
            Err(DashboardError::EmptyResult)
        } else {
            Ok(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{january_scenario, ticket, utc};

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    fn january(priorities: &[Priority], integrations: &[&str]) -> TicketFilter {
        TicketFilter::for_dates(
            date("2024-01-01"),
            date("2024-01-31"),
            priorities.iter().copied().collect(),
            set(integrations),
        )
    }

    #[test]
    fn keeps_only_rows_matching_every_predicate() {
        let tickets = vec![
            ticket("in", 1, "shopify", "2024-01-05 00:00:00", None),
            ticket("late", 1, "shopify", "2024-02-05 00:00:00", None),
            ticket("low", 4, "shopify", "2024-01-05 00:00:00", None),
            ticket("other", 1, "xero", "2024-01-05 00:00:00", None),
        ];
        let filter = january(&[Priority::Urgent, Priority::High], &["shopify", "zendesk"]);

        let view = filter.apply(&tickets);
        let names: Vec<&str> = view.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["in"]);
        assert!(view.iter().all(|t| filter.matches(t)));
        assert_eq!(tickets.len(), 4);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let tickets = vec![
            ticket("first", 1, "shopify", "2024-01-01 00:00:00", None),
            ticket("last", 1, "shopify", "2024-01-31 00:00:00", None),
            ticket("after", 1, "shopify", "2024-01-31 00:00:01", None),
        ];
        let view = january(&Priority::ALL, &["shopify"]).apply(&tickets);
        let names: Vec<&str> = view.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["first", "last"]);
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let tickets = january_scenario();
        let filter = TicketFilter::new(
            utc("2024-02-01 00:00:00"),
            utc("2024-01-01 00:00:00"),
            Priority::ALL.into_iter().collect(),
            set(&["shopify", "zendesk"]),
        );
        let view = filter.apply(&tickets);
        assert!(view.is_empty());
        assert!(matches!(view.require_rows(), Err(DashboardError::EmptyResult)));
    }

    #[test]
    fn empty_selections_yield_nothing() {
        let tickets = january_scenario();
        assert!(january(&Priority::ALL, &[]).apply(&tickets).is_empty());
        assert!(january(&[], &["shopify"]).apply(&tickets).is_empty());
    }

    #[test]
    fn closed_narrowing_keeps_filter_predicates() {
        let tickets = january_scenario();
        let view = january(&Priority::ALL, &["shopify", "zendesk"]).apply(&tickets);

        let closed: Vec<&str> = view.closed().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(view.len(), 2);
        assert_eq!(closed, ["T-1"]);
    }
}
