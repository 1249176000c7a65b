use crate::data::{count_by, non_empty};
use crate::error::DashboardResult;
use crate::filter::TicketView;
use crate::tickets::{Bucket, Timeframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketFlow {
    Opened,
    Closed,
}

impl TicketFlow {
    pub fn label(self) -> &'static str {
        match self {
            TicketFlow::Opened => "tickets opened",
            TicketFlow::Closed => "tickets closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowCount {
    pub bucket: Bucket,
    pub count: usize,
    pub status: TicketFlow,
}

/// Tickets created per `created_<tf>` bucket followed by tickets closed per
/// `closed_<tf>` bucket.
pub fn created_vs_closed(
    view: &TicketView<'_>,
    timeframe: Timeframe,
) -> DashboardResult<Vec<FlowCount>> {
    view.require_rows()?;

    let opened = count_by(view.iter(), |ticket| Some(ticket.created_bucket(timeframe)));
    let closed = count_by(view.iter(), |ticket| ticket.closed_bucket(timeframe));

    let rows = opened
        .into_iter()
        .map(|(bucket, count)| FlowCount {
            bucket,
            count,
            status: TicketFlow::Opened,
        })
        .chain(closed.into_iter().map(|(bucket, count)| FlowCount {
            bucket,
            count,
            status: TicketFlow::Closed,
        }))
        .collect();

    non_empty(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TicketFilter;
    use crate::fixtures::{january_scenario, ticket, utc};
    use crate::tickets::Priority;

    fn filter(start: &str, end: &str) -> TicketFilter {
        TicketFilter::new(
            utc(start),
            utc(end),
            Priority::ALL.into_iter().collect(),
            ["shopify", "zendesk"].iter().map(|s| s.to_string()).collect(),
        )
    }

    fn total(rows: &[FlowCount], status: TicketFlow) -> usize {
        rows.iter()
            .filter(|row| row.status == status)
            .map(|row| row.count)
            .sum()
    }

    #[test]
    fn opened_and_closed_sums_match_filtered_view() {
        let tickets = january_scenario();
        let view = filter("2024-01-01 00:00:00", "2024-12-31 00:00:00").apply(&tickets);
        let rows = created_vs_closed(&view, Timeframe::Month).unwrap();

        assert_eq!(total(&rows, TicketFlow::Opened), view.len());
        assert_eq!(
            total(&rows, TicketFlow::Closed),
            view.iter().filter(|t| t.date_closed.is_some()).count()
        );
    }

    #[test]
    fn january_has_two_opened() {
        let tickets = january_scenario();
        let view = filter("2024-01-01 00:00:00", "2024-01-31 00:00:00").apply(&tickets);
        let rows = created_vs_closed(&view, Timeframe::Month).unwrap();

        let january = rows
            .iter()
            .find(|row| row.status == TicketFlow::Opened && row.bucket.to_string() == "2024-01")
            .unwrap();
        assert_eq!(january.count, 2);
    }

    #[test]
    fn closed_rows_use_the_close_bucket() {
        let tickets = vec![ticket(
            "spans",
            2,
            "shopify",
            "2024-03-30 00:00:00",
            Some("2024-04-02 00:00:00"),
        )];
        let view = filter("2024-01-01 00:00:00", "2024-12-31 00:00:00").apply(&tickets);
        let rows = created_vs_closed(&view, Timeframe::Quarter).unwrap();

        let labels: Vec<(String, &str)> = rows
            .iter()
            .map(|row| (row.bucket.to_string(), row.status.label()))
            .collect();
        assert_eq!(
            labels,
            [
                ("2024-Q1".to_owned(), "tickets opened"),
                ("2024-Q2".to_owned(), "tickets closed"),
            ]
        );
    }
}
