use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::data::non_empty;
use crate::error::DashboardResult;
use crate::filter::TicketView;
use crate::tickets::{Bucket, Timeframe};

#[derive(Debug, Clone, PartialEq)]
pub struct BucketAverage {
    pub bucket: Bucket,
    pub tickets: usize,
    pub developers: usize,
    pub average: f64,
}

/// Tickets per distinct assigned developer in each creation bucket.
///
/// Buckets where nobody is assigned have no meaningful average and are left
/// out.
pub fn avg_issues_per_dev(
    view: &TicketView<'_>,
    timeframe: Timeframe,
) -> DashboardResult<Vec<BucketAverage>> {
    view.require_rows()?;

    let mut groups: BTreeMap<Bucket, (usize, BTreeSet<&str>)> = BTreeMap::new();
    for ticket in view.iter() {
        let entry = groups.entry(ticket.created_bucket(timeframe)).or_default();
        entry.0 += 1;
        if let Some(dev) = ticket.assigned_dev.as_deref() {
            entry.1.insert(dev);
        }
    }

    let rows = groups
        .into_iter()
        .filter_map(|(bucket, (tickets, developers))| {
            if developers.is_empty() {
                debug!(%bucket, tickets, "skipping bucket without assigned developers");
                return None;
            }
            Some(BucketAverage {
                bucket,
                tickets,
                developers: developers.len(),
                average: tickets as f64 / developers.len() as f64,
            })
        })
        .collect();

    non_empty(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::filter::TicketFilter;
    use crate::fixtures::{ticket, utc, with_dev};
    use crate::tickets::{Priority, Ticket};
    use approx::assert_relative_eq;

    fn filter() -> TicketFilter {
        TicketFilter::new(
            utc("2024-01-01 00:00:00"),
            utc("2024-12-31 00:00:00"),
            Priority::ALL.into_iter().collect(),
            ["shopify", "zendesk"].iter().map(|s| s.to_string()).collect(),
        )
    }

    fn dataset() -> Vec<Ticket> {
        vec![
            with_dev(ticket("a", 1, "shopify", "2024-01-02 00:00:00", None), "ana"),
            with_dev(ticket("b", 2, "shopify", "2024-01-03 00:00:00", None), "ana"),
            with_dev(ticket("c", 3, "zendesk", "2024-01-04 00:00:00", None), "bo"),
            ticket("d", 3, "zendesk", "2024-01-05 00:00:00", None),
            ticket("e", 3, "zendesk", "2024-05-05 00:00:00", None),
        ]
    }

    #[test]
    fn divides_ticket_count_by_distinct_developers() {
        let tickets = dataset();
        let rows = avg_issues_per_dev(&filter().apply(&tickets), Timeframe::Month).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bucket.to_string(), "2024-01");
        assert_eq!(rows[0].tickets, 4);
        assert_eq!(rows[0].developers, 2);
        assert_relative_eq!(rows[0].average, 2.0);
    }

    #[test]
    fn recomputing_leaves_base_table_untouched() {
        let tickets = dataset();
        let filter = filter();

        let first = avg_issues_per_dev(&filter.apply(&tickets), Timeframe::Quarter).unwrap();
        let second = avg_issues_per_dev(&filter.apply(&tickets), Timeframe::Quarter).unwrap();

        assert_eq!(first, second);
        assert_eq!(tickets.len(), 5);
        assert_eq!(tickets[3].assigned_dev, None);
    }

    #[test]
    fn unassigned_only_is_empty_result() {
        let tickets = vec![ticket("d", 3, "zendesk", "2024-01-05 00:00:00", None)];
        let err = avg_issues_per_dev(&filter().apply(&tickets), Timeframe::Week).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyResult));
    }
}
