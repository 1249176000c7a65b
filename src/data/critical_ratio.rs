use std::collections::BTreeMap;

use crate::data::non_empty;
use crate::error::DashboardResult;
use crate::filter::TicketView;
use crate::tickets::{Bucket, Timeframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    Critical,
    NonCritical,
}

impl Criticality {
    pub fn label(self) -> &'static str {
        match self {
            Criticality::Critical => "critical",
            Criticality::NonCritical => "non-critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketShare {
    pub bucket: Bucket,
    pub percent: f64,
    pub label: Criticality,
}

/// Share of critical (urgent/high) vs non-critical tickets per creation
/// bucket, in percent. A bucket with no tickets reports 0% for both.
pub fn critical_ratio(
    view: &TicketView<'_>,
    timeframe: Timeframe,
) -> DashboardResult<Vec<BucketShare>> {
    view.require_rows()?;

    let mut tallies: BTreeMap<Bucket, (usize, usize)> = BTreeMap::new();
    for ticket in view.iter() {
        let entry = tallies.entry(ticket.created_bucket(timeframe)).or_default();
        if ticket.priority.is_critical() {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let shares: Vec<(Bucket, f64, f64)> = tallies
        .into_iter()
        .map(|(bucket, (critical, non_critical))| {
            let total = critical + non_critical;
            (bucket, percent(critical, total), percent(non_critical, total))
        })
        .collect();

    let rows = shares
        .iter()
        .map(|(bucket, critical, _)| BucketShare {
            bucket: *bucket,
            percent: *critical,
            label: Criticality::Critical,
        })
        .chain(shares.iter().map(|(bucket, _, non_critical)| BucketShare {
            bucket: *bucket,
            percent: *non_critical,
            label: Criticality::NonCritical,
        }))
        .collect();

    non_empty(rows)
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TicketFilter;
    use crate::fixtures::{january_scenario, ticket, utc};
    use crate::tickets::Priority;
    use approx::assert_relative_eq;

    fn filter(priorities: &[Priority]) -> TicketFilter {
        TicketFilter::new(
            utc("2024-01-01 00:00:00"),
            utc("2024-01-31 00:00:00"),
            priorities.iter().copied().collect(),
            ["shopify", "zendesk"].iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn january_is_split_evenly() {
        let tickets = january_scenario();
        let view = filter(&[Priority::Urgent, Priority::High, Priority::Normal]).apply(&tickets);
        let rows = critical_ratio(&view, Timeframe::Month).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, Criticality::Critical);
        assert_relative_eq!(rows[0].percent, 50.0);
        assert_eq!(rows[1].label, Criticality::NonCritical);
        assert_relative_eq!(rows[1].percent, 50.0);
    }

    #[test]
    fn shares_add_up_to_one_hundred() {
        let tickets = vec![
            ticket("a", 1, "shopify", "2024-01-02 00:00:00", None),
            ticket("b", 3, "shopify", "2024-01-03 00:00:00", None),
            ticket("c", 4, "zendesk", "2024-01-09 00:00:00", None),
            ticket("d", 2, "zendesk", "2024-01-20 00:00:00", None),
            ticket("e", 4, "zendesk", "2024-01-21 00:00:00", None),
        ];
        let view = filter(&Priority::ALL).apply(&tickets);
        let rows = critical_ratio(&view, Timeframe::Week).unwrap();

        let mut by_bucket: BTreeMap<Bucket, f64> = BTreeMap::new();
        for row in &rows {
            *by_bucket.entry(row.bucket).or_default() += row.percent;
        }
        assert!(!by_bucket.is_empty());
        for total in by_bucket.values() {
            assert_relative_eq!(*total, 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_total_is_zero_percent() {
        assert_eq!(percent(0, 0), 0.0);
        assert!(!percent(0, 0).is_nan());
    }
}
