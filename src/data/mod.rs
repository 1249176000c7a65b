pub mod avg_issues_dev;
pub mod created_vs_closed;
pub mod critical_ratio;
pub mod cycle_waiting;
pub mod developer_tickets;
pub mod gantt;
pub mod integration_priority;
pub mod integration_time;

use std::collections::BTreeMap;

use crate::error::{DashboardError, DashboardResult};
use crate::tickets::Ticket;

/// Counts tickets per key. Tickets whose key is `None` are dropped.
pub(crate) fn count_by<'a, K, I, F>(tickets: I, key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = &'a Ticket>,
    F: Fn(&Ticket) -> Option<K>,
{
    let mut counts = BTreeMap::new();
    for ticket in tickets {
        if let Some(key) = key(ticket) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// Arithmetic mean per key, skipping tickets without a value.
pub(crate) fn mean_by<'a, K, I, F>(tickets: I, value: F) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = &'a Ticket>,
    F: Fn(&Ticket) -> Option<(K, f64)>,
{
    let mut sums: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for ticket in tickets {
        if let Some((key, value)) = value(ticket) {
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

pub(crate) fn non_empty<T>(rows: Vec<T>) -> DashboardResult<Vec<T>> {
    if rows.is_empty() {
        Err(DashboardError::EmptyResult)
    } else {
        Ok(rows)
    }
}
