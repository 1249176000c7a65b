use crate::data::{count_by, non_empty};
use crate::error::DashboardResult;
use crate::filter::TicketView;
use crate::tickets::Priority;

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationPriorityCount {
    pub integration: String,
    pub priority: Priority,
    pub count: usize,
    pub total: usize,
}

/// Tickets per (integration, priority) for a stacked bar. Integrations are
/// ordered by ascending total, ties by name, and priorities run 1..=4 within
/// each integration.
pub fn integration_by_priority(
    view: &TicketView<'_>,
) -> DashboardResult<Vec<IntegrationPriorityCount>> {
    view.require_rows()?;

    let totals = count_by(view.iter(), |ticket| Some(ticket.integration.clone()));
    let counts = count_by(view.iter(), |ticket| {
        Some((ticket.integration.clone(), ticket.priority))
    });

    let mut rows: Vec<IntegrationPriorityCount> = counts
        .into_iter()
        .map(|((integration, priority), count)| IntegrationPriorityCount {
            total: totals.get(&integration).copied().unwrap_or(count),
            integration,
            priority,
            count,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.total
            .cmp(&b.total)
            .then_with(|| a.integration.cmp(&b.integration))
            .then_with(|| a.priority.cmp(&b.priority))
    });

    non_empty(rows)
}
