use crate::data::{count_by, non_empty};
use crate::error::DashboardResult;
use crate::filter::TicketView;
use crate::tickets::{Bucket, Timeframe};

#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperCount {
    pub developer: String,
    pub quarter: Bucket,
    pub count: usize,
}

/// Tickets per (developer, creation quarter). Always quarterly regardless of
/// the selected timeframe; unassigned tickets are dropped.
pub fn tickets_per_developer(view: &TicketView<'_>) -> DashboardResult<Vec<DeveloperCount>> {
    view.require_rows()?;

    let counts = count_by(view.iter(), |ticket| {
        ticket
            .assigned_dev
            .clone()
            .map(|dev| (dev, ticket.created_bucket(Timeframe::Quarter)))
    });

    let rows = counts
        .into_iter()
        .map(|((developer, quarter), count)| DeveloperCount {
            developer,
            quarter,
            count,
        })
        .collect();

    non_empty(rows)
}
