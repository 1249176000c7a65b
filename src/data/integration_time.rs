use crate::data::{count_by, non_empty};
use crate::error::DashboardResult;
use crate::filter::TicketView;
use crate::tickets::Timeframe;

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationBucketCount {
    pub integration: String,
    pub bucket: String,
    pub count: usize,
}

/// Tickets per (integration, creation bucket). The bucket travels as its
/// label so the chart colors it as a discrete series.
pub fn integration_over_time(
    view: &TicketView<'_>,
    timeframe: Timeframe,
) -> DashboardResult<Vec<IntegrationBucketCount>> {
    view.require_rows()?;

    let counts = count_by(view.iter(), |ticket| {
        Some((ticket.integration.clone(), ticket.created_bucket(timeframe)))
    });

    let rows = counts
        .into_iter()
        .map(|((integration, bucket), count)| IntegrationBucketCount {
            integration,
            bucket: bucket.to_string(),
            count,
        })
        .collect();

    non_empty(rows)
}
