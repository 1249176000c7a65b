use crate::data::{mean_by, non_empty};
use crate::error::DashboardResult;
use crate::filter::TicketView;
use crate::tickets::{Bucket, Timeframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSeries {
    Cycle,
    Waiting,
}

impl TimeSeries {
    pub fn label(self) -> &'static str {
        match self {
            TimeSeries::Cycle => "cycle time",
            TimeSeries::Waiting => "waiting time",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketHours {
    pub bucket: Bucket,
    pub hours: f64,
    pub status: TimeSeries,
}

/// Mean cycle and waiting hours of closed tickets per creation bucket.
///
/// Tickets missing `date_progress` do not contribute to either mean.
pub fn cycle_waiting(
    view: &TicketView<'_>,
    timeframe: Timeframe,
) -> DashboardResult<Vec<BucketHours>> {
    let closed = view.closed();
    closed.require_rows()?;

    let cycle = mean_by(closed.iter(), |ticket| {
        ticket
            .cycle_hours()
            .map(|hours| (ticket.created_bucket(timeframe), hours))
    });
    let waiting = mean_by(closed.iter(), |ticket| {
        ticket
            .waiting_hours()
            .map(|hours| (ticket.created_bucket(timeframe), hours))
    });

    let rows = cycle
        .into_iter()
        .map(|(bucket, hours)| BucketHours {
            bucket,
            hours,
            status: TimeSeries::Cycle,
        })
        .chain(waiting.into_iter().map(|(bucket, hours)| BucketHours {
            bucket,
            hours,
            status: TimeSeries::Waiting,
        }))
        .collect();

    non_empty(rows)
}
