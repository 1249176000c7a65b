use std::collections::BTreeSet;

use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::data::avg_issues_dev::{avg_issues_per_dev, BucketAverage};
use crate::data::created_vs_closed::{created_vs_closed, FlowCount};
use crate::data::critical_ratio::{critical_ratio, BucketShare};
use crate::data::cycle_waiting::{cycle_waiting, BucketHours};
use crate::data::developer_tickets::{tickets_per_developer, DeveloperCount};
use crate::data::gantt::{intervals, GanttInterval};
use crate::data::integration_priority::{integration_by_priority, IntegrationPriorityCount};
use crate::data::integration_time::{integration_over_time, IntegrationBucketCount};
use crate::error::DashboardResult;
use crate::filter::TicketFilter;
use crate::integrations::{all_integrations, default_time_integrations};
use crate::tickets::{Priority, Ticket, Timeframe};

/// Everything the user can choose in the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardParams {
    pub timeframe: Timeframe,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub priorities: BTreeSet<Priority>,
    pub integrations: BTreeSet<String>,
    /// Separate selection used only by the integration-over-time chart.
    pub time_integrations: BTreeSet<String>,
}

impl DashboardParams {
    pub fn with_defaults(today: NaiveDate, lookback_months: u32) -> Self {
        let start_date = today
            .checked_sub_months(Months::new(lookback_months))
            .unwrap_or(today);

        Self {
            timeframe: Timeframe::Quarter,
            start_date,
            end_date: today,
            priorities: Priority::ALL.into_iter().collect(),
            integrations: all_integrations(),
            time_integrations: default_time_integrations(),
        }
    }

    pub fn filter(&self) -> TicketFilter {
        TicketFilter::for_dates(
            self.start_date,
            self.end_date,
            self.priorities.clone(),
            self.integrations.clone(),
        )
    }

    pub fn time_filter(&self) -> TicketFilter {
        TicketFilter::for_dates(
            self.start_date,
            self.end_date,
            self.priorities.clone(),
            self.time_integrations.clone(),
        )
    }
}

/// One result table per chart. Each entry fails independently.
#[derive(Debug)]
pub struct DashboardResults {
    pub gantt: DashboardResult<Vec<GanttInterval>>,
    pub developers: DashboardResult<Vec<DeveloperCount>>,
    pub integration_time: DashboardResult<Vec<IntegrationBucketCount>>,
    pub integration_priority: DashboardResult<Vec<IntegrationPriorityCount>>,
    pub created_vs_closed: DashboardResult<Vec<FlowCount>>,
    pub critical_ratio: DashboardResult<Vec<BucketShare>>,
    pub cycle_waiting: DashboardResult<Vec<BucketHours>>,
    pub avg_issues_dev: DashboardResult<Vec<BucketAverage>>,
}

impl DashboardResults {
    fn outcomes(&self) -> [(&'static str, bool); 8] {
        [
            ("gantt", self.gantt.is_ok()),
            ("developers", self.developers.is_ok()),
            ("integration_time", self.integration_time.is_ok()),
            ("integration_priority", self.integration_priority.is_ok()),
            ("created_vs_closed", self.created_vs_closed.is_ok()),
            ("critical_ratio", self.critical_ratio.is_ok()),
            ("cycle_waiting", self.cycle_waiting.is_ok()),
            ("avg_issues_dev", self.avg_issues_dev.is_ok()),
        ]
    }
}

/// Filters the base table once per selection and runs every aggregation over
/// the shared view.
pub fn compute(tickets: &[Ticket], params: &DashboardParams) -> DashboardResults {
    let view = params.filter().apply(tickets);
    let time_view = params.time_filter().apply(tickets);
    let timeframe = params.timeframe;

    let results = DashboardResults {
        gantt: intervals(&view),
        developers: tickets_per_developer(&view),
        integration_time: integration_over_time(&time_view, timeframe),
        integration_priority: integration_by_priority(&view),
        created_vs_closed: created_vs_closed(&view, timeframe),
        critical_ratio: critical_ratio(&view, timeframe),
        cycle_waiting: cycle_waiting(&view, timeframe),
        avg_issues_dev: avg_issues_per_dev(&view, timeframe),
    };

    debug!(
        total = tickets.len(),
        filtered = view.len(),
        time_filtered = time_view.len(),
        timeframe = timeframe.label(),
        "recomputed dashboard"
    );
    for (chart, has_rows) in results.outcomes() {
        debug!(chart, has_rows, "chart result");
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::fixtures::january_scenario;
    use crate::tickets::Timeframe;
    use approx::assert_relative_eq;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn january_params() -> DashboardParams {
        DashboardParams {
            timeframe: Timeframe::Month,
            start_date: date("2024-01-01"),
            end_date: date("2024-01-31"),
            priorities: [Priority::Urgent, Priority::High, Priority::Normal]
                .into_iter()
                .collect(),
            integrations: ["shopify", "zendesk"].iter().map(|s| s.to_string()).collect(),
            time_integrations: ["shopify"].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn january_scenario_end_to_end() {
        let tickets = january_scenario();
        let results = compute(&tickets, &january_params());

        let gantt = results.gantt.unwrap();
        assert_eq!(gantt.len(), 1);
        assert_eq!(gantt[0].integration, "shopify");

        let opened: usize = results
            .created_vs_closed
            .unwrap()
            .iter()
            .filter(|row| row.bucket.to_string() == "2024-01" && row.status.label() == "tickets opened")
            .map(|row| row.count)
            .sum();
        assert_eq!(opened, 2);

        let ratio = results.critical_ratio.unwrap();
        assert_eq!(ratio.len(), 2);
        for row in ratio {
            assert_eq!(row.bucket.to_string(), "2024-01");
            assert_relative_eq!(row.percent, 50.0);
        }
    }

    #[test]
    fn empty_integration_selection_empties_every_chart() {
        let tickets = january_scenario();
        let mut params = january_params();
        params.integrations.clear();
        params.time_integrations.clear();

        let results = compute(&tickets, &params);

        assert!(matches!(results.gantt, Err(DashboardError::EmptyResult)));
        assert!(matches!(results.developers, Err(DashboardError::EmptyResult)));
        assert!(matches!(results.integration_time, Err(DashboardError::EmptyResult)));
        assert!(matches!(results.integration_priority, Err(DashboardError::EmptyResult)));
        assert!(matches!(results.created_vs_closed, Err(DashboardError::EmptyResult)));
        assert!(matches!(results.critical_ratio, Err(DashboardError::EmptyResult)));
        assert!(matches!(results.cycle_waiting, Err(DashboardError::EmptyResult)));
        assert!(matches!(results.avg_issues_dev, Err(DashboardError::EmptyResult)));
    }

    #[test]
    fn defaults_look_back_from_today() {
        let params = DashboardParams::with_defaults(date("2024-08-31"), 6);
        assert_eq!(params.start_date, date("2024-02-29"));
        assert_eq!(params.end_date, date("2024-08-31"));
        assert_eq!(params.priorities.len(), 4);
        assert!(params.time_integrations.contains("google ad"));
    }
}
