use std::collections::BTreeSet;

use crate::charts::{BarChart, BarLayout, BarSeries, ChartConfig};
use crate::data::cycle_waiting::{BucketHours, TimeSeries};
use crate::theme::series_color;

pub struct CycleWaitingReport;

impl CycleWaitingReport {
    pub fn title() -> &'static str {
        "Cycle & Waiting Time"
    }

    pub fn subtitle() -> &'static str {
        "Mean hours of closed tickets by creation period"
    }

    pub fn chart(rows: &[BucketHours]) -> BarChart {
        let buckets: BTreeSet<_> = rows.iter().map(|row| row.bucket).collect();
        let categories = buckets.iter().map(ToString::to_string).collect();

        let series = [TimeSeries::Cycle, TimeSeries::Waiting]
            .into_iter()
            .enumerate()
            .map(|(index, kind)| {
                let mut series = BarSeries::new(kind.label(), series_color(index + 2));
                for row in rows.iter().filter(|row| row.status == kind) {
                    series.push(row.bucket.to_string(), row.hours as f32);
                }
                series
            })
            .collect();

        BarChart::new(categories, series)
            .with_layout(BarLayout::Stacked)
            .with_config(ChartConfig {
                padding: 40.0,
                grid_lines: 4,
                label_gutter: 0.0,
            })
    }
}
