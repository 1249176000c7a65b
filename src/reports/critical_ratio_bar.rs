use std::collections::BTreeSet;

use crate::charts::{BarChart, BarLayout, BarSeries, ChartConfig};
use crate::data::critical_ratio::{BucketShare, Criticality};
use crate::theme::priority_color;
use crate::tickets::Priority;

pub struct CriticalRatioReport;

impl CriticalRatioReport {
    pub fn title() -> &'static str {
        "Tickets - Critical vs. Non-Critical"
    }

    pub fn subtitle() -> &'static str {
        "Share of urgent and high priority tickets per period (%)"
    }

    pub fn chart(rows: &[BucketShare]) -> BarChart {
        let buckets: BTreeSet<_> = rows.iter().map(|row| row.bucket).collect();
        let categories = buckets.iter().map(ToString::to_string).collect();

        let series = [
            (Criticality::Critical, priority_color(Priority::High)),
            (Criticality::NonCritical, priority_color(Priority::Low)),
        ]
        .into_iter()
        .map(|(label, color)| {
            let mut series = BarSeries::new(label.label(), color);
            for row in rows.iter().filter(|row| row.label == label) {
                series.push(row.bucket.to_string(), row.percent as f32);
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
