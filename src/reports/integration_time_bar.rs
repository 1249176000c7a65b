use crate::charts::{BarChart, BarSeries, ChartConfig};
use crate::data::integration_time::IntegrationBucketCount;
use crate::reports::ordered_unique;
use crate::theme::series_color;

pub struct IntegrationTimeReport;

impl IntegrationTimeReport {
    pub fn title() -> &'static str {
        "Total Tickets per Integration segmented by Time"
    }

    pub fn subtitle() -> &'static str {
        "Tickets per integration, one bar per creation period"
    }

    pub fn chart(rows: &[IntegrationBucketCount]) -> BarChart {
        let integrations = ordered_unique(rows.iter().map(|row| row.integration.clone()));
        let mut buckets: Vec<String> = ordered_unique(rows.iter().map(|row| row.bucket.clone()));
        // Bucket labels are zero-padded, so lexical order is chronological.
        buckets.sort();

        let series = buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| {
                let mut series = BarSeries::new(bucket.clone(), series_color(index));
                for row in rows.iter().filter(|row| &row.bucket == bucket) {
                    series.push(row.integration.clone(), row.count as f32);
                }
                series
            })
            .collect();

        BarChart::new(integrations, series).with_config(ChartConfig {
            padding: 40.0,
            grid_lines: 4,
            label_gutter: 0.0,
        })
    }
}
