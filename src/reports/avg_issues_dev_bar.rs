use crate::charts::{BarChart, BarSeries, ChartConfig};
use crate::data::avg_issues_dev::BucketAverage;
use crate::theme::series_color;

pub struct AvgIssuesDevReport;

impl AvgIssuesDevReport {
    pub fn title() -> &'static str {
        "Avg issues per Dev"
    }

    pub fn subtitle() -> &'static str {
        "Tickets per distinct assigned developer"
    }

    pub fn chart(rows: &[BucketAverage]) -> BarChart {
        let categories = rows.iter().map(|row| row.bucket.to_string()).collect();

        let mut series = BarSeries::new("avg issues / dev", series_color(0));
        for row in rows {
            series.push(row.bucket.to_string(), row.average as f32);
        }

        BarChart::new(categories, vec![series]).with_config(ChartConfig {
            padding: 40.0,
            grid_lines: 4,
            label_gutter: 0.0,
        })
    }
}
