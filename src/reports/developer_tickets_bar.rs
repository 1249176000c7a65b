use std::collections::BTreeSet;

use crate::charts::{BarChart, BarSeries, ChartConfig};
use crate::data::developer_tickets::DeveloperCount;
use crate::reports::ordered_unique;
use crate::theme::series_color;

pub struct DeveloperTicketsReport;

impl DeveloperTicketsReport {
    pub fn title() -> &'static str {
        "Breakdown Tickets closed by Developers"
    }

    pub fn subtitle() -> &'static str {
        "Tickets per developer, grouped by creation quarter"
    }

    pub fn chart(rows: &[DeveloperCount]) -> BarChart {
        let developers = ordered_unique(rows.iter().map(|row| row.developer.clone()));
        let quarters: BTreeSet<_> = rows.iter().map(|row| row.quarter).collect();

        let series = quarters
            .into_iter()
            .enumerate()
            .map(|(index, quarter)| {
                let mut series = BarSeries::new(quarter.to_string(), series_color(index));
                for row in rows.iter().filter(|row| row.quarter == quarter) {
                    series.push(row.developer.clone(), row.count as f32);
                }
                series
            })
            .collect();

        BarChart::new(developers, series).with_config(ChartConfig {
            padding: 40.0,
            grid_lines: 4,
            label_gutter: 0.0,
        })
    }
}
