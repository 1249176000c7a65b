use std::collections::BTreeSet;

use crate::charts::{BarChart, BarSeries, ChartConfig};
use crate::data::created_vs_closed::{FlowCount, TicketFlow};
use crate::theme::series_color;

pub struct CreatedClosedReport;

impl CreatedClosedReport {
    pub fn title() -> &'static str {
        "Total Tickets - create vs close"
    }

    pub fn subtitle() -> &'static str {
        "Tickets opened and closed per period"
    }

    pub fn chart(rows: &[FlowCount]) -> BarChart {
        let buckets: BTreeSet<_> = rows.iter().map(|row| row.bucket).collect();
        let categories = buckets.iter().map(ToString::to_string).collect();

        let series = [TicketFlow::Opened, TicketFlow::Closed]
            .into_iter()
            .enumerate()
            .map(|(index, flow)| {
                let mut series = BarSeries::new(flow.label(), series_color(index));
                for row in rows.iter().filter(|row| row.status == flow) {
                    series.push(row.bucket.to_string(), row.count as f32);
                }
                series
            })
            .collect();

        BarChart::new(categories, series).with_config(ChartConfig {
            padding: 40.0,
            grid_lines: 4,
            label_gutter: 0.0,
        })
    }
}
