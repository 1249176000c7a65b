use std::collections::BTreeSet;

use crate::charts::{ChartConfig, GanttBar, GanttChart, LegendEntry};
use crate::data::gantt::GanttInterval;
use crate::theme::priority_color;
use crate::tickets::Priority;

pub struct GanttTimelineReport;

impl GanttTimelineReport {
    pub fn title() -> &'static str {
        "Gantt Chart - Tickets for each Integration"
    }

    pub fn subtitle() -> &'static str {
        "Closed tickets from creation to close, colored by priority"
    }

    pub fn chart(intervals: &[GanttInterval]) -> GanttChart {
        let rows: Vec<String> = intervals
            .iter()
            .map(|interval| interval.integration.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let bars = intervals
            .iter()
            .filter_map(|interval| {
                let row = rows.iter().position(|name| *name == interval.integration)?;
                Some(GanttBar {
                    row,
                    start: interval.start.timestamp() as f64,
                    end: interval.end.timestamp() as f64,
                    color: priority_color(interval.priority),
                    label: format!(
                        "{} ({})\n{} to {}",
                        interval.integration,
                        interval.priority_text(),
                        interval.start.format("%Y-%m-%d %H:%M"),
                        interval.end.format("%Y-%m-%d %H:%M"),
                    ),
                })
            })
            .collect();

        let legend = Priority::ALL
            .iter()
            .map(|priority| LegendEntry {
                label: priority.text().to_owned(),
                color: priority_color(*priority),
            })
            .collect();

        GanttChart::new(rows, bars)
            .with_legend(legend)
            .with_config(ChartConfig {
                padding: 30.0,
                grid_lines: 6,
                label_gutter: 150.0,
            })
    }

    /// Canvas height that keeps every integration row readable.
    pub fn height(intervals: &[GanttInterval]) -> f32 {
        let rows = intervals
            .iter()
            .map(|interval| interval.integration.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        (rows as f32 * 22.0 + 120.0).clamp(240.0, 1200.0)
    }
}
