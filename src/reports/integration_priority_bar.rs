use crate::charts::{BarChart, BarLayout, BarSeries, ChartConfig, Orientation};
use crate::data::integration_priority::IntegrationPriorityCount;
use crate::reports::ordered_unique;
use crate::theme::priority_color;
use crate::tickets::Priority;

pub struct IntegrationPriorityReport;

impl IntegrationPriorityReport {
    pub fn title() -> &'static str {
        "Total Tickets by Integration & Priority"
    }

    pub fn subtitle() -> &'static str {
        "Stacked by priority, busiest integrations on top"
    }

    pub fn chart(rows: &[IntegrationPriorityCount]) -> BarChart {
        // Rows arrive ascending by total; the first category is drawn at the
        // bottom of a horizontal chart.
        let integrations = ordered_unique(rows.iter().map(|row| row.integration.clone()));

        let series = Priority::ALL
            .iter()
            .filter(|priority| rows.iter().any(|row| row.priority == **priority))
            .map(|priority| {
                let mut series = BarSeries::new(
                    format!("{} ({})", priority.num(), priority.text()),
                    priority_color(*priority),
                );
                for row in rows.iter().filter(|row| row.priority == *priority) {
                    series.push(row.integration.clone(), row.count as f32);
                }
                series
            })
            .collect();

        BarChart::new(integrations, series)
            .with_layout(BarLayout::Stacked)
            .with_orientation(Orientation::Horizontal)
            .with_config(ChartConfig {
                padding: 30.0,
                grid_lines: 5,
                label_gutter: 150.0,
            })
    }

    pub fn height(rows: &[IntegrationPriorityCount]) -> f32 {
        let integrations = ordered_unique(rows.iter().map(|row| row.integration.clone())).len();
        (integrations as f32 * 20.0 + 120.0).clamp(240.0, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(integration: &str, priority: Priority, count: usize, total: usize) -> IntegrationPriorityCount {
        IntegrationPriorityCount {
            integration: integration.to_owned(),
            priority,
            count,
            total,
        }
    }

    #[test]
    fn height_counts_integrations_once() {
        let rows = [
            count("zendesk", Priority::Urgent, 1, 3),
            count("zendesk", Priority::Low, 2, 3),
        ];
        assert_eq!(IntegrationPriorityReport::height(&rows), 240.0);
        assert!(!IntegrationPriorityReport::chart(&rows).is_empty());
    }

    #[test]
    fn empty_rows_build_an_empty_chart() {
        assert!(IntegrationPriorityReport::chart(&[]).is_empty());
    }
}
