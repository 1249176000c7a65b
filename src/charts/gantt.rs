use chrono::DateTime;
use iced::alignment::{Horizontal, Vertical};
use iced::mouse;
use iced::widget::canvas::{self, Cache, Frame, Geometry, Path, Stroke, Text};
use iced::{Point, Rectangle, Renderer, Size, Theme};

use super::axis::{draw_axes, draw_legend};
use super::model::{
    ChartConfig, GanttBar, InteractionConfig, InteractionState, LegendEntry, PlotArea,
};
use crate::message::Message;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Horizontal timeline: one row per label, one bar per interval.
pub struct GanttChart {
    cache: Cache,
    rows: Vec<String>,
    bars: Vec<GanttBar>,
    legend: Vec<LegendEntry>,
    config: ChartConfig,
    interaction: InteractionConfig,
}

impl GanttChart {
    pub fn new(rows: Vec<String>, bars: Vec<GanttBar>) -> Self {
        Self {
            cache: Cache::new(),
            rows,
            bars,
            legend: Vec::new(),
            config: ChartConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }

    pub fn with_legend(mut self, legend: Vec<LegendEntry>) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.bars.is_empty()
    }

    fn time_range(&self) -> (f64, f64) {
        let start = self
            .bars
            .iter()
            .map(|bar| bar.start)
            .fold(f64::INFINITY, f64::min);
        let end = self
            .bars
            .iter()
            .map(|bar| bar.end)
            .fold(f64::NEG_INFINITY, f64::max);

        if !start.is_finite() || !end.is_finite() {
            (0.0, SECONDS_PER_DAY)
        } else if end - start < SECONDS_PER_DAY {
            (start, start + SECONDS_PER_DAY)
        } else {
            (start, end)
        }
    }

    fn row_height(&self, area: &PlotArea) -> f32 {
        area.height() / self.rows.len() as f32
    }

    fn bar_rect(&self, bar: &GanttBar, area: &PlotArea, state: &InteractionState) -> Rectangle {
        let (min, max) = self.time_range();
        let span = (max - min) as f32;
        let scale = area.width() * state.zoom() / span;
        let row_height = self.row_height(area);

        let x = area.left + (bar.start - min) as f32 * scale + state.pan.x;
        let width = ((bar.end - bar.start) as f32 * scale).max(2.0);
        let y = area.top + bar.row as f32 * row_height + row_height * 0.15;

        Rectangle::new(Point::new(x, y), Size::new(width, row_height * 0.7))
    }

    fn bar_at(&self, area: &PlotArea, state: &InteractionState, cursor: Point) -> Option<&GanttBar> {
        self.bars
            .iter()
            .rev()
            .find(|bar| self.bar_rect(bar, area, state).contains(cursor))
    }
}

impl canvas::Program<Message> for GanttChart {
    type State = InteractionState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        state.handle(&self.interaction, event, bounds, cursor)
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut geometries = Vec::new();
        if self.is_empty() {
            return geometries;
        }

        let palette = theme.extended_palette();
        let Some(area) = PlotArea::within(bounds.size(), &self.config, true) else {
            return geometries;
        };
        let row_height = self.row_height(&area);

        let background = self.cache.draw(renderer, bounds.size(), |frame| {
            draw_axes(frame, &area, palette.background.weak.color);
            draw_legend(frame, &self.legend, self.config.padding, palette.background.base.text);

            for (index, row) in self.rows.iter().enumerate() {
                frame.fill_text(Text {
                    content: row.clone(),
                    position: Point::new(
                        area.left - 6.0,
                        area.top + index as f32 * row_height + row_height / 2.0,
                    ),
                    color: palette.background.base.text,
                    size: 11.0.into(),
                    align_x: Horizontal::Right.into(),
                    align_y: Vertical::Center.into(),
                    ..Text::default()
                });
            }
        });
        geometries.push(background);

        let mut timeline = Frame::new(renderer, bounds.size());
        let (min, max) = self.time_range();
        let ticks = self.config.grid_lines.max(1);
        for tick in 0..=ticks {
            let fraction = tick as f64 / ticks as f64;
            let seconds = min + (max - min) * fraction / state.zoom() as f64
                - (state.pan.x / area.width()) as f64 * (max - min) / state.zoom() as f64;
            let x = area.left + area.width() * fraction as f32;
            let label = DateTime::from_timestamp(seconds as i64, 0)
                .map(|ts| ts.format("%Y-%m-%d").to_string())
                .unwrap_or_default();

            timeline.stroke(
                &Path::line(Point::new(x, area.top), Point::new(x, area.bottom)),
                Stroke::default()
                    .with_width(0.5)
                    .with_color(palette.background.weak.color),
            );
            timeline.fill_text(Text {
                content: label,
                position: Point::new(x, area.bottom + 6.0),
                color: palette.background.base.text,
                size: 10.0.into(),
                align_x: Horizontal::Center.into(),
                ..Text::default()
            });
        }

        for bar in &self.bars {
            if let Some(visible) = area.clip(self.bar_rect(bar, &area, state)) {
                timeline.fill(&Path::rectangle(visible.position(), visible.size()), bar.color);
            }
        }
        geometries.push(timeline.into_geometry());

        if let Some(cursor_pos) = cursor.position_in(bounds) {
            if self.interaction.enable_hover && area.contains(cursor_pos) {
                if let Some(bar) = self.bar_at(&area, state, cursor_pos) {
                    let mut overlay = Frame::new(renderer, bounds.size());
                    overlay.fill_text(Text {
                        content: bar.label.clone(),
                        position: Point::new(cursor_pos.x + 8.0, cursor_pos.y - 8.0),
                        color: palette.background.base.text,
                        size: 12.0.into(),
                        ..Text::default()
                    });
                    overlay.stroke(
                        &Path::rectangle(
                            self.bar_rect(bar, &area, state).position(),
                            self.bar_rect(bar, &area, state).size(),
                        ),
                        Stroke::default()
                            .with_width(1.0)
                            .with_color(palette.primary.strong.color),
                    );
                    geometries.push(overlay.into_geometry());
                }
            }
        }

        geometries
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.position_in(bounds).is_some() {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use iced::Color;

    fn bar(row: usize, start_day: f64, end_day: f64) -> GanttBar {
        GanttBar {
            row,
            start: start_day * SECONDS_PER_DAY,
            end: end_day * SECONDS_PER_DAY,
            color: Color::BLACK,
            label: format!("row {row}"),
        }
    }

    fn area() -> PlotArea {
        PlotArea {
            left: 0.0,
            top: 0.0,
            right: 100.0,
            bottom: 100.0,
        }
    }

    #[test]
    fn bars_scale_across_the_time_range() {
        let chart = GanttChart::new(
            vec!["a".to_owned(), "b".to_owned()],
            vec![bar(0, 0.0, 5.0), bar(1, 5.0, 10.0)],
        );
        let state = InteractionState::default();

        let first = chart.bar_rect(&chart.bars[0], &area(), &state);
        let second = chart.bar_rect(&chart.bars[1], &area(), &state);

        assert_relative_eq!(first.x, 0.0);
        assert_relative_eq!(first.width, 50.0, epsilon = 1e-3);
        assert_relative_eq!(second.x, 50.0, epsilon = 1e-3);
        assert!(second.y > first.y);
    }

    #[test]
    fn hover_finds_bar_under_cursor() {
        let chart = GanttChart::new(
            vec!["a".to_owned(), "b".to_owned()],
            vec![bar(0, 0.0, 5.0), bar(1, 5.0, 10.0)],
        );
        let state = InteractionState::default();

        let hit = chart.bar_at(&area(), &state, Point::new(75.0, 75.0));
        assert_eq!(hit.map(|bar| bar.row), Some(1));
        assert!(chart.bar_at(&area(), &state, Point::new(75.0, 25.0)).is_none());
    }

    #[test]
    fn same_day_intervals_get_a_one_day_window() {
        let chart = GanttChart::new(vec!["a".to_owned()], vec![bar(0, 2.0, 2.0)]);
        let (min, max) = chart.time_range();
        assert_eq!(max - min, SECONDS_PER_DAY);
    }
}
