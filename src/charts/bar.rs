use iced::alignment::{Horizontal, Vertical};
use iced::mouse;
use iced::widget::canvas::{self, Cache, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use super::axis::{draw_legend, draw_value_grid};
use super::model::{
    nice_ceiling, BarLayout, BarSeries, ChartConfig, InteractionConfig, InteractionState,
    LegendEntry, Orientation, PlotArea,
};
use crate::message::Message;

/// Multi-series bar chart over a fixed, ordered category axis.
pub struct BarChart {
    cache: Cache,
    categories: Vec<String>,
    series: Vec<BarSeries>,
    layout: BarLayout,
    orientation: Orientation,
    config: ChartConfig,
    interaction: InteractionConfig,
}

impl BarChart {
    pub fn new(categories: Vec<String>, series: Vec<BarSeries>) -> Self {
        Self {
            cache: Cache::new(),
            categories,
            series,
            layout: BarLayout::Grouped,
            orientation: Orientation::Vertical,
            config: ChartConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }

    pub fn with_layout(mut self, layout: BarLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.series.is_empty()
    }

    fn value(&self, series: usize, category: usize) -> f32 {
        self.series[series].value_for(&self.categories[category])
    }

    fn axis_max(&self) -> f32 {
        let max = (0..self.categories.len())
            .map(|category| match self.layout {
                BarLayout::Grouped => (0..self.series.len())
                    .map(|series| self.value(series, category))
                    .fold(0.0_f32, f32::max),
                BarLayout::Stacked => (0..self.series.len())
                    .map(|series| self.value(series, category))
                    .sum(),
            })
            .fold(0.0_f32, f32::max);

        nice_ceiling(max, self.config.grid_lines)
    }

    fn horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    /// Length of one category slot along the category axis.
    fn slot(&self, area: &PlotArea, state: &InteractionState) -> f32 {
        let axis = if self.horizontal() {
            area.height()
        } else {
            area.width()
        };
        axis / self.categories.len() as f32 * state.zoom()
    }

    /// Category slot under `cursor`, if any.
    fn category_at(&self, area: &PlotArea, state: &InteractionState, cursor: Point) -> Option<usize> {
        let slot = self.slot(area, state);
        let offset = if self.horizontal() {
            area.bottom + state.pan.y - cursor.y
        } else {
            cursor.x - area.left - state.pan.x
        };
        let index = (offset / slot).floor();

        if index >= 0.0 && (index as usize) < self.categories.len() {
            Some(index as usize)
        } else {
            None
        }
    }

    /// Category labels sit in the gutter, so only the slot center is checked
    /// against the plot span.
    fn label_visible(&self, area: &PlotArea, state: &InteractionState, center: f32) -> bool {
        if self.horizontal() {
            let y = area.bottom - center + state.pan.y;
            y >= area.top && y <= area.bottom
        } else {
            let x = area.left + center + state.pan.x;
            x >= area.left && x <= area.right
        }
    }

    fn legend(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .map(|series| LegendEntry {
                label: series.name.clone(),
                color: series.color,
            })
            .collect()
    }

    fn draw_bars(
        &self,
        frame: &mut Frame,
        area: &PlotArea,
        state: &InteractionState,
        max_value: f32,
        text_color: Color,
    ) {
        let slot = self.slot(area, state);
        let value_span = if self.horizontal() {
            area.width()
        } else {
            area.height()
        };
        let bar_span = slot * 0.8;
        let group_width = match self.layout {
            BarLayout::Grouped => bar_span / self.series.len() as f32,
            BarLayout::Stacked => bar_span,
        };
        let min_label_gap = if self.horizontal() { 14.0 } else { 56.0 };
        let label_every = ((min_label_gap / slot).ceil() as usize).max(1);

        for category in 0..self.categories.len() {
            let slot_start = category as f32 * slot + slot * 0.1;
            let mut stacked = 0.0_f32;

            for series in 0..self.series.len() {
                let value = self.value(series, category);
                if value <= 0.0 {
                    continue;
                }

                let length = value / max_value * value_span;
                let (offset, base) = match self.layout {
                    BarLayout::Grouped => (slot_start + series as f32 * group_width, 0.0),
                    BarLayout::Stacked => (slot_start, stacked),
                };
                stacked += length;

                let rect = if self.horizontal() {
                    let y = area.bottom - offset - group_width + state.pan.y;
                    Rectangle::new(Point::new(area.left + base, y), Size::new(length, group_width))
                } else {
                    let x = area.left + offset + state.pan.x;
                    Rectangle::new(
                        Point::new(x, area.bottom - base - length),
                        Size::new(group_width, length),
                    )
                };
                if let Some(visible) = area.clip(rect) {
                    frame.fill(
                        &Path::rectangle(visible.position(), visible.size()),
                        self.series[series].color,
                    );
                }
            }

            let center = category as f32 * slot + slot / 2.0;
            if category % label_every != 0 || !self.label_visible(area, state, center) {
                continue;
            }

            let label = if self.horizontal() {
                Text {
                    content: self.categories[category].clone(),
                    position: Point::new(area.left - 6.0, area.bottom - center + state.pan.y),
                    color: text_color,
                    size: 11.0.into(),
                    align_x: Horizontal::Right.into(),
                    align_y: Vertical::Center.into(),
                    ..Text::default()
                }
            } else {
                Text {
                    content: self.categories[category].clone(),
                    position: Point::new(area.left + center + state.pan.x, area.bottom + 6.0),
                    color: text_color,
                    size: 11.0.into(),
                    align_x: Horizontal::Center.into(),
                    ..Text::default()
                }
            };
            frame.fill_text(label);
        }
    }
}

impl canvas::Program<Message> for BarChart {
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
        let Some(area) = PlotArea::within(bounds.size(), &self.config, self.horizontal()) else {
            return geometries;
        };
        let max_value = self.axis_max();

        let background = self.cache.draw(renderer, bounds.size(), |frame| {
            draw_value_grid(
                frame,
                &area,
                max_value,
                self.config.grid_lines,
                self.horizontal(),
                palette.background.weak.color,
                palette.background.base.text,
            );
            draw_legend(frame, &self.legend(), self.config.padding, palette.background.base.text);
        });
        geometries.push(background);

        let mut bars = Frame::new(renderer, bounds.size());
        self.draw_bars(&mut bars, &area, state, max_value, palette.background.base.text);
        geometries.push(bars.into_geometry());

        if !self.interaction.enable_hover {
            return geometries;
        }

        if let Some(cursor_pos) = cursor.position_in(bounds) {
            if area.contains(cursor_pos) {
                if let Some(category) = self.category_at(&area, state, cursor_pos) {
                    let mut overlay = Frame::new(renderer, bounds.size());
                    let details: Vec<String> = (0..self.series.len())
                        .map(|series| {
                            format!(
                                "{}: {:.2}",
                                self.series[series].name,
                                self.value(series, category)
                            )
                        })
                        .collect();
                    let label = format!("{}\n{}", self.categories[category], details.join("\n"));

                    overlay.fill_text(Text {
                        content: label,
                        position: Point::new(cursor_pos.x + 8.0, cursor_pos.y - 8.0),
                        color: palette.background.base.text,
                        size: 12.0.into(),
                        ..Text::default()
                    });

                    let guide = if self.horizontal() {
                        Path::line(
                            Point::new(area.left, cursor_pos.y),
                            Point::new(area.right, cursor_pos.y),
                        )
                    } else {
                        Path::line(
                            Point::new(cursor_pos.x, area.top),
                            Point::new(cursor_pos.x, area.bottom),
                        )
                    };
                    overlay.stroke(
                        &guide,
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
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}
