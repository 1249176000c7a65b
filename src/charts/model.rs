use iced::mouse;
use iced::widget::canvas;
use iced::{Color, Point, Rectangle, Size, Vector};

use crate::message::Message;

#[derive(Debug, Clone, Copy)]
pub struct ChartConfig {
    pub padding: f32,
    pub grid_lines: usize,
    /// Extra room on the category axis side for long labels.
    pub label_gutter: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            grid_lines: 5,
            label_gutter: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BarPoint {
    pub label: String,
    pub value: f32,
}

#[derive(Debug, Clone)]
pub struct BarSeries {
    pub name: String,
    pub color: Color,
    pub values: Vec<BarPoint>,
}

impl BarSeries {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f32) {
        self.values.push(BarPoint {
            label: label.into(),
            value,
        });
    }

    pub fn value_for(&self, label: &str) -> f32 {
        self.values
            .iter()
            .filter(|point| point.label == label)
            .map(|point| point.value)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarLayout {
    Grouped,
    Stacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone)]
pub struct GanttBar {
    pub row: usize,
    pub start: f64,
    pub end: f64,
    pub color: Color,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotArea {
    /// Space left for data after padding, the legend strip and the label
    /// gutter. `None` when the canvas is too small to draw into.
    pub fn within(size: Size, config: &ChartConfig, horizontal_gutter: bool) -> Option<Self> {
        let padding = config.padding;
        let left = padding + if horizontal_gutter { config.label_gutter } else { 0.0 };
        let top = padding + LEGEND_HEIGHT;
        let right = size.width - padding;
        let bottom = size.height - padding - if horizontal_gutter { 0.0 } else { config.label_gutter };

        if right <= left || bottom <= top {
            None
        } else {
            Some(Self {
                left,
                top,
                right,
                bottom,
            })
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Part of `rect` inside the plot area. Zoom and pan can push shapes
    /// past the axes; `None` when nothing is left.
    pub fn clip(&self, rect: Rectangle) -> Option<Rectangle> {
        let left = rect.x.max(self.left);
        let top = rect.y.max(self.top);
        let right = (rect.x + rect.width).min(self.right);
        let bottom = (rect.y + rect.height).min(self.bottom);

        if right <= left || bottom <= top {
            None
        } else {
            Some(Rectangle::new(
                Point::new(left, top),
                Size::new(right - left, bottom - top),
            ))
        }
    }
}

pub const LEGEND_HEIGHT: f32 = 18.0;

#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    pub enable_hover: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            enable_hover: true,
            enable_zoom: true,
            enable_pan: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InteractionState {
    pub zoom: f32,
    pub pan: Vector,
    pub pan_start: Option<Point>,
    pub pan_origin: Vector,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vector::new(0.0, 0.0),
            pan_start: None,
            pan_origin: Vector::new(0.0, 0.0),
        }
    }
}

impl InteractionState {
    pub fn zoom(&self) -> f32 {
        if self.zoom <= 0.0 {
            1.0
        } else {
            self.zoom
        }
    }

    /// Wheel zooms, right-drag pans, cursor movement repaints the hover
    /// overlay.
    pub fn handle(
        &mut self,
        interaction: &InteractionConfig,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let Some(pan_start) = self.pan_start {
                    let delta = Vector::new(position.x - pan_start.x, position.y - pan_start.y);
                    self.pan = self.pan_origin + delta;
                    return Some(canvas::Action::request_redraw());
                }
                interaction
                    .enable_hover
                    .then(canvas::Action::request_redraw)
            }
            canvas::Event::Mouse(mouse::Event::CursorEntered)
            | canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                Some(canvas::Action::request_redraw())
            }
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if !interaction.enable_zoom || cursor.position_in(bounds).is_none() {
                    return None;
                }
                let scroll = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => *y,
                    mouse::ScrollDelta::Pixels { y, .. } => *y / 60.0,
                };
                let factor = if scroll > 0.0 { 1.1 } else { 0.9 };
                self.zoom = (self.zoom() * factor).clamp(0.5, 5.0);
                Some(canvas::Action::request_redraw())
            }
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right)) => {
                if !interaction.enable_pan {
                    return None;
                }
                self.pan_start = cursor.position_in(bounds);
                self.pan_origin = self.pan;
                Some(canvas::Action::request_redraw())
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Right)) => {
                if !interaction.enable_pan {
                    return None;
                }
                self.pan_start = None;
                Some(canvas::Action::request_redraw())
            }
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Middle)) => {
                *self = Self::default();
                Some(canvas::Action::request_redraw())
            }
            _ => None,
        }
    }
}

/// Rounds `max` up to a value that divides evenly into `steps` grid lines.
pub fn nice_ceiling(max: f32, steps: usize) -> f32 {
    if max <= 0.0 || !max.is_finite() {
        return 1.0;
    }

    let steps = steps.max(1) as f32;
    let raw_step = max / steps;
    let magnitude = 10_f32.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|factor| factor * magnitude)
        .find(|candidate| *candidate >= raw_step)
        .unwrap_or(raw_step);

    step * steps
}
