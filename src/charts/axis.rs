use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{Frame, Path, Stroke, Text};
use iced::{Color, Point, Size};

use super::model::{LegendEntry, PlotArea};

/// Axis lines plus evenly spaced grid lines labelled with their value.
/// Values run along x when `horizontal`, along y otherwise.
pub fn draw_value_grid(
    frame: &mut Frame,
    area: &PlotArea,
    max_value: f32,
    grid_lines: usize,
    horizontal: bool,
    line_color: Color,
    text_color: Color,
) {
    draw_axes(frame, area, line_color);

    let steps = grid_lines.max(1);
    for step in 1..=steps {
        let fraction = step as f32 / steps as f32;
        let value = max_value * fraction;

        let (line, label) = if horizontal {
            let x = area.left + area.width() * fraction;
            (
                Path::line(Point::new(x, area.top), Point::new(x, area.bottom)),
                Text {
                    content: format_value(value),
                    position: Point::new(x, area.bottom + 6.0),
                    color: text_color,
                    size: 10.0.into(),
                    align_x: Horizontal::Center.into(),
                    ..Text::default()
                },
            )
        } else {
            let y = area.bottom - area.height() * fraction;
            (
                Path::line(Point::new(area.left, y), Point::new(area.right, y)),
                Text {
                    content: format_value(value),
                    position: Point::new(area.left - 6.0, y),
                    color: text_color,
                    size: 10.0.into(),
                    align_x: Horizontal::Right.into(),
                    align_y: Vertical::Center.into(),
                    ..Text::default()
                },
            )
        };

        frame.stroke(
            &line,
            Stroke::default()
                .with_width(0.5)
                .with_color(Color { a: 0.4, ..line_color }),
        );
        frame.fill_text(label);
    }
}

pub fn draw_axes(frame: &mut Frame, area: &PlotArea, color: Color) {
    let x_axis = Path::line(
        Point::new(area.left, area.bottom),
        Point::new(area.right, area.bottom),
    );
    let y_axis = Path::line(
        Point::new(area.left, area.bottom),
        Point::new(area.left, area.top),
    );

    for axis in [x_axis, y_axis] {
        frame.stroke(&axis, Stroke::default().with_width(1.0).with_color(color));
    }
}

/// Single legend row along the top edge.
pub fn draw_legend(frame: &mut Frame, entries: &[LegendEntry], padding: f32, text_color: Color) {
    let mut x = padding;
    let y = padding / 2.0;

    for entry in entries {
        frame.fill(
            &Path::rectangle(Point::new(x, y - 5.0), Size::new(10.0, 10.0)),
            entry.color,
        );
        frame.fill_text(Text {
            content: entry.label.clone(),
            position: Point::new(x + 14.0, y),
            color: text_color,
            size: 11.0.into(),
            align_y: Vertical::Center.into(),
            ..Text::default()
        });
        x += 14.0 + entry.label.chars().count() as f32 * 6.5 + 16.0;
    }
}

pub fn format_value(value: f32) -> String {
    if value.abs() >= 10.0 || value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
