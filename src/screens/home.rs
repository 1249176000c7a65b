use std::path::Path;

use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Background, Element, Length, Padding};
use lucide_icons::iced::icon_refresh_cw;

use crate::app::LoadState;
use crate::message::Message;
use crate::theme::{accent_button_style, DRAWER_BG, DRAWER_TEXT_INACTIVE};
use crate::tickets::Ticket;

const PREVIEW_ROWS: usize = 12;

pub fn view<'a>(load: &'a LoadState, source: &'a Path) -> Element<'a, Message> {
    let (status_text, counts) = match load {
        LoadState::Loading => (format!("Reading {}...", source.display()), None),
        LoadState::Loaded(import) => (
            format!("Loaded {}", import.source.display()),
            Some(format!(
                "Tickets: {} | Dropped rows: {}",
                import.tickets.len(),
                import.dropped
            )),
        ),
        LoadState::Failed(message) => (format!("Load failed: {message}"), None),
    };

    let reload_button = button(row![icon_refresh_cw().size(16), text("Reload CSV")].spacing(8))
        .style(accent_button_style)
        .on_press_maybe((!matches!(load, LoadState::Loading)).then_some(Message::ReloadTickets));

    let mut info = column![
        text("Integrations Engineering Dashboard").size(22),
        text("Ticket flow, cycle time and workload across integrations.")
            .size(14)
            .style(|_| text::Style {
                color: Some(DRAWER_TEXT_INACTIVE),
            }),
        Space::new().height(Length::Fixed(8.0)),
        reload_button,
        Space::new().height(Length::Fixed(8.0)),
        text(status_text).size(14),
    ]
    .spacing(12);

    if let Some(counts) = counts {
        info = info.push(text(counts).size(14));
    }

    if let LoadState::Loaded(import) = load {
        info = info.push(preview_table(&import.tickets));
    }

    let info_panel = container(info)
        .padding(24)
        .width(Length::Fill)
        .max_width(1100)
        .style(|_| container::background(Background::Color(DRAWER_BG)));

    container(info_panel)
        .padding(24)
        .center_x(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn preview_table<'a>(tickets: &'a [Ticket]) -> Element<'a, Message> {
    let header = container(
        row![
            text("Name").size(14).width(Length::FillPortion(3)),
            text("Created").size(14).width(Length::FillPortion(2)),
            text("Priority").size(14).width(Length::FillPortion(1)),
            text("Integration").size(14).width(Length::FillPortion(2)),
            text("Developer").size(14).width(Length::FillPortion(2)),
            text("Status").size(14).width(Length::FillPortion(1)),
        ]
        .spacing(16),
    )
    .padding(Padding::new(0.0).right(16.0));

    let rows = tickets.iter().take(PREVIEW_ROWS).map(|ticket| {
        container(
            row![
                text(ticket.name.as_str()).size(13).width(Length::FillPortion(3)),
                text(ticket.date_created.format("%Y-%m-%d").to_string())
                    .size(13)
                    .width(Length::FillPortion(2)),
                text(ticket.priority.label()).size(13).width(Length::FillPortion(1)),
                text(ticket.integration.as_str()).size(13).width(Length::FillPortion(2)),
                text(ticket.assigned_dev.as_deref().unwrap_or("unassigned"))
                    .size(13)
                    .width(Length::FillPortion(2)),
                text(ticket.status.label()).size(13).width(Length::FillPortion(1)),
            ]
            .spacing(16),
        )
        .padding(Padding::new(0.0).right(16.0))
        .into()
    });

    let table = column![header, Space::new().height(Length::Fixed(8.0))]
        .push(column(rows).spacing(6))
        .spacing(8);

    column![
        text(format!(
            "First {} of {} tickets",
            PREVIEW_ROWS.min(tickets.len()),
            tickets.len()
        ))
        .size(16),
        scrollable(table).height(Length::Fixed(320.0)),
    ]
    .spacing(12)
    .into()
}
