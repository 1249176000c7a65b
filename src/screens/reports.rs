use iced::widget::canvas::Canvas;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Element, Fill, Length};

use crate::app::{DateInputs, LoadState};
use crate::dashboard::{DashboardParams, DashboardResults};
use crate::error::{DashboardError, DashboardResult};
use crate::integrations::INTEGRATION_CATALOG;
use crate::message::Message;
use crate::reports::avg_issues_dev_bar::AvgIssuesDevReport;
use crate::reports::created_closed_bar::CreatedClosedReport;
use crate::reports::critical_ratio_bar::CriticalRatioReport;
use crate::reports::cycle_waiting_bar::CycleWaitingReport;
use crate::reports::developer_tickets_bar::DeveloperTicketsReport;
use crate::reports::gantt_timeline::GanttTimelineReport;
use crate::reports::integration_priority_bar::IntegrationPriorityReport;
use crate::reports::integration_time_bar::IntegrationTimeReport;
use crate::theme::{toggle_button_style, DRAWER_BG, DRAWER_TEXT_INACTIVE};
use crate::tickets::{Priority, Timeframe};

pub const EMPTY_MESSAGE: &str = "No tickets match the current filters.";

const CHART_HEIGHT: f32 = 280.0;

pub fn view<'a>(
    load: &'a LoadState,
    params: &'a DashboardParams,
    dates: &'a DateInputs,
    show_time_integrations: bool,
    results: Option<&'a DashboardResults>,
) -> Element<'a, Message> {
    let filters = filter_panel(params, dates, show_time_integrations);

    let mut content = column![text("Reports").size(28)].spacing(24);

    match (load, results) {
        (LoadState::Loading, _) => {
            content = content.push(text("Loading ticket data...").size(14));
        }
        (LoadState::Failed(message), _) => {
            content = content.push(text(format!("Load failed: {message}")).size(14));
        }
        (LoadState::Loaded(_), None) => {
            content = content.push(text("No data available yet.").size(14));
        }
        (LoadState::Loaded(_), Some(results)) => {
            content = push_charts(content, results);
        }
    }

    row![
        container(scrollable(filters).height(Length::Fill))
            .width(Length::Fixed(300.0))
            .height(Length::Fill)
            .style(|_| container::background(DRAWER_BG)),
        scrollable(container(content).padding(24)).width(Fill).height(Fill),
    ]
    .height(Length::Fill)
    .into()
}

fn push_charts<'a>(
    content: iced::widget::Column<'a, Message>,
    results: &'a DashboardResults,
) -> iced::widget::Column<'a, Message> {
    content
        .push(chart_section(
            GanttTimelineReport::title(),
            GanttTimelineReport::subtitle(),
            &results.gantt,
            |rows| {
                Canvas::new(GanttTimelineReport::chart(rows))
                    .width(Fill)
                    .height(GanttTimelineReport::height(rows))
                    .into()
            },
        ))
        .push(chart_section(
            DeveloperTicketsReport::title(),
            DeveloperTicketsReport::subtitle(),
            &results.developers,
            |rows| {
                Canvas::new(DeveloperTicketsReport::chart(rows))
                    .width(Fill)
                    .height(CHART_HEIGHT)
                    .into()
            },
        ))
        .push(chart_section(
            IntegrationTimeReport::title(),
            IntegrationTimeReport::subtitle(),
            &results.integration_time,
            |rows| {
                Canvas::new(IntegrationTimeReport::chart(rows))
                    .width(Fill)
                    .height(CHART_HEIGHT)
                    .into()
            },
        ))
        .push(chart_section(
            IntegrationPriorityReport::title(),
            IntegrationPriorityReport::subtitle(),
            &results.integration_priority,
            |rows| {
                Canvas::new(IntegrationPriorityReport::chart(rows))
                    .width(Fill)
                    .height(IntegrationPriorityReport::height(rows))
                    .into()
            },
        ))
        .push(chart_section(
            CreatedClosedReport::title(),
            CreatedClosedReport::subtitle(),
            &results.created_vs_closed,
            |rows| {
                Canvas::new(CreatedClosedReport::chart(rows))
                    .width(Fill)
                    .height(CHART_HEIGHT)
                    .into()
            },
        ))
        .push(chart_section(
            CriticalRatioReport::title(),
            CriticalRatioReport::subtitle(),
            &results.critical_ratio,
            |rows| {
                Canvas::new(CriticalRatioReport::chart(rows))
                    .width(Fill)
                    .height(CHART_HEIGHT)
                    .into()
            },
        ))
        .push(chart_section(
            CycleWaitingReport::title(),
            CycleWaitingReport::subtitle(),
            &results.cycle_waiting,
            |rows| {
                Canvas::new(CycleWaitingReport::chart(rows))
                    .width(Fill)
                    .height(CHART_HEIGHT)
                    .into()
            },
        ))
        .push(chart_section(
            AvgIssuesDevReport::title(),
            AvgIssuesDevReport::subtitle(),
            &results.avg_issues_dev,
            |rows| {
                Canvas::new(AvgIssuesDevReport::chart(rows))
                    .width(Fill)
                    .height(CHART_HEIGHT)
                    .into()
            },
        ))
}

fn chart_section<'a, T>(
    title: &'static str,
    subtitle: &'static str,
    result: &'a DashboardResult<Vec<T>>,
    chart: impl FnOnce(&'a [T]) -> Element<'a, Message>,
) -> Element<'a, Message> {
    let section = column![text(title).size(18), text(subtitle).size(14)].spacing(8);

    let section = match result {
        Ok(rows) => section.push(chart(rows.as_slice())),
        Err(DashboardError::EmptyResult) => section.push(
            container(text(EMPTY_MESSAGE).size(14))
                .height(Length::Fixed(80.0))
                .center_y(Length::Fixed(80.0)),
        ),
        Err(err) => section.push(text(err.to_string()).size(14)),
    };

    container(section)
        .padding(16)
        .width(Fill)
        .style(|theme| iced::widget::container::bordered_box(theme))
        .into()
}

fn filter_panel<'a>(
    params: &'a DashboardParams,
    dates: &'a DateInputs,
    show_time_integrations: bool,
) -> Element<'a, Message> {
    let timeframes = row(Timeframe::ALL.into_iter().map(|timeframe| {
        toggle(
            timeframe.label(),
            params.timeframe == timeframe,
            Message::TimeframeSelected(timeframe),
        )
    }))
    .spacing(6);

    let date_inputs = column![
        text("Start date").size(13),
        text_input("YYYY-MM-DD", &dates.start)
            .on_input(Message::StartDateChanged)
            .size(13),
        date_hint(dates.start_hint.as_deref()),
        text("End date").size(13),
        text_input("YYYY-MM-DD", &dates.end)
            .on_input(Message::EndDateChanged)
            .size(13),
        date_hint(dates.end_hint.as_deref()),
    ]
    .spacing(6);

    let priorities = row(Priority::ALL.into_iter().map(|priority| {
        toggle(
            priority.label(),
            params.priorities.contains(&priority),
            Message::PriorityToggled(priority),
        )
    }))
    .spacing(6)
    .wrap();

    let integrations = integration_toggles(&params.integrations, Message::IntegrationToggled);

    let time_header = button(
        text(if show_time_integrations {
            "Integrations over time -"
        } else {
            "Integrations over time +"
        })
        .size(13),
    )
    .on_press(Message::ToggleTimeIntegrations)
    .style(move |_, status| toggle_button_style(show_time_integrations, status));

    let mut panel = column![
        heading("Timeframe"),
        timeframes,
        heading("Date range"),
        date_inputs,
        heading("Priorities"),
        priorities,
        heading("Integrations"),
        row![
            toggle("Select all", false, Message::SelectAllIntegrations),
            toggle("Clear", false, Message::ClearIntegrations),
        ]
        .spacing(6),
        text(format!(
            "{} of {} selected",
            params.integrations.len(),
            INTEGRATION_CATALOG.len()
        ))
        .size(12),
        integrations,
        Space::new().height(Length::Fixed(8.0)),
        time_header,
    ]
    .spacing(10)
    .padding(16);

    if show_time_integrations {
        panel = panel.push(integration_toggles(
            &params.time_integrations,
            Message::TimeIntegrationToggled,
        ));
    }

    panel.into()
}

fn date_hint<'a>(hint: Option<&'a str>) -> Element<'a, Message> {
    match hint {
        Some(hint) => text(hint)
            .size(12)
            .style(|_| text::Style {
                color: Some(DRAWER_TEXT_INACTIVE),
            })
            .into(),
        None => Space::new().height(Length::Fixed(0.0)).into(),
    }
}

fn heading<'a>(label: &'a str) -> Element<'a, Message> {
    text(label).size(15).into()
}

fn toggle<'a>(label: &'a str, active: bool, message: Message) -> Element<'a, Message> {
    button(text(label).size(12))
        .padding([4, 8])
        .on_press(message)
        .style(move |_, status| toggle_button_style(active, status))
        .into()
}

fn integration_toggles<'a>(
    selected: &'a std::collections::BTreeSet<String>,
    on_toggle: fn(String) -> Message,
) -> Element<'a, Message> {
    row(INTEGRATION_CATALOG.iter().map(|name| {
        toggle(name, selected.contains(*name), on_toggle((*name).to_owned()))
    }))
    .spacing(4)
    .wrap()
    .into()
}
