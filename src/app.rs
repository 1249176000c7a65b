use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Task, Theme};
use lucide_icons::iced::{
    icon_chart_line, icon_house, icon_panel_left_close, icon_panel_left_open,
};
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::dashboard::{compute, DashboardParams, DashboardResults};
use crate::importing::{read_ticket_csv, TicketImport};
use crate::integrations::all_integrations;
use crate::message::Message;
use crate::screens::Page;
use crate::theme::{
    accent_button_style, toggle_button_style, DRAWER_BG, DRAWER_TEXT_ACTIVE,
    DRAWER_TEXT_INACTIVE,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Loaded(Arc<TicketImport>),
    Failed(String),
}

/// Raw text of the date inputs, kept apart from the parsed params so a
/// half-typed date never reaches the pipeline.
#[derive(Debug, Clone, Default)]
pub struct DateInputs {
    pub start: String,
    pub end: String,
    pub start_hint: Option<String>,
    pub end_hint: Option<String>,
}

pub struct App {
    theme: Theme,
    config: DashboardConfig,
    current_page: Page,
    sidebar_collapsed: bool,
    load: LoadState,
    params: DashboardParams,
    dates: DateInputs,
    show_time_integrations: bool,
    results: Option<DashboardResults>,
}

impl App {
    pub fn new(config: DashboardConfig) -> (Self, Task<Message>) {
        let today = Utc::now().date_naive();
        let app = Self::with_defaults(config, today);
        let task = app.load_task();
        (app, task)
    }

    fn with_defaults(config: DashboardConfig, today: NaiveDate) -> Self {
        let params = DashboardParams::with_defaults(today, config.lookback_months);
        let dates = DateInputs {
            start: params.start_date.format(DATE_FORMAT).to_string(),
            end: params.end_date.format(DATE_FORMAT).to_string(),
            start_hint: None,
            end_hint: None,
        };

        Self {
            theme: Theme::Dark,
            config,
            current_page: Page::Home,
            sidebar_collapsed: true,
            load: LoadState::Loading,
            params,
            dates,
            show_time_integrations: false,
            results: None,
        }
    }

    fn load_task(&self) -> Task<Message> {
        Task::perform(read_ticket_csv(self.config.csv.clone()), |result| {
            Message::TicketsLoaded(result.map(Arc::new).map_err(|err| err.to_string()))
        })
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleSidebar => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
            }
            Message::Navigate(page) => {
                self.current_page = page;
            }
            Message::ReloadTickets => {
                self.load = LoadState::Loading;
                self.results = None;
                return self.load_task();
            }
            Message::TicketsLoaded(Ok(import)) => {
                info!(tickets = import.tickets.len(), dropped = import.dropped, "dataset ready");
                self.load = LoadState::Loaded(import);
                self.recompute();
            }
            Message::TicketsLoaded(Err(err)) => {
                warn!(error = %err, "ticket load failed");
                self.load = LoadState::Failed(err);
                self.results = None;
            }
            Message::TimeframeSelected(timeframe) => {
                self.params.timeframe = timeframe;
                self.recompute();
            }
            Message::StartDateChanged(value) => {
                let hint = match parse_date_input(&value) {
                    Ok(date) => {
                        self.params.start_date = date;
                        self.recompute();
                        None
                    }
                    Err(hint) => Some(hint),
                };
                self.dates.start_hint = hint;
                self.dates.start = value;
            }
            Message::EndDateChanged(value) => {
                let hint = match parse_date_input(&value) {
                    Ok(date) => {
                        self.params.end_date = date;
                        self.recompute();
                        None
                    }
                    Err(hint) => Some(hint),
                };
                self.dates.end_hint = hint;
                self.dates.end = value;
            }
            Message::PriorityToggled(priority) => {
                if !self.params.priorities.remove(&priority) {
                    self.params.priorities.insert(priority);
                }
                self.recompute();
            }
            Message::IntegrationToggled(name) => {
                if !self.params.integrations.remove(&name) {
                    self.params.integrations.insert(name);
                }
                self.recompute();
            }
            Message::SelectAllIntegrations => {
                self.params.integrations = all_integrations();
                self.recompute();
            }
            Message::ClearIntegrations => {
                self.params.integrations.clear();
                self.recompute();
            }
            Message::TimeIntegrationToggled(name) => {
                if !self.params.time_integrations.remove(&name) {
                    self.params.time_integrations.insert(name);
                }
                self.recompute();
            }
            Message::ToggleTimeIntegrations => {
                self.show_time_integrations = !self.show_time_integrations;
            }
        }

        Task::none()
    }

    fn recompute(&mut self) {
        if let LoadState::Loaded(import) = &self.load {
            self.results = Some(compute(&import.tickets, &self.params));
        }
    }

    pub fn view<'a>(&'a self) -> Element<'a, Message> {
        let sidebar = self.sidebar_view();
        let content = self.content_view();

        row![sidebar, content].height(Length::Fill).into()
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn sidebar_view<'a>(&'a self) -> Element<'a, Message> {
        let toggle_icon = if self.sidebar_collapsed {
            icon_panel_left_open()
        } else {
            icon_panel_left_close()
        };

        let toggle = button(toggle_icon.size(18))
            .on_press(Message::ToggleSidebar)
            .style(accent_button_style);

        let pages = [Page::Home, Page::Reports]
            .into_iter()
            .map(|page| self.sidebar_button(page));

        let content = column![toggle, Space::new().height(Length::Fixed(12.0))]
            .push(column(pages).spacing(6))
            .spacing(12)
            .padding(12)
            .width(if self.sidebar_collapsed {
                Length::Fixed(64.0)
            } else {
                Length::Fixed(220.0)
            })
            .height(Length::Fill);

        container(content)
            .style(|_| iced::widget::container::background(DRAWER_BG))
            .into()
    }

    fn sidebar_button<'a>(&'a self, page: Page) -> Element<'a, Message> {
        let selected = self.current_page == page;
        let label = page.label();
        let icon = match page {
            Page::Home => icon_house(),
            Page::Reports => icon_chart_line(),
        }
        .size(18)
        .style(move |_| drawer_text(selected));

        let label_text = text(label).style(move |_| drawer_text(selected));

        let row_content = if self.sidebar_collapsed {
            row![
                Space::new().width(Length::Fill),
                icon,
                Space::new().width(Length::Fill)
            ]
            .align_y(Alignment::Center)
        } else {
            row![icon, label_text]
                .spacing(12)
                .align_y(Alignment::Center)
        };

        button(row_content)
            .on_press(Message::Navigate(page))
            .width(Length::Fill)
            .style(move |_, status| toggle_button_style(selected, status))
            .padding(8)
            .into()
    }

    fn content_view<'a>(&'a self) -> Element<'a, Message> {
        match self.current_page {
            Page::Home => crate::screens::home::view(&self.load, &self.config.csv),
            Page::Reports => crate::screens::reports::view(
                &self.load,
                &self.params,
                &self.dates,
                self.show_time_integrations,
                self.results.as_ref(),
            ),
        }
    }
}

/// A valid date, or the hint to show under the input.
fn parse_date_input(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("{value:?} is not a YYYY-MM-DD date"))
}

fn drawer_text(selected: bool) -> iced::widget::text::Style {
    iced::widget::text::Style {
        color: Some(if selected {
            DRAWER_TEXT_ACTIVE
        } else {
            DRAWER_TEXT_INACTIVE
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::fixtures::january_scenario;
    use crate::tickets::{Priority, Timeframe};
    use clap::Parser;
    use std::path::PathBuf;

    fn loaded_app() -> App {
        let config = DashboardConfig::parse_from(["integrations-dashboard"]);
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut app = App::with_defaults(config, today);

        let _ = app.update(Message::TicketsLoaded(Ok(Arc::new(TicketImport {
            source: PathBuf::from("tickets.csv"),
            tickets: january_scenario(),
            dropped: 0,
        }))));
        app
    }

    #[test]
    fn load_computes_every_chart() {
        let app = loaded_app();
        let results = app.results.as_ref().unwrap();
        assert!(results.created_vs_closed.is_ok());
        assert!(results.gantt.is_ok());
    }

    #[test]
    fn invalid_date_keeps_previous_value_and_sets_hint() {
        let mut app = loaded_app();
        let before = app.params.start_date;

        let _ = app.update(Message::StartDateChanged("2024-13-01".to_owned()));
        assert_eq!(app.params.start_date, before);
        assert_eq!(app.dates.start, "2024-13-01");
        assert!(app.dates.start_hint.is_some());

        let _ = app.update(Message::StartDateChanged("2024-01-10".to_owned()));
        assert_eq!(app.params.start_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert!(app.dates.start_hint.is_none());
    }

    #[test]
    fn valid_end_date_leaves_invalid_start_hint_in_place() {
        let mut app = loaded_app();
        let before = app.params.start_date;

        let _ = app.update(Message::StartDateChanged("2024-13-01".to_owned()));
        let _ = app.update(Message::EndDateChanged("2024-01-30".to_owned()));

        assert_eq!(app.params.start_date, before);
        assert_eq!(app.params.end_date, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
        assert_eq!(app.dates.start, "2024-13-01");
        assert!(app.dates.start_hint.is_some());
        assert!(app.dates.end_hint.is_none());

        let _ = app.update(Message::EndDateChanged("soon".to_owned()));
        assert!(app.dates.end_hint.is_some());
        assert_eq!(app.params.end_date, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
    }

    #[test]
    fn clearing_integrations_empties_charts() {
        let mut app = loaded_app();

        let _ = app.update(Message::ClearIntegrations);
        let results = app.results.as_ref().unwrap();
        assert!(matches!(results.gantt, Err(DashboardError::EmptyResult)));

        let _ = app.update(Message::SelectAllIntegrations);
        assert!(app.results.as_ref().unwrap().gantt.is_ok());
    }

    #[test]
    fn toggles_flip_membership() {
        let mut app = loaded_app();

        let _ = app.update(Message::PriorityToggled(Priority::Low));
        assert!(!app.params.priorities.contains(&Priority::Low));
        let _ = app.update(Message::PriorityToggled(Priority::Low));
        assert!(app.params.priorities.contains(&Priority::Low));

        let _ = app.update(Message::TimeIntegrationToggled("shopify".to_owned()));
        assert!(!app.params.time_integrations.contains("shopify"));

        let _ = app.update(Message::TimeframeSelected(Timeframe::Week));
        assert_eq!(app.params.timeframe, Timeframe::Week);
    }

    #[test]
    fn failed_load_clears_results() {
        let mut app = loaded_app();
        let _ = app.update(Message::TicketsLoaded(Err("missing column(s): name".to_owned())));
        assert!(app.results.is_none());
        assert!(matches!(app.load, LoadState::Failed(_)));
    }
}
