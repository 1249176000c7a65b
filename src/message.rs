use std::sync::Arc;

use crate::importing::TicketImport;
use crate::screens::Page;
use crate::tickets::{Priority, Timeframe};

#[derive(Debug, Clone)]
pub enum Message {
    ToggleSidebar,
    Navigate(Page),
    ReloadTickets,
    TicketsLoaded(Result<Arc<TicketImport>, String>),
    TimeframeSelected(Timeframe),
    StartDateChanged(String),
    EndDateChanged(String),
    PriorityToggled(Priority),
    IntegrationToggled(String),
    SelectAllIntegrations,
    ClearIntegrations,
    TimeIntegrationToggled(String),
    ToggleTimeIntegrations,
}
