use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "integrations-dashboard", version, about = "Integrations engineering ticket dashboard")]
pub struct DashboardConfig {
    /// Ticket table to load at startup
    #[arg(long, env = "TICKET_DASHBOARD_CSV", default_value = "hai_clickup_fake3.csv")]
    pub csv: PathBuf,

    /// Default start date is this many months before today
    #[arg(long, env = "TICKET_DASHBOARD_LOOKBACK_MONTHS", default_value_t = 6)]
    pub lookback_months: u32,

    /// tracing filter directives, e.g. `info` or `integrations_dashboard=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}
