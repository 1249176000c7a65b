mod app;
mod charts;
mod config;
mod dashboard;
mod data;
mod error;
#[cfg(test)]
mod fixtures;
mod filter;
mod importing;
mod integrations;
mod message;
mod reports;
mod screens;
mod theme;
mod tickets;

use app::App;
use clap::Parser;
use config::DashboardConfig;
use iced::Settings;
use lucide_icons::LUCIDE_FONT_BYTES;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    let config = DashboardConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        "Integrations dashboard v{} starting with {}",
        env!("CARGO_PKG_VERSION"),
        config.csv.display()
    );

    iced::application(move || App::new(config.clone()), App::update, App::view)
        .theme(App::theme)
        .settings(Settings {
            fonts: vec![LUCIDE_FONT_BYTES.into()],
            ..Default::default()
        })
        .window_size((1280.0, 900.0))
        .run()
}
