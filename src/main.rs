mod actions;
mod app;
mod cli;
mod config;
mod editor;
mod error;
mod history;
mod location;
mod logging;
mod request;
mod router;
mod shell;
mod state;
mod swagger;
mod types;
mod ui;

use app::App;
use clap::Parser;
use cli::Cli;
use color_eyre::Result;
use config::Config;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let props = config.props(&cli);

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path)?;

    let initial_location = cli.location.clone().unwrap_or_else(|| "/".to_string());
    info!(location = %initial_location, props = ?props, "starting swagger-shell");

    let terminal = ratatui::init();
    let result = App::new(props, &initial_location).run(terminal).await;
    ratatui::restore();
    result
}
