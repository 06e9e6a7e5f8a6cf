use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(
    name = "swagger-shell",
    version,
    about = "Browse and try out Swagger/OpenAPI specifications in the terminal"
)]
pub struct Cli {
    /// Initial address, e.g. "/endpoint?url=https://host/swagger.yaml&path=/pets"
    pub location: Option<String>,

    /// Fix the specification URL (disables the chooser)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Theme key (only "hpe" is recognised)
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Base path all routes live under
    #[arg(long)]
    pub route_prefix: Option<String>,

    /// Background colour of the endpoint list (name or #rrggbb)
    #[arg(long)]
    pub background: Option<String>,

    /// Hide the "try it out" execution view
    #[arg(long)]
    pub no_execute: bool,

    /// Config file (defaults to ~/.config/swagger-shell/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log file (defaults to swagger-shell.log in the temp directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
