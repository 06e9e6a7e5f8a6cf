use crate::cli::Cli;
use color_eyre::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellConfig,
}

/// `[shell]` table of the config file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShellConfig {
    pub background: Option<String>,
    pub executable: Option<bool>,
    pub route_prefix: Option<String>,
    pub theme: Option<String>,
    pub url: Option<String>,
}

/// Fixed configuration of the shell, after merging CLI flags over the file
#[derive(Debug, Clone, PartialEq)]
pub struct ShellProps {
    /// Background colour passed through to the endpoint list
    pub background: Option<String>,
    /// Whether endpoint detail links to the execution view
    pub executable: bool,
    /// Basename of the history
    pub route_prefix: Option<String>,
    pub theme: Option<String>,
    /// Fixed specification URL; disables the chooser and unload
    pub url: Option<String>,
}

impl Default for ShellProps {
    fn default() -> Self {
        Self {
            background: None,
            executable: true,
            route_prefix: None,
            theme: None,
            url: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        Ok(home_dir
            .join(".config")
            .join("swagger-shell")
            .join("config.toml"))
    }

    /// Load `path`, or the default file if it exists, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::config_path()?;
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Merge CLI flags over the file values
    pub fn props(&self, cli: &Cli) -> ShellProps {
        let shell = &self.shell;
        ShellProps {
            background: non_empty(cli.background.clone().or_else(|| shell.background.clone())),
            executable: !cli.no_execute && shell.executable.unwrap_or(true),
            route_prefix: non_empty(
                cli.route_prefix
                    .clone()
                    .or_else(|| shell.route_prefix.clone()),
            ),
            theme: non_empty(cli.theme.clone().or_else(|| shell.theme.clone())),
            url: non_empty(cli.url.clone().or_else(|| shell.url.clone())),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    url::Url::parse(url).map_err(|e| format!("Invalid URL: {e}"))?;

    Ok(())
}

/// Origin (`scheme://host[:port]`) of a URL
///
/// Example: http://localhost:5000/swagger/v1/swagger.json -> http://localhost:5000
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let origin = parsed.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
