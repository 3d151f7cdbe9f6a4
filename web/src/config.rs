use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/web.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base address of the transactions API.
    pub api_url: String,
    pub bind: String,
    pub port: u16,
    /// `tracing_subscriber` filter directive.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3333".to_string(),
            bind: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "gofinances-web", about = "GoFinances dashboard front-end")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the API base URL (e.g. http://127.0.0.1:3333).
    #[arg(long)]
    pub api_url: Option<String>,
    /// Override the listen address.
    #[arg(long)]
    pub bind: Option<String>,
    /// Override the listen port.
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Override the log filter (e.g. debug, gofinances_core=trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Load settings from the command line, the config file and the environment.
pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

/// Defaults, then the TOML file, then `GOFINANCES_WEB_*` variables, then flags.
pub fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("GOFINANCES_WEB"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(bind) = args.bind {
        settings.bind = bind;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

/// Build the log filter from `log_level`; a malformed directive is an error.
pub fn log_filter(settings: &AppConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&settings.log_level).map_err(|source| AppError::LogLevel {
        level: settings.log_level.clone(),
        source,
    })
}
