pub mod cli;
pub mod core;
pub mod providers;

use crate::core::catalog::CurrencyCatalog;
use anyhow::Result;
use tracing::{debug, info};

/// Commands the application runs after parsing the command line.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Interactive converter session.
    Interactive,
    /// One conversion, then exit.
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
    },
    /// Print the supported currencies.
    List,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let catalog = CurrencyCatalog::bundled();

    // Listing reads only the embedded catalog; no credential required.
    if let AppCommand::List = command {
        cli::list::run(&catalog);
        return Ok(());
    }

    let config = match config_path {
        Some(path) => core::config::AppConfig::load_from_path(path)?,
        None => core::config::AppConfig::load()?,
    };

    let base_url = config
        .providers
        .exchange_rate_api
        .as_ref()
        .map_or("https://v6.exchangerate-api.com", |p| &p.base_url);
    debug!("Using rate service at {base_url}");
    let provider = providers::ExchangeRateApi::new(base_url, &config.api_key);

    match command {
        AppCommand::Interactive => cli::interactive::run(&catalog, &provider).await,
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&catalog, &provider, &amount, from.as_deref(), to.as_deref()).await
        }
        AppCommand::List => unreachable!("List is handled before configuration loads"),
    }
}
