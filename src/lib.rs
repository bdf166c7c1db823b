pub mod cli;
pub mod core;
pub mod providers;
pub mod rate_store;
pub mod store;

use crate::cli::convert::ConvertArgs;
use crate::core::config::AppConfig;
use crate::providers::OpenExchangeRatesProvider;
use crate::rate_store::RateStore;
use crate::store::JsonFileStorage;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    List,
    Convert(ConvertArgs),
    Refresh { force: bool },
    Export,
    Info,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider_config = config.provider();
    let provider =
        OpenExchangeRatesProvider::from_env(&provider_config.base_url, &provider_config.app_id_env)?;
    let data_file = config.data_file_path()?;
    let storage = JsonFileStorage::new(&data_file);
    let mut store = RateStore::new(provider, storage);

    match command {
        AppCommand::List => cli::list::run(&mut store).await,
        AppCommand::Convert(args) => cli::convert::run(&mut store, &args).await,
        AppCommand::Refresh { force } => cli::refresh::run(&mut store, force).await,
        AppCommand::Export => cli::export::run(&mut store, &data_file).await,
        AppCommand::Info => cli::info::run(&mut store, &data_file).await,
    }
}
