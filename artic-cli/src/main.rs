mod app;
mod args;
mod command;
mod paths;
mod table;

use std::fs;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use artic_lib::ArticClient;
use artic_lib::browser::Browser;
use clap::Parser;
use log::info;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::app::App;
use crate::args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_level) {
        eprintln!("Error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let config = args.browser_config();
    let client = match ArticClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("browsing {} with {} rows per page", config.base_url, config.page_size);

    let browser = Browser::new(client, config.page_size);
    if let Err(e) = App::new(browser).run(args.start_page).await {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Writes the log to the platform cache directory, rotating the previous run's file.
fn init_logging(level: LevelFilter) -> io::Result<()> {
    paths::rotate_logs();
    let path = paths::log_file().unwrap_or_else(|| PathBuf::from("artic.log"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let log_file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), log_file).map_err(io::Error::other)
}
