mod config;
mod constants;
mod core_cli;
mod core_error;
mod core_fs;
mod core_ftpcommand;
mod core_log;
mod core_network;
mod core_transfer;
mod server;
mod session;

use crate::config::Config;
use crate::core_cli::Cli;
use crate::core_log::logger::init_logger;
use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    init_logger(args.verbose);

    // Load configuration from the TOML file, defaults when none is given
    let mut config = if args.config.is_empty() {
        info!("No configuration file given, using defaults");
        Config::default()
    } else {
        Config::load_from_file(&args.config)?
    };

    // Override settings from CLI if provided
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }
    if let Some(root) = args.root {
        config.server.root_dir = PathBuf::from(root);
    }

    config.log();

    // Run the FTP server
    server::run(config).await
}
