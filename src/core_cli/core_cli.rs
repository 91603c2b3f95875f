use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "flashftpd", about = "A minimal FTP server for flash-backed embedded hosts.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Control connection port, overrides the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory served as `/`, overrides the configuration file
    #[arg(short, long)]
    pub root: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
