use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "matrix-as-webhook")]
#[command(about = "Matrix application service that forwards room events to webhooks", long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Generate a registration file at this path and exit
    #[arg(long, value_name = "PATH")]
    pub generate_registration: Option<PathBuf>,

    /// Server address advertised in the registration
    /// (e.g., http://localhost:8080 or https://app.example.com)
    #[arg(long, default_value = "http://localhost:8080")]
    pub server: String,

    /// Application service token for the registration (generated if empty)
    #[arg(long)]
    pub as_token: Option<String>,
}
