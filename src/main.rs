use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ip_display::lifecycle::startup;

#[derive(Parser)]
#[command(name = "ip-display")]
#[command(version, about = "Shows the caller's forwarded and direct IP address", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match startup::run(cli.config.as_deref(), cli.port).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("ip-display: {e}");
            ExitCode::FAILURE
        }
    }
}
