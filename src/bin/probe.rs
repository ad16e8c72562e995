//! Health probe for container `HEALTHCHECK` directives.
//!
//! Exits 0 when `/health` answers 200 with `status == "healthy"`, 1 otherwise.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use ip_display::health::check::check;

#[derive(Parser)]
#[command(name = "ip-display-probe")]
#[command(about = "Check that an ip-display instance is healthy", long_about = None)]
struct Cli {
    /// Base URL of the instance
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = 3)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .no_proxy()
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match check(&client, &cli.url).await {
        Ok(status) => {
            println!("{}", serde_json::to_string(&status).unwrap_or_default());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Unhealthy: {}", e);
            ExitCode::FAILURE
        }
    }
}
