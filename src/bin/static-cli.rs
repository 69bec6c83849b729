use std::path::PathBuf;

use clap::{Parser, Subcommand};

use static_server::config::load_config;

#[derive(Parser)]
#[command(name = "static-cli")]
#[command(about = "Management CLI for the static file server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a running server to reload its configuration
    Reload {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Load and validate a configuration file without starting a server
    Check {
        #[arg(default_value = "config.yml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Reload { url } => {
            let res = reqwest::get(format!("{}/reload", url.trim_end_matches('/'))).await?;
            let status = res.status();
            let body = res.text().await?;
            if status.is_success() {
                println!("{}", body);
            } else {
                eprintln!("Error: server returned status {}", status);
                eprintln!("Response: {}", body);
                std::process::exit(1);
            }
        }
        Commands::Check { config } => match load_config(&config) {
            Ok(hosts) => {
                println!("{}", serde_json::to_string_pretty(&hosts)?);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
