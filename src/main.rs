//! Static Server
//!
//! Serves static files from a per-host directory.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.yml ──▶ loader ──▶ ConfigStore ◀── reload (watch │ GET /reload │ SIGHUP)
//!                               │
//!   Request ──▶ access log ──▶ Resolver ──▶ ServeDir ──▶ Response
//!               (client IP)    (host → dir,   (stream / 404)
//!                               strict checks)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use static_server::config::ServerSettings;
use static_server::lifecycle;
use static_server::net::TrustedProxies;
use static_server::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "static-server", version, about = "Multi-tenant static file server")]
struct Cli {
    /// Port to run the server on
    #[arg(long, default_value = "8080")]
    port: String,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Configuration file for host to directory mapping
    #[arg(long, default_value = "config.yml")]
    config: PathBuf,

    /// Directory served for hosts without a mapping
    #[arg(long, default_value = "./")]
    root: PathBuf,

    /// Return 404 unless the requested file (or a directory's index.html) exists
    #[arg(long)]
    strict: bool,

    /// Verbose framework logging
    #[arg(long)]
    debug: bool,

    /// Trusted proxies, comma separated (IPs or CIDRs)
    #[arg(long, default_value = "127.0.0.1")]
    proxy: String,

    /// Expose GET /reload
    #[arg(long)]
    reload_endpoint: bool,

    /// Do not watch the configuration file for changes
    #[arg(long)]
    no_watch: bool,

    /// Prometheus exporter address (disabled when unset)
    #[arg(long)]
    metrics_address: Option<SocketAddr>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
}

impl Cli {
    fn into_settings(self) -> Result<ServerSettings, static_server::net::ProxyParseError> {
        let trusted_proxies = if self.proxy.trim().is_empty() {
            TrustedProxies::default()
        } else {
            TrustedProxies::parse_list(&self.proxy)?
        };

        Ok(ServerSettings {
            bind: self.bind,
            port: self.port,
            config_path: self.config,
            default_root: self.root,
            strict: self.strict,
            debug: self.debug,
            trusted_proxies,
            reload_endpoint: self.reload_endpoint,
            watch: !self.no_watch,
            metrics_address: self.metrics_address,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let settings = match cli.into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Invalid command line");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "static-server starting");

    match lifecycle::run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "static-server failed");
            ExitCode::FAILURE
        }
    }
}
