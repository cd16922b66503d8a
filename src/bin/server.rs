//! filebay Server Binary
//!
//! Starts the TCP server over a root directory.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use filebay::network::Server;
use filebay::Config;

/// filebay server
#[derive(Parser, Debug)]
#[command(name = "filebay-server")]
#[command(about = "Remote file-access server over one directory")]
#[command(version)]
struct Args {
    /// Directory to serve
    #[arg(short, long, default_value = "./filebay_data")]
    root: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:9919")]
    listen: String,

    /// Maximum concurrent connections
    #[arg(short, long, default_value_t = 64)]
    max_connections: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,filebay=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("filebay server v{}", filebay::VERSION);
    tracing::info!("root directory: {}", args.root);
    tracing::info!("listen address: {}", args.listen);

    let config = Config::builder()
        .root_dir(&args.root)
        .listen_addr(&args.listen)
        .max_connections(args.max_connections)
        .build();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}
