//! filebay Client Binary
//!
//! Interactive client: connects to a server, then reads commands from
//! stdin until `exit` or end-of-input.

use std::io::Write;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use filebay::client::Session;
use filebay::network::Connection;

/// filebay interactive client
#[derive(Parser, Debug)]
#[command(name = "filebay-client")]
#[command(about = "Interactive remote file-access client")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(default_value_t = 9919)]
    port: u16,

    /// Directory that get writes into and put reads from
    #[arg(short = 'C', long, default_value = ".")]
    directory: String,

    /// Socket read/write timeout in milliseconds (0 blocks forever)
    #[arg(short, long, default_value_t = 0)]
    timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,filebay=debug"));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    tracing::info!("filebay client v{}", filebay::VERSION);
    tracing::info!("connecting to {} port {}", args.host, args.port);

    let conn = match Connection::connect(&args.host, args.port) {
        Ok(mut conn) => {
            if let Err(e) = conn.set_timeouts(args.timeout_ms, args.timeout_ms) {
                tracing::error!("failed to configure socket: {}", e);
                std::process::exit(1);
            }
            tracing::info!("connected to {}", conn.peer_addr());
            conn
        }
        Err(e) => {
            tracing::error!("connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = Session::new(conn).local_dir(&args.directory);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let status = match session.run(stdin.lock(), &mut stdout) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("session failed: {}", e);
            1
        }
    };
    let _ = stdout.flush();
    tracing::info!("finished");
    std::process::exit(status);
}
