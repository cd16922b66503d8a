//! Shared test helpers

use std::net::SocketAddr;
use std::path::Path;
use std::thread;

use filebay::network::Server;
use filebay::Config;

/// Start a server over `root` on an ephemeral port.
///
/// The acceptor thread runs for the rest of the test process.
pub fn spawn_server(root: &Path) -> SocketAddr {
    let config = Config::builder()
        .root_dir(root)
        .listen_addr("127.0.0.1:0")
        .build();
    let server = Server::bind(config).expect("bind test server");
    let addr = server.local_addr().expect("server local addr");
    thread::spawn(move || {
        let _ = server.run();
    });
    addr
}
