//! Shared utilities for integration testing.

use std::sync::Arc;
use std::time::Duration;

use env_console::api::registry::{default_inventory, EnvironmentRegistry};
use env_console::config::ServerConfig;
use env_console::http::HttpServer;
use env_console::lifecycle::Shutdown;

/// Start a server on an ephemeral port with the built-in inventory.
///
/// Returns the base URL and the shutdown coordinator; dropping the
/// coordinator without triggering leaves the task to die with the runtime.
pub async fn start_server(config: ServerConfig) -> (String, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let registry = Arc::new(EnvironmentRegistry::new(Box::new(default_inventory)));
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, registry).unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Wait for the listener task to come up
    tokio::time::sleep(Duration::from_millis(100)).await;
    (format!("http://{addr}"), shutdown)
}
