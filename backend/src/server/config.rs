//! Server configuration from CLI flags and environment.

use std::net::SocketAddr;

use clap::Parser;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Parser)]
#[command(name = "contacts-backend", about = "Contact directory REST API")]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,
}
