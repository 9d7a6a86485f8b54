//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use chrono::Duration;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: Vec<u8>,
    pub(crate) token_ttl: Duration,
}

impl ServerConfig {
    /// Construct a server configuration from a bind address and token secret.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: Vec<u8>) -> Self {
        Self {
            bind_addr,
            token_secret,
            token_ttl: Duration::hours(24),
        }
    }

    /// Override the bearer-token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
