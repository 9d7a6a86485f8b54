//! Backend entry-point: wires the REST endpoints and OpenAPI docs.

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use rand::RngCore;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use skillswap_backend::inbound::http::health::HealthState;
use skillswap_backend::server::{create_server, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let secret_path =
        env::var("TOKEN_SECRET_FILE").unwrap_or_else(|_| "/var/run/secrets/token_secret".into());
    let token_secret = match std::fs::read(&secret_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %secret_path, error = %e, "using temporary token secret (dev only)");
                let mut bytes = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut bytes);
                bytes
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read token secret at {secret_path}: {e}"
                )));
            }
        }
    };

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, token_secret);
    let server = create_server(health_state, config)?;
    server.await
}
