use std::{error::Error, sync::Arc};

use tokio::net::UdpSocket;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod resolver;

use config::Config;

use crate::resolver::udp_listener_loop;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let socket = UdpSocket::bind(config.socket_addr()).await?;
    info!(
        address = %socket.local_addr()?,
        answer = %config.response.address,
        ttl = config.response.ttl,
        "DNS server listening"
    );

    udp_listener_loop(socket, Arc::new(config.response)).await;
    Ok(())
}
