use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routes::RouteContext;

/// Binds the configured address and serves until the task is dropped.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!(
        "Listening on {} (files under {})",
        cfg.server.listen_addr,
        cfg.files.directory.display()
    );

    let ctx = Arc::new(RouteContext::from_config(cfg));
    serve(listener, ctx, cfg.idle_timeout()).await
}

/// Accepts connections on an already bound listener, one task per socket.
pub async fn serve(
    listener: TcpListener,
    ctx: Arc<RouteContext>,
    idle_timeout: Duration,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        debug!("Accepted connection from {}", peer);

        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, ctx, idle_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
