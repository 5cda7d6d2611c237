use anyhow::{anyhow, Result};

pub mod config;
pub mod crawler;
pub mod declare;
pub mod logging;
pub mod server;
pub mod util;

use crate::config::SETTINGS;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let addr = format!(
        "{host}:{port}",
        host = SETTINGS.system.http_host,
        port = SETTINGS.system.http_port
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|why| anyhow!("Failed to bind {} because {:?}", addr, why))?;

    logging::info_console(format!("quote server listening on {}", addr));
    logging::info_file_async(format!("quote server listening on {}", addr));

    axum::serve(listener, server::router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|why| anyhow!("Failed to serve because {:?}", why))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        logging::info_console("received ctrl-c, shutting down".to_string());
    }
}
