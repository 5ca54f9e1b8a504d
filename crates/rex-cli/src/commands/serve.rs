//! Serve command - start the upload web server.

use clap::Args;
use console::style;
use tracing::info;

use crate::server;

use super::load_config;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "{} Serving resume extractor on http://{}",
        style("✓").green(),
        listener.local_addr()?
    );
    info!("Upload limit is {} bytes", config.server.max_upload_size);

    axum::serve(listener, server::router(config)).await?;

    Ok(())
}
