// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use axum::serve;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use rust_rtb::api;
use rust_rtb::config::{CliArgs, ConfigManager};
use rust_rtb::logging::bid_log_writer::BidLogWriter;
use rust_rtb::logging::logger;
use rust_rtb::model::FileCampaignSource;
use rust_rtb::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化全局 tracing 日志，guard 在 main 结束前一直持有
    let _guard = logger::init(&args.log_dir).context("Unable to set global tracing subscriber")?;
    info!("RTB server starting on {}", args.bind_addr());

    // 加载广告活动目录，失败则不启动
    let source = FileCampaignSource::new(&args.campaigns);
    let config = Arc::new(
        ConfigManager::new(Box::new(source))
            .with_context(|| format!("Unable to load campaigns from {}", args.campaigns.display()))?,
    );

    let bid_log = BidLogWriter::new(&args.log_dir, 10_000, 100, 1000, args.log_retention_hours);

    let state = Arc::new(AppState {
        config: config.clone(),
        bid_log: bid_log.clone(),
    });

    #[cfg(unix)]
    tokio::spawn(reload_on_sighup(config.clone()));

    let addr = args.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Unable to bind {}", addr))?;
    info!("RTB server running at http://{}", addr);

    serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shutting down gracefully...");
    bid_log.shutdown().await;
    info!("RTB server shut down.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// SIGHUP 触发目录重新加载，失败时继续使用旧快照
#[cfg(unix)]
async fn reload_on_sighup(config: Arc<ConfigManager>) {
    let mut hangup = match signal::unix::signal(signal::unix::SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(e) => {
            warn!(error = %e, "failed to listen for SIGHUP, catalog reload disabled");
            return;
        }
    };
    while hangup.recv().await.is_some() {
        info!("SIGHUP received, reloading campaign catalog");
        match config.reload() {
            Ok(catalog) => info!(
                source = %catalog.source(),
                campaigns = catalog.len(),
                "campaign catalog reload applied"
            ),
            Err(e) => error!(error = %e, "campaign catalog reload rejected, previous snapshot still serving"),
        }
    }
}
