use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sysmon_https::counters::{CounterSource, ProcfsCounters};
use sysmon_https::sampler::StatsSampler;
use sysmon_https::version::{NAME, VERSION};
use sysmon_https::*;
use tokio::time::Duration;
use tokio_rustls::TlsAcceptor;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();
    tracing::info!(name = NAME, version = VERSION, "starting");

    let app_config = config::AppConfig::load()?;

    let tls_config = tls::load_server_config(
        &args.cert_file,
        &args.key_file,
        Path::new(&app_config.tls.ca_file),
        app_config.tls.require_client_auth,
    )?;
    let acceptor = TlsAcceptor::from(Arc::new(tls_config));

    let source: Arc<dyn CounterSource> = Arc::new(ProcfsCounters::new(
        &app_config.counters.proc_root,
        &app_config.counters.disk_mount,
    ));
    let sampler = Arc::new(StatsSampler::new(source));
    let app = routes::app(sampler, PathBuf::from(&app_config.server.document_root));

    let addr = args.socket_addr();
    let listener = tls::TlsListener::bind(
        addr,
        acceptor,
        app_config.server.max_connections,
        Duration::from_secs(app_config.server.handshake_timeout_secs),
        Duration::from_secs(app_config.server.idle_timeout_secs),
    )
    .await
    .map_err(|e| anyhow::anyhow!("bind {}: {}", addr, e))?;
    tracing::info!(
        max_connections = app_config.server.max_connections,
        document_root = %app_config.server.document_root,
        "Server listening on https://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Received shutdown signal");
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
