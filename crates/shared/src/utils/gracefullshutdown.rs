use std::{future::Future, io};
use tracing::{error, info};

/// Resolves when `signal` fires. If the listener cannot be installed it never
/// resolves, so a broken handler does not trigger a shutdown.
async fn listen_for(name: &str, signal: impl Future<Output = io::Result<()>>) {
    if let Err(e) = signal.await {
        error!("Failed to listen for {name}: {e}");
        std::future::pending::<()>().await;
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = listen_for("Ctrl+C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = listen_for("SIGTERM", async {
        let mut signal =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        signal.recv().await;
        Ok(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Ctrl+C received, shutting down"),
        _ = terminate => info!("🛑 SIGTERM received, shutting down"),
    }
}
