//! Utility functions.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::coupon::Snapshot;
use crate::error::Result;
use crate::store::MemoryStore;

/// Read a JSON snapshot (`{"matches": [...], "coupons": [...]}`) from disk.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&raw)?;
    Ok(snapshot)
}

/// Preload a store from a JSON seed file.
pub fn seed_store(store: &MemoryStore, path: &Path) -> Result<()> {
    let snapshot = read_snapshot(path)?;
    store.load_seed(snapshot)?;
    info!(path = %path.display(), "Store seeded");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = tokio::signal::ctrl_c() => info!("Received Ctrl+C"),
                }
                return;
            }
            Err(e) => warn!(error = %e, "Cannot listen for SIGTERM, waiting for Ctrl+C only"),
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C"),
        Err(e) => warn!(error = %e, "Cannot listen for Ctrl+C"),
    }
}
