//! Shutdown coordination and final cleanup.

use crate::error::Result;

use super::MediaDownloader;

impl MediaDownloader {
    /// Gracefully shut down the downloader
    ///
    /// This method performs a graceful shutdown sequence:
    /// 1. Stops accepting new downloads and signals background tasks
    ///    (retention sweeper, delayed cleanups already spawned keep running)
    /// 2. Deletes every tracked file regardless of age
    /// 3. Removes the temp directory if it is empty
    ///
    /// Every step logs failures and continues; shutdown never hangs or
    /// crashes on cleanup errors, and calling it twice is harmless.
    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!("Initiating graceful shutdown");

        // 1. Reject new work and stop the retention sweeper
        self.shutdown_token.cancel();
        tracing::info!("Stopped accepting new downloads");

        // 2. Delete everything still tracked
        let tracked = self.registry.len().await;
        let outcome = self.registry.drain_all().await;
        tracing::info!(
            tracked,
            deleted = outcome.deleted,
            missing = outcome.missing,
            failed = outcome.failed,
            "Drained ephemeral file registry"
        );

        // 3. Remove the temp dir; remove_dir refuses when files remain,
        // which is exactly the contract (untracked files are not ours)
        let temp_dir = &self.config.storage.temp_dir;
        match tokio::fs::remove_dir(temp_dir).await {
            Ok(()) => {
                tracing::info!(path = %temp_dir.display(), "Removed temp directory");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %temp_dir.display(),
                    error = %e,
                    "Temp directory left in place (not empty or busy)"
                );
            }
        }

        tracing::info!("Graceful shutdown complete");
        Ok(())
    }
}
