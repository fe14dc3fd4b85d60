//! Retention sweeper for expired download artifacts
//!
//! Background task that periodically asks the file registry to delete
//! artifacts older than the retention window. The sweeper is the backstop
//! behind the per-request delayed cleanup: anything that slips past the
//! happy path (process restarts aside) is reclaimed here within one
//! interval of expiring.
//!
//! # Example
//!
//! ```no_run
//! use media_dl::registry::FileRegistry;
//! use media_dl::sweeper::RetentionSweeper;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() {
//! let registry = Arc::new(FileRegistry::new());
//! let shutdown = CancellationToken::new();
//!
//! let sweeper = RetentionSweeper::new(
//!     Arc::clone(&registry),
//!     Duration::from_secs(300),
//!     Duration::from_secs(3600),
//!     shutdown.child_token(),
//! );
//! tokio::spawn(sweeper.run());
//! # }
//! ```

use crate::registry::FileRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Recurring pass that expires tracked files past their retention age
///
/// One sweeper runs per process. It shares the registry with the request
/// path and the shutdown drain; all three rely on the registry treating
/// "file already absent" as success, so overlapping triggers are harmless.
pub struct RetentionSweeper {
    /// Shared registry of ephemeral files
    registry: Arc<FileRegistry>,

    /// Time between passes
    interval: Duration,

    /// Age past which a tracked file is deleted
    max_age: Duration,

    /// Stops the loop at process shutdown
    shutdown: CancellationToken,
}

impl RetentionSweeper {
    /// Creates a new sweeper. Nothing runs until [`run`](Self::run) is
    /// awaited (normally inside `tokio::spawn`).
    pub fn new(
        registry: Arc<FileRegistry>,
        interval: Duration,
        max_age: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            registry,
            interval,
            max_age,
            shutdown,
        }
    }

    /// Runs the sweep loop until the shutdown token fires.
    ///
    /// The first pass happens one full interval after startup, not
    /// immediately. A pass that finds nothing logs at debug; a pass that
    /// reclaims entries logs a summary at info. Per-entry failures are
    /// handled (and logged) inside the registry and never terminate the
    /// schedule.
    pub async fn run(self) {
        info!(
            interval_secs = self.interval.as_secs(),
            max_age_secs = self.max_age.as_secs(),
            "Retention sweeper started"
        );

        let first_tick = tokio::time::Instant::now() + self.interval;
        let mut ticker = tokio::time::interval_at(first_tick, self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let outcome = self.registry.sweep_older_than(self.max_age).await;
                    if outcome.removed_entries() > 0 {
                        info!(
                            deleted = outcome.deleted,
                            missing = outcome.missing,
                            failed = outcome.failed,
                            "Retention sweep expired tracked files"
                        );
                    } else {
                        debug!("Retention sweep found nothing to expire");
                    }
                }
                _ = self.shutdown.cancelled() => {
                    break;
                }
            }
        }

        info!("Retention sweeper stopped");
    }
}
