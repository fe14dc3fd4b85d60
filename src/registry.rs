//! Ephemeral file registry
//!
//! Single source of truth for which downloaded files this process is still
//! responsible for deleting. Three independent triggers operate on the same
//! registry — the recurring retention sweep, the post-delivery delayed
//! cleanup, and the shutdown drain — so every mutation of the tracked set
//! goes through the mutex held here, and deletion is idempotent at the
//! filesystem layer ("already absent" counts as success).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Concurrent bookkeeping for ephemeral download artifacts.
///
/// Constructed once at process start and shared by reference (`Arc`) between
/// the orchestrator, the retention sweeper, and the shutdown path. The
/// creation instant of each entry is recorded here at registration time, so
/// age checks never depend on filesystem metadata.
#[derive(Debug, Default)]
pub struct FileRegistry {
    tracked: Mutex<HashMap<PathBuf, Instant>>,
}

/// Counts from one sweep or drain pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Files removed from disk
    pub deleted: usize,
    /// Entries whose file was already gone
    pub missing: usize,
    /// Entries whose delete attempt failed (still dropped from tracking)
    pub failed: usize,
}

impl SweepOutcome {
    /// Total entries dropped from tracking by this pass
    pub fn removed_entries(&self) -> usize {
        self.deleted + self.missing + self.failed
    }
}

impl FileRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a path. Idempotent: re-registering an already-tracked
    /// path keeps the original creation instant.
    pub async fn register(&self, path: PathBuf) {
        let mut tracked = self.tracked.lock().await;
        tracked.entry(path).or_insert_with(Instant::now);
    }

    /// Stop tracking a path, whether or not the underlying file still exists.
    /// Idempotent.
    pub async fn unregister(&self, path: &Path) {
        let mut tracked = self.tracked.lock().await;
        tracked.remove(path);
    }

    /// Whether a path is currently tracked
    pub async fn contains(&self, path: &Path) -> bool {
        let tracked = self.tracked.lock().await;
        tracked.contains_key(path)
    }

    /// Number of tracked entries
    pub async fn len(&self) -> usize {
        let tracked = self.tracked.lock().await;
        tracked.len()
    }

    /// Whether the registry tracks nothing
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Delete tracked files older than `max_age` and prune stale entries.
    ///
    /// The tracked set is snapshotted under the lock, the (slow) filesystem
    /// work runs with the lock released, and removals are committed under the
    /// lock afterwards — a sweep never blocks an in-flight registration for
    /// the duration of its deletes.
    ///
    /// Per entry: a file that is already gone is dropped from tracking
    /// without being treated as an error; an expired file gets exactly one
    /// best-effort delete and is dropped from tracking even when that delete
    /// fails; younger entries are left untouched. One entry's failure never
    /// aborts the rest of the pass.
    pub async fn sweep_older_than(&self, max_age: Duration) -> SweepOutcome {
        let snapshot: Vec<(PathBuf, Instant)> = {
            let tracked = self.tracked.lock().await;
            tracked
                .iter()
                .map(|(path, created_at)| (path.clone(), *created_at))
                .collect()
        };

        let now = Instant::now();
        let mut outcome = SweepOutcome::default();
        let mut to_remove: Vec<PathBuf> = Vec::new();

        for (path, created_at) in snapshot {
            match tokio::fs::metadata(&path).await {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    // Deleted externally or by another trigger; just untrack.
                    outcome.missing += 1;
                    to_remove.push(path);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Could not inspect tracked file; dropping it from tracking"
                    );
                    outcome.failed += 1;
                    to_remove.push(path);
                }
                Ok(_) => {
                    if now.saturating_duration_since(created_at) <= max_age {
                        continue;
                    }
                    match tokio::fs::remove_file(&path).await {
                        Ok(()) => {
                            tracing::debug!(path = %path.display(), "Removed expired file");
                            outcome.deleted += 1;
                        }
                        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                            outcome.missing += 1;
                        }
                        Err(e) => {
                            tracing::warn!(
                                path = %path.display(),
                                error = %e,
                                "Failed to remove expired file; dropping it from tracking"
                            );
                            outcome.failed += 1;
                        }
                    }
                    to_remove.push(path);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut tracked = self.tracked.lock().await;
            for path in &to_remove {
                tracked.remove(path);
            }
        }

        outcome
    }

    /// Delete every tracked file regardless of age. Used at shutdown.
    pub async fn drain_all(&self) -> SweepOutcome {
        let snapshot: Vec<PathBuf> = {
            let tracked = self.tracked.lock().await;
            tracked.keys().cloned().collect()
        };

        let mut outcome = SweepOutcome::default();

        for path in &snapshot {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Removed tracked file at drain");
                    outcome.deleted += 1;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    outcome.missing += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to remove tracked file at drain"
                    );
                    outcome.failed += 1;
                }
            }
        }

        {
            let mut tracked = self.tracked.lock().await;
            for path in &snapshot {
                tracked.remove(path);
            }
        }

        outcome
    }

    /// Rewind a tracked entry's creation instant, simulating age.
    #[cfg(test)]
    pub(crate) async fn backdate(&self, path: &Path, age: Duration) {
        let mut tracked = self.tracked.lock().await;
        if let Some(created_at) = tracked.get_mut(path) {
            if let Some(earlier) = Instant::now().checked_sub(age) {
                *created_at = earlier;
            }
        }
    }
}
