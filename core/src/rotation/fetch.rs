//! Resumable, rate-limited rotation acquisition.
//!
//! Bounded worker count plus randomized inter-request delay keeps the
//! provider's rate limiter quiet; already-persisted games are skipped so an
//! interrupted session picks up where it left off. A single game's failure
//! is recorded in the summary, never fatal.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::Semaphore;

use super::error::{FetchError, RotationError};
use super::interval::RotationRow;
use super::provider::RotationProvider;
use super::store::RotationStore;
use crate::context::FetchSettings;

/// What one acquisition session did.
#[derive(Debug, Default)]
pub struct FetchSummary {
    pub requested: usize,
    pub skipped_existing: usize,
    pub completed: usize,
    pub rows_appended: usize,
    /// (game id, reason) per failed game.
    pub failed: Vec<(String, String)>,
}

pub struct RotationFetcher {
    settings: FetchSettings,
    store: RotationStore,
}

impl RotationFetcher {
    pub fn new(settings: FetchSettings, store: RotationStore) -> Self {
        Self { settings, store }
    }

    /// Fetch every game not already in the store, appending incrementally
    /// every `save_interval` completions.
    pub async fn run<P: RotationProvider>(
        &self,
        provider: Arc<P>,
        game_ids: &[String],
    ) -> Result<FetchSummary, RotationError> {
        let existing = self.store.existing_game_ids()?;
        let mut seen = hashbrown::HashSet::new();
        let pending: Vec<String> = game_ids
            .iter()
            .filter(|id| !existing.contains(*id) && seen.insert((*id).clone()))
            .cloned()
            .collect();

        let mut summary = FetchSummary {
            requested: game_ids.len(),
            skipped_existing: game_ids.len() - pending.len(),
            ..FetchSummary::default()
        };
        tracing::info!(
            requested = summary.requested,
            already_stored = summary.skipped_existing,
            pending = pending.len(),
            "starting rotation acquisition"
        );
        if pending.is_empty() {
            return Ok(summary);
        }

        let semaphore = Arc::new(Semaphore::new(self.settings.max_workers.max(1)));
        let (jitter_min, jitter_max) = (self.settings.jitter_min_ms, self.settings.jitter_max_ms);

        let mut handles = Vec::with_capacity(pending.len());
        for game_id in pending {
            let semaphore = Arc::clone(&semaphore);
            let provider = Arc::clone(&provider);
            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (game_id, Err(FetchError::WorkerPool)),
                };
                let delay = jitter_ms(jitter_min, jitter_max);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                let result = provider.fetch_game(&game_id).await;
                (game_id, result)
            }));
        }

        let save_interval = self.settings.save_interval.max(1);
        let mut batch: Vec<RotationRow> = Vec::new();
        for handle in handles {
            let (game_id, result) = match handle.await {
                Ok(output) => output,
                Err(e) => {
                    summary.failed.push(("<worker>".to_string(), e.to_string()));
                    continue;
                }
            };
            summary.completed += 1;
            match result {
                Ok(rows) if rows.is_empty() => {
                    tracing::debug!(game = %game_id, "provider returned no rotation rows");
                    summary.failed.push((game_id, "empty rotation".to_string()));
                }
                Ok(rows) => batch.extend(rows),
                Err(e) => {
                    tracing::warn!(game = %game_id, error = %e, "rotation fetch failed; skipping");
                    summary.failed.push((game_id, e.to_string()));
                }
            }
            if summary.completed % save_interval == 0 && !batch.is_empty() {
                summary.rows_appended += batch.len();
                self.store.append(&batch)?;
                batch.clear();
            }
        }

        if !batch.is_empty() {
            summary.rows_appended += batch.len();
            self.store.append(&batch)?;
        }

        tracing::info!(
            completed = summary.completed,
            failed = summary.failed.len(),
            rows = summary.rows_appended,
            "rotation acquisition finished"
        );
        Ok(summary)
    }
}

/// Random delay in [min, max]; rng is scoped so the future stays Send.
fn jitter_ms(min: u64, max: u64) -> u64 {
    if max <= min {
        min
    } else {
        rand::thread_rng().gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::Side;

    /// Provider fixture: canned rows per game, errors for the rest.
    struct FixtureProvider;

    impl RotationProvider for FixtureProvider {
        async fn fetch_game(&self, game_id: &str) -> Result<Vec<RotationRow>, FetchError> {
            if game_id == "bad" {
                return Err(FetchError::MalformedResponse {
                    game_id: game_id.to_string(),
                    column: "PERSON_ID".to_string(),
                });
            }
            Ok(vec![RotationRow {
                game_id: game_id.to_string(),
                side: Side::Home,
                player_id: 7,
                in_time_real: 0.0,
                out_time_real: 7200.0,
            }])
        }
    }

    fn settings() -> FetchSettings {
        FetchSettings {
            max_workers: 2,
            jitter_min_ms: 0,
            jitter_max_ms: 0,
            save_interval: 1,
            request_timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn failures_are_recorded_and_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = RotationStore::new(dir.path().join("rotations.csv"));
        let fetcher = RotationFetcher::new(settings(), store);

        let ids = vec!["a".to_string(), "bad".to_string(), "b".to_string()];
        let summary = fetcher
            .run(Arc::new(FixtureProvider), &ids)
            .await
            .unwrap();

        assert_eq!(summary.requested, 3);
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "bad");
        assert_eq!(summary.rows_appended, 2);
    }

    #[tokio::test]
    async fn rerun_resumes_instead_of_refetching() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotations.csv");

        let fetcher = RotationFetcher::new(settings(), RotationStore::new(path.clone()));
        let ids = vec!["a".to_string(), "b".to_string()];
        fetcher.run(Arc::new(FixtureProvider), &ids).await.unwrap();

        let fetcher = RotationFetcher::new(settings(), RotationStore::new(path.clone()));
        let summary = fetcher.run(Arc::new(FixtureProvider), &ids).await.unwrap();
        assert_eq!(summary.skipped_existing, 2);
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.rows_appended, 0);

        // nothing was double-appended
        let store = RotationStore::new(path);
        let book = store.load_book().unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.get("a").unwrap().on_court(Side::Home, 10.0), vec![7]);
    }
}
