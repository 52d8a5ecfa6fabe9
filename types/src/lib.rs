//! Shared configuration types for Courtside
//!
//! This crate contains serializable configuration types that are shared
//! between the core library and the CLI, kept free of any logic so both
//! sides agree on the on-disk config schema.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Acquisition Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Tuning for the rotation-interval fetcher.
///
/// The remote statistics provider rate-limits aggressively, so the defaults
/// are conservative: few workers, randomized inter-request delay, frequent
/// incremental saves so an interrupted run loses little work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Maximum number of in-flight requests.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// Lower bound of the random per-request delay, in milliseconds.
    #[serde(default = "default_jitter_min_ms")]
    pub jitter_min_ms: u64,
    /// Upper bound of the random per-request delay, in milliseconds.
    #[serde(default = "default_jitter_max_ms")]
    pub jitter_max_ms: u64,
    /// Flush fetched intervals to the store every this many completed games.
    #[serde(default = "default_save_interval")]
    pub save_interval: usize,
    /// Per-request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_max_workers() -> usize {
    4
}
fn default_jitter_min_ms() -> u64 {
    500
}
fn default_jitter_max_ms() -> u64 {
    1200
}
fn default_save_interval() -> usize {
    20
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            jitter_min_ms: default_jitter_min_ms(),
            jitter_max_ms: default_jitter_max_ms(),
            save_interval: default_save_interval(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Config
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level persisted configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the raw season play-by-play files.
    #[serde(default)]
    pub data_dir: String,
    /// Path of the incremental rotation-interval store (CSV, append-only).
    #[serde(default)]
    pub rotations_file: String,
    /// Directory reconstructed per-game parquet files are written to.
    #[serde(default)]
    pub output_dir: String,
    /// Directory validation reports are written to.
    #[serde(default)]
    pub reports_dir: String,
    #[serde(default)]
    pub fetch: FetchSettings,
}

impl AppConfig {
    /// Build a config rooted at a data directory, with the conventional
    /// layout underneath it.
    pub fn with_data_dir(data_dir: String) -> Self {
        let join = |sub: &str| {
            if data_dir.is_empty() {
                sub.to_string()
            } else {
                format!("{}/{}", data_dir.trim_end_matches('/'), sub)
            }
        };
        Self {
            rotations_file: join("rotations.csv"),
            output_dir: join("reconstructed"),
            reports_dir: join("reports"),
            data_dir,
            fetch: FetchSettings::default(),
        }
    }
}
