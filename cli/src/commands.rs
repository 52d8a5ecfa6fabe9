use std::path::{Path, PathBuf};
use std::sync::Arc;

use courtside_core::context::AppConfigExt;
use courtside_core::rotation::{HttpRotationProvider, RotationFetcher, RotationStore};
use courtside_core::storage;
use courtside_core::validate::SeasonSummary;
use courtside_core::{LogReader, StateWriter, reconstruct_season};

use crate::CliContext;

/// Reconstruct a season file into per-game parquet plus reports.
pub async fn reconstruct(path: &str, ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await.clone();
    let input = PathBuf::from(path);

    let season = LogReader::load_season(&input).map_err(|e| e.to_string())?;
    let store = RotationStore::new(&config.rotations_file);
    let book = store.load_book().map_err(|e| e.to_string())?;

    let output_dir =
        storage::ensure_dir(Path::new(&config.output_dir)).map_err(|e| e.to_string())?;
    let reports_dir =
        storage::ensure_dir(Path::new(&config.reports_dir)).map_err(|e| e.to_string())?;

    let timer = std::time::Instant::now();
    let outcomes = reconstruct_season(season, &book);

    let mut failed_games = 0usize;
    for outcome in &outcomes {
        let mut writer = StateWriter::new();
        writer.extend(outcome.states.iter().cloned());
        writer
            .write_to_file(&output_dir.join(storage::game_filename(&outcome.game_id)))
            .map_err(|e| e.to_string())?;
        storage::write_report(
            &reports_dir.join(storage::report_filename(&outcome.game_id)),
            &outcome.report,
        )
        .map_err(|e| e.to_string())?;
        if !outcome.report.passed() {
            failed_games += 1;
        }
    }

    let summary = SeasonSummary::from_reports(outcomes.iter().map(|o| &o.report));
    println!(
        "reconstructed {} games in {}ms ({} with failed checks)",
        outcomes.len(),
        timer.elapsed().as_millis(),
        failed_games
    );
    println!(
        "mean completeness {:.1}% | mean authoritative {:.1}%",
        summary.mean_completeness_pct, summary.mean_authoritative_pct
    );
    Ok(())
}

/// Re-run the validator over a season file and print per-game results.
pub async fn validate(path: &str, ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await.clone();
    let season = LogReader::load_season(Path::new(path)).map_err(|e| e.to_string())?;
    let book = RotationStore::new(&config.rotations_file)
        .load_book()
        .map_err(|e| e.to_string())?;

    let outcomes = reconstruct_season(season, &book);
    for outcome in &outcomes {
        let status = if outcome.report.passed() { "ok" } else { "FAIL" };
        println!(
            "{} [{}] complete {:.1}% authoritative {:.1}%",
            outcome.game_id,
            status,
            outcome.report.completeness_pct,
            outcome.report.authoritative_pct
        );
        for check in outcome.report.failed_checks() {
            println!("    {}: {}", check.name, check.detail);
        }
    }
    Ok(())
}

/// Fetch rotation intervals for every game of a season file, resuming past
/// anything already in the store.
pub async fn fetch_rotations(path: &str, ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await.clone();
    let season = LogReader::load_season(Path::new(path)).map_err(|e| e.to_string())?;
    let game_ids: Vec<String> = season.game_ids().iter().map(|s| s.to_string()).collect();

    let store = RotationStore::new(&config.rotations_file);
    let provider = HttpRotationProvider::new(&config.fetch).map_err(|e| e.to_string())?;
    let fetcher = RotationFetcher::new(config.fetch.clone(), store);

    let summary = fetcher
        .run(Arc::new(provider), &game_ids)
        .await
        .map_err(|e| e.to_string())?;
    println!(
        "fetched {} games ({} already stored, {} failed, {} rows appended)",
        summary.completed,
        summary.skipped_existing,
        summary.failed.len(),
        summary.rows_appended
    );
    for (game_id, reason) in summary.failed.iter().take(10) {
        println!("    {game_id}: {reason}");
    }
    Ok(())
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    println!("data_dir:       {}", config.data_dir);
    println!("rotations_file: {}", config.rotations_file);
    println!("output_dir:     {}", config.output_dir);
    println!("reports_dir:    {}", config.reports_dir);
    println!(
        "fetch:          {} workers, jitter {}-{}ms, save every {}",
        config.fetch.max_workers,
        config.fetch.jitter_min_ms,
        config.fetch.jitter_max_ms,
        config.fetch.save_interval
    );
}

pub async fn set_data_dir(path: &str, ctx: &CliContext) -> Result<(), String> {
    let mut config = ctx.config.write().await;
    *config = courtside_core::AppConfig::with_data_dir(path.to_string());
    config.clone().save().map_err(|e| e.to_string())?;
    println!("data directory set to {path}");
    Ok(())
}

pub fn exit() {
    println!("quitting...");
}
