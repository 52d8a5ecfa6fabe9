pub mod context;
pub mod fatigue;
pub mod game_data;
pub mod inventory;
pub mod lineup;
pub mod play_log;
pub mod possession;
pub mod reconstruct;
pub mod rotation;
pub mod storage;
pub mod timeline;
pub mod validate;

// Re-exports for convenience
pub use context::{AppConfig, AppConfigExt, FetchSettings};
pub use fatigue::{FatigueState, FatigueTracker};
pub use inventory::{InventoryEngine, InventorySnapshot, StatTotals, TeamInventory};
pub use lineup::{Confidence, LineupResolver, MatchContext, ResolvedLineups, Side};
pub use play_log::{EventKind, LogReader, PlayEvent, ReaderError, SeasonLog, ShotResult};
pub use possession::{PhaseState, PossessionTracker};
pub use reconstruct::{GameOutcome, ResolvedState, reconstruct_game, reconstruct_season};
pub use rotation::{
    FetchSummary, HttpRotationProvider, RotationBook, RotationFetcher, RotationProvider,
    RotationStore,
};
pub use storage::{StateWriter, StorageError};
pub use validate::{CheckResult, GameReport, SeasonSummary, run_checks};
