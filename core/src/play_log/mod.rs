mod error;
mod parser;
mod play_event;
mod reader;

pub use error::ReaderError;
pub use parser::{EventParser, RawRow};
pub use play_event::{EventKind, PlayEvent, ShotResult, StatDeltas};
pub use reader::{LogReader, SeasonLog};
