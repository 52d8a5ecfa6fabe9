mod context;
mod resolver;
mod side;

pub use context::MatchContext;
pub use resolver::{Confidence, LineupResolver, ResolvedLineups, parse_id_filter};
pub use side::{Side, SubDirection, resolve_side, sub_direction, timeout_side};
