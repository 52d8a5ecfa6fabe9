use lasso::{Spur, ThreadedRodeo};
use std::sync::OnceLock;

/// Interned string key - 4 bytes instead of 24 for String.
///
/// Player names, team tricodes, and action labels repeat hundreds of
/// thousands of times across a season file; interning keeps the event
/// vectors compact.
pub type Sym = Spur;

/// Global string interner for play-by-play data.
static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();

/// Cached empty string key to avoid repeated lookups.
static EMPTY_SYM: OnceLock<Spur> = OnceLock::new();

/// Get the global interner (initializes on first call).
pub fn interner() -> &'static ThreadedRodeo {
    INTERNER.get_or_init(ThreadedRodeo::default)
}

/// Intern a string, returning a key.
pub fn intern(s: &str) -> Sym {
    interner().get_or_intern(s)
}

/// Returns the Sym for an empty string. Use this instead of Sym::default()
/// since Spur::default() collides with the first interned string.
#[inline]
pub fn empty_sym() -> Sym {
    *EMPTY_SYM.get_or_init(|| interner().get_or_intern(""))
}

/// Resolve an interned key back to a string.
pub fn resolve(key: Sym) -> &'static str {
    interner().resolve(&key)
}
