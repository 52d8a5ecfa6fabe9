mod config;
mod interner;

pub use config::{AppConfig, AppConfigExt, FetchSettings};
pub use interner::{Sym, empty_sym, intern, interner, resolve};
