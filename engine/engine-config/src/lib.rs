//! Centralized configuration loading from config.toml.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`WARGAME_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (`config.defaults.toml`, embedded at compile time)
//!
//! Command-line flags in the binary sit above all of these.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! WARGAME_<SECTION>_<KEY>=value
//!
//! Examples:
//!     WARGAME_COMMON_LOG_LEVEL=debug
//!     WARGAME_GAME_MAX_TURNS=50
//!     WARGAME_SEARCH_MAX_TIME=2.5
//!     WARGAME_SEARCH_SEED=42
//!     WARGAME_GAME_BROKER=http://localhost:8001/test
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
