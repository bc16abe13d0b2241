//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8787;

/// Default oracle per-call timeout in seconds
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 10;

/// Whether missing dataset files are downloaded automatically
pub const DEFAULT_AUTO_FETCH: bool = true;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "roam-point";

/// Dataset subdirectory under the XDG data dir
pub const DATASET_SUBDIR: &str = "maps";
