//! Default configuration values
//!
//! Named constants for all tunable parameters

pub use crate::constants::grid::DEFAULT_GRID_SIZE;
pub use crate::constants::plot::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Default heatmap output format
pub const DEFAULT_FORMAT: &str = "svg";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "latlong-helper";
