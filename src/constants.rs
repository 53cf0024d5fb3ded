//! Centralized constants for the latlong-helper crate

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometres
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    pub const MIN_LATITUDE: f64 = -90.0;
    pub const MAX_LATITUDE: f64 = 90.0;
    pub const MIN_LONGITUDE: f64 = -180.0;
    pub const MAX_LONGITUDE: f64 = 180.0;
}

/// Binning constants
pub mod grid {
    /// Default cell size along each axis, in degrees
    pub const DEFAULT_GRID_SIZE: f64 = 0.01;

    /// Quotients this close to an integer (in cells) are treated as exact multiples
    pub const SNAP_EPSILON: f64 = 1e-9;

    /// Relative snap bound for large quotients, in units of `f64::EPSILON`
    pub const SNAP_ULPS: f64 = 4.0;

    /// Upper bound on decimal places used when cleaning up bin floors
    pub const MAX_DECIMALS: i32 = 12;
}

/// Heatmap rendering constants
pub mod plot {
    /// Default figure width in inches
    pub const DEFAULT_WIDTH: f64 = 10.0;

    /// Default figure height in inches
    pub const DEFAULT_HEIGHT: f64 = 6.0;

    /// Pixels per inch for raster-sized outputs (SVG)
    pub const DPI: f64 = 100.0;

    pub const TITLE: &str = "Geographic Bin Density Heatmap";
    pub const X_LABEL: &str = "Longitude Bins";
    pub const Y_LABEL: &str = "Latitude Bins";
    pub const COLORBAR_LABEL: &str = "Frequency";
}
