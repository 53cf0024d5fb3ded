//! Bin command handler

use crate::config::Config;
use crate::coord::binning::{bin, GridSize};
use crate::coord::parse_numeric;
use crate::error::Result;
use clap::Args;

/// Bin command arguments
#[derive(Args)]
pub struct BinArgs {
    /// Latitude
    #[arg(allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude
    #[arg(allow_hyphen_values = true)]
    pub lng: String,

    /// Cell height in degrees (default from config, 0.01)
    #[arg(long, allow_hyphen_values = true)]
    pub grid_lat: Option<String>,

    /// Cell width in degrees (default from config, 0.01)
    #[arg(long, allow_hyphen_values = true)]
    pub grid_lng: Option<String>,
}

/// Compute the bin identifier, falling back to `defaults` for the grid
pub fn bin_id(args: &BinArgs, defaults: GridSize) -> Result<String> {
    let lat = parse_numeric("latitude", &args.lat)?;
    let lng = parse_numeric("longitude", &args.lng)?;
    let grid_lat = match &args.grid_lat {
        Some(text) => parse_numeric("grid_size_latitude", text)?,
        None => defaults.lat,
    };
    let grid_lng = match &args.grid_lng {
        Some(text) => parse_numeric("grid_size_longitude", text)?,
        None => defaults.lng,
    };

    Ok(bin(lat, lng, GridSize::new(grid_lat, grid_lng))?.to_string())
}

/// Run the bin command
pub fn run(args: BinArgs) -> Result<()> {
    let config = Config::load()?;
    println!("{}", bin_id(&args, config.grid())?);
    Ok(())
}
