//! Distance command handler

use crate::coord::distance::haversine_km;
use crate::coord::parse_numeric;
use crate::error::Result;
use clap::Args;

/// Distance command arguments
///
/// Values are taken as text so a non-number reports "must be numeric".
#[derive(Args)]
pub struct DistanceArgs {
    /// Latitude of the first point
    #[arg(allow_hyphen_values = true)]
    pub lat1: String,

    /// Longitude of the first point
    #[arg(allow_hyphen_values = true)]
    pub lon1: String,

    /// Latitude of the second point
    #[arg(allow_hyphen_values = true)]
    pub lat2: String,

    /// Longitude of the second point
    #[arg(allow_hyphen_values = true)]
    pub lon2: String,
}

/// Compute the distance, formatted in km with two decimals
pub fn distance(args: &DistanceArgs) -> Result<String> {
    let lat1 = parse_numeric("latitude_1", &args.lat1)?;
    let lon1 = parse_numeric("longitude_1", &args.lon1)?;
    let lat2 = parse_numeric("latitude_2", &args.lat2)?;
    let lon2 = parse_numeric("longitude_2", &args.lon2)?;

    let km = haversine_km(lat1, lon1, lat2, lon2)?;
    Ok(format!("{:.2} km", km))
}

/// Run the distance command
pub fn run(args: DistanceArgs) -> Result<()> {
    println!("{}", distance(&args)?);
    Ok(())
}
