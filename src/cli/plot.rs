//! Plot command handler
//!
//! Reads bin identifiers (one per line) and renders a density heatmap.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::heatmap::{available_formats, get_renderer, plot};
use clap::Args;
use std::io::{self, BufRead, BufReader, Read};

/// Plot command arguments
#[derive(Args)]
pub struct PlotArgs {
    /// File of bin identifiers, one per line (stdin if omitted)
    pub input: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Figure width in inches
    #[arg(long)]
    pub width: Option<f64>,

    /// Figure height in inches
    #[arg(long)]
    pub height: Option<f64>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Collect non-blank, trimmed lines
pub fn read_identifiers<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            ids.push(line.to_string());
        }
    }
    Ok(ids)
}

/// Run the plot command
pub fn run(args: PlotArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let ids = match &args.input {
        Some(path) => read_identifiers(std::fs::File::open(path)?)?,
        None => read_identifiers(io::stdin().lock())?,
    };

    let format = args.format.unwrap_or(config.plot.format.clone());
    let renderer = get_renderer(&format).ok_or(Error::UnknownFormat(format))?;

    let heatmap = plot(
        &ids,
        args.width.unwrap_or(config.plot.width),
        args.height.unwrap_or(config.plot.height),
    )?;
    let output = renderer.render(&heatmap)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:5} - {}", format.name, format.description);
    }
}
