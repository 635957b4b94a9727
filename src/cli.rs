use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "listing_map")]
#[command(about = "Keep map markers, listing cards and the boundary in sync with the viewport and filters")]
pub struct Cli {
    /// Page HTML holding `#location-data .location` records and `.property-card` elements
    pub listings: PathBuf,

    /// Page URL whose `category` and `price` query parameters seed the filters
    #[arg(long)]
    pub url: Option<String>,

    /// Trigger script, one JSON event per line (defaults to stdin)
    #[arg(long)]
    pub triggers: Option<PathBuf>,
}
