use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Reservoir map CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "watermap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the full map view to an SVG file
    Render(RenderArgs),

    /// Render one reservoir's detail panel to an SVG file
    Detail(DetailArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Province boundary geometry file (GeoJSON-like)
    #[arg(value_hint = ValueHint::FilePath)]
    pub boundary: PathBuf,

    /// Reservoir feature collection file
    #[arg(value_hint = ValueHint::FilePath)]
    pub reservoirs: PathBuf,

    /// Output SVG file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Optional JSON configuration file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<f64>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<f64>,

    /// Inset margin in pixels
    #[arg(long)]
    pub padding: Option<f64>,

    /// Map title
    #[arg(long)]
    pub title: Option<String>,

    /// Draw a name label above every marker
    #[arg(long)]
    pub labels: bool,

    /// Fixed bounds "minLon,minLat,maxLon,maxLat" (computed from the
    /// boundary if omitted)
    #[arg(long)]
    pub bounds: Option<String>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Reservoir feature collection file
    #[arg(value_hint = ValueHint::FilePath)]
    pub reservoirs: PathBuf,

    /// Name of the reservoir to render
    #[arg(short, long)]
    pub name: String,

    /// Reservoir shape geometry file for the thumbnail
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub shape: Option<PathBuf>,

    /// Output SVG file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}
