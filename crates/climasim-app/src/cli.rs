use climasim_common::IssueKind;
use clap::Parser;

/// ClimaSim: an interactive procedural globe showing climate change.
#[derive(Parser, Debug)]
#[command(name = "climasim", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (e.g. debug, climasim=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Year to show at startup (1900-2100).
    #[arg(long)]
    pub year: Option<i32>,

    /// Climate issue to apply at startup.
    #[arg(long)]
    pub issue: Option<IssueKind>,

    /// Intensity of `--issue`, 0.0 to 1.0.
    #[arg(long, requires = "issue")]
    pub intensity: Option<f32>,

    /// Run this many frames without a window, then exit.
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u32>,
}

pub fn parse() -> Args {
    Args::parse()
}
