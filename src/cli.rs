use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::render::ChartKind;

/// Built-in HTML sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Virtual Wall USMC panel counts
    Usmc,
    /// National Archives Vietnam War casualty statistics
    Vietnam,
}

impl Preset {
    pub fn url(self) -> &'static str {
        match self {
            Preset::Usmc => "https://www.virtualwall.org/iPanels.htm#order",
            Preset::Vietnam => {
                "https://www.archives.gov/research/military/vietnam-war/casualty-statistics"
            }
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Preset::Usmc => "USMC Casualties",
            Preset::Vietnam => "U.S. Military Casualties (Vietnam War)",
        }
    }

    /// `#rrggbb` fill for the 2D bar chart.
    pub fn bar_color(self) -> &'static str {
        match self {
            Preset::Usmc => "#800000",
            Preset::Vietnam => "#000080",
        }
    }
}

/// Headless output format for `--print`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "casualty-charts")]
#[command(author, version, about = "Chart casualty tables from web pages or CSV files")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the normalized series instead of opening a window
    #[arg(
        long,
        value_enum,
        num_args = 0..=1,
        default_missing_value = "text",
        global = true
    )]
    pub print: Option<PrintFormat>,

    /// List rows that were dropped during extraction and normalization
    #[arg(long, global = true)]
    pub show_dropped: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch an HTML page and chart the first two columns of a table
    Html(HtmlArgs),

    /// Chart a two-column (timestamp, value) delimited file
    Csv(CsvArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct RenderArgs {
    /// Number of largest bars to mark in the 3D histogram
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Category count above which 3D tick labels are thinned
    #[arg(long)]
    pub label_threshold: Option<usize>,

    /// Chart title (overrides config and preset)
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Debug)]
pub struct HtmlArgs {
    /// Page URL (defaults to the preset's URL)
    #[arg(required_unless_present = "preset")]
    pub url: Option<String>,

    /// Use a built-in source
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// 0-based index of the table to read
    #[arg(long, default_value_t = 0)]
    pub table: usize,

    /// Chart to draw
    #[arg(long, value_enum, default_value = "bar")]
    pub chart: ChartKind,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Args, Debug)]
pub struct CsvArgs {
    /// Path to the delimited file
    #[arg(default_value = "casualty_data.csv")]
    pub path: PathBuf,

    /// Single-byte column delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Chart to draw
    #[arg(long, value_enum, default_value = "timeline")]
    pub chart: ChartKind,

    #[command(flatten)]
    pub render: RenderArgs,
}
