mod app;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod render;
mod report;
mod state;
mod theme;
mod ui;

use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use app::ChartApp;
use clap::Parser;
use cli::{Cli, Commands, CsvArgs, HtmlArgs, RenderArgs};
use config::Config;
use data::delimited::DelimitedFileSource;
use data::fetch::ReqwestClient;
use data::html::HtmlTableSource;
use data::source::RowSource;
use eframe::egui;
use pipeline::Outcome;
use render::{ChartKind, RenderSpec};
use state::AppState;

const HTML_NO_DATA: &str = "No data found or unable to parse the table.";
const CSV_TITLE: &str = "U.S. Military Casualties Over Time";

/// Everything needed for one fetch → normalize → render run.
struct Prepared {
    source: Box<dyn RowSource>,
    spec: RenderSpec,
    chart: ChartKind,
    no_data_notice: &'static str,
}

fn apply_render_args(spec: &mut RenderSpec, args: &RenderArgs) {
    if let Some(title) = &args.title {
        spec.title.clone_from(title);
    }
    if let Some(n) = args.top_n {
        spec.histogram.top_n = n;
    }
    if let Some(threshold) = args.label_threshold {
        spec.histogram.label_threshold = threshold;
    }
}

fn prepare_html(args: &HtmlArgs, config: &Config) -> Result<Prepared> {
    let url = match (&args.url, args.preset) {
        (Some(url), _) => url.clone(),
        (None, Some(preset)) => preset.url().to_string(),
        (None, None) => bail!("either a URL or --preset is required"),
    };

    let mut spec = RenderSpec::categorical(args.preset.map_or("Casualties", |p| p.title()));
    if let Some(color) = args.preset.and_then(|p| theme::parse_hex(p.bar_color())) {
        spec.theme.bar = color;
    }
    config.apply(&mut spec);
    apply_render_args(&mut spec, &args.render);

    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.fetch.timeout_secs));
    let source = HtmlTableSource::new(url, ReqwestClient::new(timeout)).with_table_index(args.table);

    Ok(Prepared {
        source: Box::new(source),
        spec,
        chart: args.chart,
        no_data_notice: HTML_NO_DATA,
    })
}

fn prepare_csv(args: &CsvArgs, config: &Config) -> Result<Prepared> {
    let Ok(delimiter) = u8::try_from(args.delimiter) else {
        bail!("delimiter must be a single-byte character, got '{}'", args.delimiter);
    };

    let mut spec = RenderSpec::temporal(CSV_TITLE);
    spec.theme.bar = spec.theme.line;
    config.apply(&mut spec);
    apply_render_args(&mut spec, &args.render);

    let source = DelimitedFileSource::new(&args.path).with_delimiter(delimiter);

    Ok(Prepared {
        source: Box::new(source),
        spec,
        chart: args.chart,
        no_data_notice: ui::panels::CSV_NO_DATA,
    })
}

fn show_window(state: AppState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = state.spec.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(ChartApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to open chart window: {e}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).context("loading configuration")?,
        None => Config::default(),
    };

    let prepared = match &cli.command {
        Commands::Html(args) => prepare_html(args, &config)?,
        Commands::Csv(args) => prepare_csv(args, &config)?,
    };

    let locator = prepared.source.describe();
    let outcome = pipeline::run(prepared.source.as_ref()).map_err(|e| {
        log::error!("Source unavailable: {e}");
        e
    });
    let outcome = outcome.with_context(|| format!("reading {locator}"))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match outcome {
        Outcome::NoData { diagnostics } => {
            writeln!(out, "{}", prepared.no_data_notice)?;
            if cli.show_dropped {
                report::write_dropped(&mut out, &diagnostics)?;
            }
            Ok(())
        }
        Outcome::Ready { series, diagnostics } => {
            if let Some(format) = cli.print {
                let dropped = cli.show_dropped.then_some(&diagnostics);
                return report::write_series(&mut out, &series, dropped, format);
            }
            if cli.show_dropped {
                report::write_dropped(&mut out, &diagnostics)?;
            }
            drop(out);

            let state = AppState::new(locator, series, diagnostics, prepared.chart, prepared.spec)
                .with_theme_overrides(config.theme.clone());
            show_window(state)
        }
    }
}
