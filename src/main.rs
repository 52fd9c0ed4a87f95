//! Command line front end: decimate a saved history payload and print the result as JSON

use anyhow::Context;
use clap::Parser;
use history_decimator::constants::config::CONFIG_FILE;
use history_decimator::display::PointsBadge;
use history_decimator::{
    Clock, DecimationPipeline, FixedClock, HistoryView, HistoryWindow, PipelineConfig, SystemClock,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "history-decimator", version, about = "Prepare sensor history for charting")]
struct Cli {
    /// History payload (JSON) as served by the thermostat
    file: PathBuf,
    /// Trailing window in hours (defaults to the config value)
    #[arg(long)]
    hours: Option<u32>,
    /// Unix time to treat as "now"
    #[arg(long, conflicts_with = "replay")]
    now: Option<i64>,
    /// Use the newest sample's timestamp as "now"
    #[arg(long)]
    replay: bool,
    /// Pipeline config file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,history_decimator=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        puffin::set_scopes_on(true);
        puffin_http::Server::new(&format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT))
            .context("starting puffin server")?
    };

    let cli = Cli::parse();
    let config = PipelineConfig::load_or_default(&cli.config);
    let hours = cli.hours.unwrap_or(config.default_hours);

    let window = HistoryWindow::load(&cli.file)
        .with_context(|| format!("loading history from {}", cli.file.display()))?;

    let now = match (cli.now, cli.replay) {
        (Some(now), _) => now,
        (None, true) => window
            .time_span()
            .map(|(_, newest)| newest)
            .unwrap_or_else(|| SystemClock.now_secs()),
        (None, false) => SystemClock.now_secs(),
    };

    let pipeline = DecimationPipeline::from_config(&config);
    let view = pipeline.run_with_clock(&window, hours, &FixedClock(now))?;
    profiling::finish_frame!();

    match &view {
        HistoryView::Ready(result) => {
            tracing::info!("{}", PointsBadge::from(result.as_ref()));
        }
        HistoryView::NoData { hours } => {
            tracing::info!("{}h time range has no data points yet", hours);
        }
        HistoryView::Loading => {}
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{}", json);
    Ok(())
}
