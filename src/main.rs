use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use datatable_tui::config::Settings;
use datatable_tui::ui::app::{TableData, TuiApp};

#[derive(Parser, Debug)]
#[command(name = "datatable-tui")]
#[command(about = "Sortable, filterable data table in the terminal")]
#[command(version)]
struct Args {
    /// JSON file with {"columns": [...], "rows": [[...], ...]}
    #[arg(short, long)]
    data: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log file path (the terminal belongs to the UI)
    #[arg(short, long)]
    log_file: Option<String>,
}

fn init_logging(path: &str, default_level: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_data(path: &str) -> Result<TableData> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading data file {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("parsing data file {}", path))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load settings
    let settings = Settings::load(args.config.as_deref())?;

    let log_file = args.log_file.as_deref().unwrap_or(&settings.log_file);
    init_logging(log_file, &settings.log_level)?;

    let data = match args.data.as_deref().or(settings.data_path.as_deref()) {
        Some(path) => load_data(path)?,
        None => TableData::sample(),
    };
    tracing::info!(
        columns = data.columns.len(),
        rows = data.rows.len(),
        "starting data table"
    );

    // Run TUI (blocks until user quits)
    let mut tui = TuiApp::new(&settings, data)?;
    let result = tui.run();
    drop(tui);

    if let Err(e) = &result {
        tracing::error!("table failed: {:#}", e);
    }
    result
}
