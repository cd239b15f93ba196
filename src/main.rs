use clap::Parser;
use sage::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "sage", about = "Terminal coding assistant")]
struct Args {
    /// Backend base URL (overrides config file and SAGE_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger - stdout belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("sage.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config unusable ({e}), continuing with defaults");
        config::SageConfig::default()
    });
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!("Sage starting up, backend at {}", resolved.base_url);

    sage::tui::run(resolved)
}
