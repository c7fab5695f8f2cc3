use advisor::core::config::{self, AdvisorConfig, CliOverrides};
use advisor::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "advisor", about = "Mental-wellness coaching dashboard")]
struct Args {
    /// Config file to use instead of ~/.advisor/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Default session length in minutes (5-60, steps of 5)
    #[arg(short, long)]
    duration: Option<u32>,

    /// Disable the confetti burst on completed tasks
    #[arg(long)]
    no_celebrate: bool,

    /// Log level written to advisor.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to advisor.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("advisor.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path, false),
        None => config::load_config(),
    };
    let file_config = loaded.unwrap_or_else(|e| {
        eprintln!("Warning: {e}. Using default settings.");
        log::warn!("Config load failed: {}", e);
        AdvisorConfig::default()
    });

    let cli = CliOverrides {
        duration: args.duration,
        no_celebrate: args.no_celebrate,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Advisor starting up (duration: {} min, celebrate: {})",
        resolved.default_duration.minutes(),
        resolved.celebrate
    );

    tui::run(resolved)
}
