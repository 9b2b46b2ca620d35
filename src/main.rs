use clap::Parser;
use kodex::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "kodex", about = "Terminal browser for a legal-text library")]
struct Args {
    /// Base URL of the law library backend
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to kodex.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("kodex.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        config::KodexConfig::default()
    });
    let resolved = config::resolve(file_config, args.base_url);

    log::info!("Kodex starting up against {}", resolved.base_url);

    kodex::tui::run(resolved)
}
