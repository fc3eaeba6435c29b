use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use regimen::api::RestClient;
use regimen::core::config;
use regimen::tui;

#[derive(Parser)]
#[command(name = "regimen", about = "Terminal client for managing training programs")]
struct Args {
    /// Backend base URL (overrides config file and REGIMEN_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to regimen.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("regimen.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("regimen: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!("Regimen starting up against {}", resolved.base_url);

    let api = Arc::new(RestClient::new(resolved.base_url));
    tui::run(api)
}
