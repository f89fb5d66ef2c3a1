//! hue-toggle server binary.
//!
//! Loads the JSON configuration, connects to the bridge, and serves the
//! toggle endpoints until the process is stopped.

use clap::Parser;
use log::error;

use hue_toggle_rs::{Config, Error, HueClient, LightingService, server};

#[derive(Parser, Debug)]
#[command(name = "hue-toggle", version, about = "HTTP toggle server for Philips Hue lights")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json", env = "HUE_TOGGLE_CONFIG")]
    config: String,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(&args.config).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(config_path: &str) -> Result<(), Error> {
    let config = Config::load(config_path)?;
    let client = HueClient::connect(&config).await?;
    let service = LightingService::new(client, config.restore_previous_light_state);
    server::serve(service, config.port()).await
}
