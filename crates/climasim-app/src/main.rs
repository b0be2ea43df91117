mod app_state;
mod camera;
mod cli;
mod headless;
mod input;
mod startup;

use climasim_common::{ClimaSimError, Result};
use climasim_config::ClimaSimConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use startup::StartupClimate;

const DEFAULT_DIRECTIVE: &str = "climasim=info";

/// A bare level from config applies to our crates only.
fn log_directive(args: &cli::Args, config: Option<&ClimaSimConfig>) -> String {
    if let Some(level) = &args.log_level {
        return level.clone();
    }
    match config.map(|c| c.logging.level.trim()) {
        Some(level) if level.contains('=') => level.to_string(),
        Some(level) if !level.is_empty() => format!("climasim={level}"),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

fn main() {
    let args = cli::parse();

    let loaded = match &args.config {
        Some(path) => climasim_config::load_config_from(std::path::Path::new(path)),
        None => climasim_config::load_config(),
    };

    let directive = log_directive(&args, loaded.as_ref().ok());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::info!("ClimaSim v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        ClimaSimConfig::default()
    });
    tracing::info!(
        "Config loaded (detail: {:?}, start year: {})",
        config.globe.detail,
        config.climate.start_year
    );

    let start = StartupClimate::resolve(&args, &config);

    if let Err(e) = run(config, start, args.headless) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

fn run(config: ClimaSimConfig, start: StartupClimate, headless: Option<u32>) -> Result<()> {
    if let Some(frames) = headless {
        let report = headless::run(&config, &start, frames)
            .map_err(|e| ClimaSimError::Renderer(e.to_string()))?;
        tracing::info!("Headless run finished: {report}");
        return Ok(());
    }

    let event_loop = EventLoop::new().map_err(|e| ClimaSimError::EventLoop(e.to_string()))?;
    let mut app = app_state::ClimaSimApp::new(config, start);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| ClimaSimError::EventLoop(e.to_string()))
}
