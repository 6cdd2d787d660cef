//! seat-server: HTTP front end for randomized seat assignment.
//!
//! Usage:
//!   seat-server
//!   seat-server --bind 0.0.0.0:8080 --save-dir ./saves
//!   seat-server --config seatdraw.json --seed 12345

mod routes;
mod views;

use anyhow::Result;
use log::info;
use seatdraw_core::config::ServerConfig;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = build_config(&args)?;

    info!("seat-server");
    info!("  bind:       {}", config.bind_addr);
    info!("  seed:       {:?}", config.seed);
    info!("  vote_limit: {}", config.vote_limit);

    let state = routes::AppState::from_config(&config)?;
    info!("  save_dir:   {}", state.store.dir().display());
    info!("  snapshots:  {}", state.store.snapshot_ids()?.len());
    let app = routes::router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Config file first (if any), then command-line overrides.
fn build_config(args: &[String]) -> Result<ServerConfig> {
    let mut config = match string_arg(args, "--config") {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = string_arg(args, "--bind") {
        config.bind_addr = bind.to_string();
    }
    if let Some(dir) = string_arg(args, "--save-dir") {
        config.save_dir = dir.into();
    }
    if let Some(seed) = parse_arg::<u64>(args, "--seed") {
        config.seed = Some(seed);
    }
    if let Some(limit) = parse_arg::<usize>(args, "--vote-limit") {
        config.vote_limit = limit;
    }
    Ok(config)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    string_arg(args, flag).and_then(|v| v.parse().ok())
}
