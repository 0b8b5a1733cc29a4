#![cfg(feature = "std")]

use crate::config::ClientConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal client for the Artillery game.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the game server, e.g. http://127.0.0.1:8000
    #[arg(long)]
    pub url: String,
    #[arg(long, default_value_t = 4.0, help = "Seconds between game state refreshes")]
    pub refresh_secs: f64,
    #[arg(long, help = "Give up on a request after this many seconds (default: wait forever)")]
    pub timeout_secs: Option<f64>,
    #[arg(long, default_value_t = 0.2, help = "Terminal cells per game unit")]
    pub scale: f64,
    #[arg(long, help = "Do not show the last server response")]
    pub hide_debug: bool,
    #[arg(long, help = "Write log records to this file (level from ARTILLERY_LOG)")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::new(&self.url);
        config.refresh_interval = Duration::try_from_secs_f64(self.refresh_secs)
            .map_err(|e| anyhow::anyhow!("--refresh-secs {}: {}", self.refresh_secs, e))?;
        config.request_timeout = self
            .timeout_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map_err(|e| anyhow::anyhow!("--timeout-secs {}: {}", secs, e))
            })
            .transpose()?;
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(anyhow::anyhow!("--scale must be a positive number, got {}", self.scale));
        }
        config.map_scale = self.scale;
        config.debug_panel = !self.hide_debug;
        Ok(config)
    }
}
