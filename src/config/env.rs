// Environment variable configuration support

use super::Config;
use anyhow::Result;
use std::env;
use std::time::Duration;

/// Apply environment variable overrides to configuration
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Ok(val) = env::var("MEM_THROTTLE_PID") {
        config.root_pid = val.parse()?;
    }

    if let Ok(val) = env::var("MEM_THROTTLE_VSZ_LIMIT_MB") {
        let mb: u64 = val.parse()?;
        config.vsz_limit_bytes = mb * 1024 * 1024;
    }

    if let Ok(val) = env::var("MEM_THROTTLE_INTERVAL_MS") {
        config.scan_interval = Duration::from_millis(val.parse()?);
    }

    if let Ok(val) = env::var("MEM_THROTTLE_DRY_RUN") {
        config.dry_run = parse_bool(&val)?;
    }
    if let Ok(val) = env::var("MEM_THROTTLE_DEBUG") {
        config.debug = parse_bool(&val)?;
    }

    Ok(config)
}

/// Parse boolean value from string
/// Accepts: true/false, 1/0, yes/no, on/off (case-insensitive)
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid boolean value: {}", s),
    }
}
