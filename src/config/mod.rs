// Configuration module

mod args;
mod env;

pub use args::Args;
use anyhow::{bail, Result};
use std::collections::HashSet;
use std::time::Duration;

/// Command names eligible for suspension. These are the memory-heavy
/// stages of a C/C++ toolchain; everything else in the tree is measured
/// but never signaled.
pub const DEFAULT_WHITELIST: &[&str] = &["cc1plus", "cc1", "as", "ld"];

const MB: u64 = 1024 * 1024;

/// Main configuration for the governor
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the tracked process tree
    pub root_pid: i32,

    /// Aggregate VSZ budget for whitelisted descendants, in bytes
    pub vsz_limit_bytes: u64,

    /// Sleep between consecutive scan cycles
    pub scan_interval: Duration,

    /// Command names eligible for suspend/resume
    pub whitelist: HashSet<String>,

    // Behavior flags
    pub dry_run: bool,
    pub debug: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = Self {
            root_pid: args.pid,
            ..Self::default()
        };

        if let Some(limit_mb) = args.vsz_limit_mb {
            config.vsz_limit_bytes = limit_mb * MB;
        }
        if let Some(ms) = args.interval_ms {
            config.scan_interval = Duration::from_millis(ms);
        }

        config.dry_run = args.dry_run;
        config.debug = args.debug;

        // Apply environment variable overrides
        config = env::apply_env_overrides(config)?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Budget in MiB, for display only
    pub const fn vsz_limit_mb(&self) -> u64 {
        self.vsz_limit_bytes / MB
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.root_pid <= 0 {
            bail!("pid must be a positive process ID, got {}", self.root_pid);
        }
        if self.vsz_limit_bytes == 0 {
            bail!("vsz-limit-mb must be greater than zero");
        }
        if self.scan_interval.is_zero() {
            bail!("interval-ms must be greater than zero");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_pid: 0,
            vsz_limit_bytes: 1024 * MB, // 1 GiB budget
            scan_interval: Duration::from_millis(250),
            whitelist: DEFAULT_WHITELIST.iter().map(ToString::to_string).collect(),
            dry_run: false,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            pid: 100,
            vsz_limit_mb: None,
            interval_ms: None,
            dry_run: false,
            debug: false,
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(base_args()).unwrap();
        assert_eq!(config.root_pid, 100);
        assert_eq!(config.vsz_limit_bytes, 1024 * MB);
        assert_eq!(config.scan_interval, Duration::from_millis(250));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_limit_converted_to_bytes() {
        let mut args = base_args();
        args.vsz_limit_mb = Some(2048);
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.vsz_limit_bytes, 2048 * MB);
        assert_eq!(config.vsz_limit_mb(), 2048);
    }

    #[test]
    fn test_interval_converted() {
        let mut args = base_args();
        args.interval_ms = Some(500);
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.scan_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_nonpositive_pid() {
        let mut args = base_args();
        args.pid = 0;
        assert!(Config::from_args(args).is_err());

        let mut args = base_args();
        args.pid = -5;
        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn test_rejects_zero_limit() {
        let mut args = base_args();
        args.vsz_limit_mb = Some(0);
        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let mut args = base_args();
        args.interval_ms = Some(0);
        assert!(Config::from_args(args).is_err());
    }

    #[test]
    fn test_default_whitelist() {
        let config = Config::default();
        for name in ["cc1plus", "cc1", "as", "ld"] {
            assert!(config.whitelist.contains(name));
        }
        assert!(!config.whitelist.contains("make"));
    }
}
