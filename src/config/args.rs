// Command-line argument parsing

use clap::Parser;

/// mem_throttle - Process-tree memory governor
///
/// Tracks the process tree rooted at a given PID and keeps the aggregate
/// virtual memory of whitelisted compiler/linker processes under a budget
/// by suspending (SIGSTOP) and resuming (SIGCONT) them.
#[derive(Parser, Debug)]
#[command(name = "mem-throttle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Memory-budget admission controller for a process tree", long_about = None)]
pub struct Args {
    /// PID of the top-level process of the tree to track
    #[arg(short = 'p', long = "pid", value_name = "PID")]
    pub pid: i32,

    /// VSZ budget for non-stopped whitelisted processes, in MiB (default: 1024)
    #[arg(short = 'l', long = "vsz-limit-mb", value_name = "MB")]
    pub vsz_limit_mb: Option<u64>,

    /// Interval between consecutive procfs scans, in milliseconds (default: 250)
    #[arg(short = 'i', long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Dry run mode - decide and log, but send no signals
    #[arg(long = "dryrun")]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

impl Args {
    /// Parse arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
