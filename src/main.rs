// mem_throttle - Main entry point

use mem_throttle::config::{Args, Config};
use mem_throttle::daemon;
use std::process;

/// Setup logging based on configuration
fn setup_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();
}

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Initialize logging based on debug flag
    setup_logging(args.debug);

    // Create configuration from arguments
    let config = match Config::from_args(args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(1);
        }
    };

    // Run the governor
    if let Err(e) = daemon::run(config) {
        eprintln!("Fatal error: {e}");
        process::exit(1);
    }
}
