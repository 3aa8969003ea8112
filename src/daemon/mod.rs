// Daemon module - main governor loop

mod service;

pub use service::GovernorService;

use crate::config::Config;
use anyhow::Result;

/// Run the governor with the given configuration
pub fn run(config: Config) -> Result<()> {
    let mut service = GovernorService::new(config);
    service.run()
}
