// mem_throttle - Process-tree memory governor library

pub mod config;
pub mod daemon;
pub mod enforcer;
pub mod monitor;
pub mod policy;
pub mod report;

// Re-export commonly used types
pub use config::Config;
pub use monitor::{ProcState, ProcessRecord, Snapshot};
pub use policy::{CycleDecision, Decision, DesiredState};
