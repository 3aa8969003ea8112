// Per-cycle log output

use crate::policy::{CycleDecision, Decision};

const fn to_mb(bytes: u64) -> u64 {
    bytes / 1024 / 1024
}

fn process_line(decision: &Decision) -> String {
    let r = &decision.record;
    format!(
        "{} {} {} {} {} {}",
        r.start_time,
        r.pid,
        r.state,
        r.comm,
        to_mb(r.vsz_bytes),
        to_mb(r.rss_bytes)
    )
}

fn managed_summary(cycle: &CycleDecision) -> String {
    format!(
        "Managed VSZ: {}M RSS: {}M Procs: {} (Stopped: {} Running: {})",
        to_mb(cycle.managed_vsz_bytes),
        to_mb(cycle.managed_rss_bytes),
        cycle.managed_running + cycle.managed_stopped,
        cycle.managed_stopped,
        cycle.managed_running
    )
}

fn unmanaged_summary(cycle: &CycleDecision) -> String {
    format!(
        "Unmanaged VSZ: {}M RSS: {}M Procs: {}",
        to_mb(cycle.unmanaged_vsz_bytes),
        to_mb(cycle.unmanaged_rss_bytes),
        cycle.unmanaged_count
    )
}

/// Log one line per managed process in admission order, then the two
/// aggregate lines. Pure observability - nothing here feeds back into the
/// control loop.
pub fn report_cycle(cycle: &CycleDecision) {
    for decision in &cycle.managed {
        log::info!("{}", process_line(decision));
    }
    log::info!("{}", managed_summary(cycle));
    log::info!("{}", unmanaged_summary(cycle));
}
