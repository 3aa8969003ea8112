// Budget admission over the managed subset of a process tree

use crate::monitor::{ProcessRecord, Snapshot};
use std::collections::HashSet;

/// What the governor wants a managed process to be doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredState {
    Run,
    Suspend,
}

/// One managed process with the state the policy assigned to it
#[derive(Debug, Clone)]
pub struct Decision {
    pub record: ProcessRecord,
    pub desired: DesiredState,
}

/// Full outcome of one policy pass over a descendant set
#[derive(Debug, Clone, Default)]
pub struct CycleDecision {
    /// Managed processes in admission order (start time, then pid)
    pub managed: Vec<Decision>,
    pub managed_vsz_bytes: u64,
    pub managed_rss_bytes: u64,
    /// Split of the managed set by *observed* run state
    pub managed_running: usize,
    pub managed_stopped: usize,
    pub unmanaged_count: usize,
    pub unmanaged_vsz_bytes: u64,
    pub unmanaged_rss_bytes: u64,
}

/// Partition the descendants into managed (whitelisted) and unmanaged
/// records, order the managed set by (start time, pid), and assign each
/// managed process a desired state under the VSZ budget.
///
/// The walk accumulates every managed record's VSZ before comparing, so a
/// process slated for suspension still counts toward the budget it helped
/// exceed. The earliest-started process is never suspended: with every
/// whitelisted process stopped nothing would exit and free memory, so the
/// head of the order always keeps running even when it exceeds the budget
/// on its own.
pub fn decide(
    snapshot: &Snapshot,
    descendant_set: &HashSet<i32>,
    whitelist: &HashSet<String>,
    vsz_limit_bytes: u64,
) -> CycleDecision {
    let mut out = CycleDecision::default();
    let mut managed: Vec<ProcessRecord> = Vec::new();

    for &pid in descendant_set {
        let Some(record) = snapshot.get(pid) else {
            continue;
        };
        if whitelist.contains(&record.comm) {
            if record.state.is_stopped() {
                out.managed_stopped += 1;
            } else {
                out.managed_running += 1;
            }
            managed.push(record.clone());
        } else {
            out.unmanaged_count += 1;
            out.unmanaged_vsz_bytes += record.vsz_bytes;
            out.unmanaged_rss_bytes += record.rss_bytes;
        }
    }

    // Admission order: FIFO by kernel start time, pid as the tie-break so
    // the order is total and reproducible for a given snapshot.
    managed.sort_by_key(|r| (r.start_time, r.pid));

    for (index, record) in managed.into_iter().enumerate() {
        out.managed_vsz_bytes += record.vsz_bytes;
        out.managed_rss_bytes += record.rss_bytes;

        let desired = if index > 0 && out.managed_vsz_bytes > vsz_limit_bytes {
            DesiredState::Suspend
        } else {
            DesiredState::Run
        };
        out.managed.push(Decision { record, desired });
    }

    out
}
