// Point-in-time process sampling via procfs

use anyhow::{Context, Result};
use std::collections::HashMap;

/// Run state of a process, as reported by its stat record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Running,
    Sleeping,
    Stopped,
    Zombie,
    Other,
}

impl ProcState {
    /// Map the procfs state character to a run state.
    /// 'T' is stopped-by-signal, 't' is stopped-by-debugger; both count
    /// as stopped so the enforcer never re-signals a traced process.
    pub fn from_char(c: char) -> Self {
        match c {
            'R' => Self::Running,
            'S' | 'D' | 'I' => Self::Sleeping,
            'T' | 't' => Self::Stopped,
            'Z' => Self::Zombie,
            _ => Self::Other,
        }
    }

    pub const fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl std::fmt::Display for ProcState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Self::Running => 'R',
            Self::Sleeping => 'S',
            Self::Stopped => 'T',
            Self::Zombie => 'Z',
            Self::Other => '?',
        };
        write!(f, "{c}")
    }
}

/// Immutable snapshot of one process at sample time
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub pid: i32,
    pub ppid: i32,
    pub comm: String,
    pub state: ProcState,
    /// Kernel start time in clock ticks since boot; used only for
    /// relative ordering, never interpreted as wall-clock time
    pub start_time: u64,
    pub vsz_bytes: u64,
    pub rss_bytes: u64,
}

/// One best-effort point-in-time view of all live processes
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: HashMap<i32, ProcessRecord>,
}

impl Snapshot {
    /// Sample every process currently visible in /proc.
    ///
    /// A process that vanishes between enumeration and the stat read is
    /// skipped; partial snapshots are expected under churn. Only a failure
    /// of the enumeration itself is an error.
    pub fn capture() -> Result<Self> {
        let procs = procfs::process::all_processes().context("Failed to enumerate /proc")?;

        let page_size = procfs::page_size();
        let mut records = HashMap::new();

        for proc in procs.flatten() {
            if let Ok(stat) = proc.stat() {
                records.insert(
                    stat.pid,
                    ProcessRecord {
                        pid: stat.pid,
                        ppid: stat.ppid,
                        comm: stat.comm.clone(),
                        state: ProcState::from_char(stat.state),
                        start_time: stat.starttime,
                        vsz_bytes: stat.vsize,
                        rss_bytes: stat.rss * page_size,
                    },
                );
            }
        }

        Ok(Self { records })
    }

    /// Build a snapshot from pre-made records (fixtures and tests)
    pub fn from_records(records: impl IntoIterator<Item = ProcessRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.pid, r)).collect(),
        }
    }

    pub fn get(&self, pid: i32) -> Option<&ProcessRecord> {
        self.records.get(&pid)
    }

    pub fn contains(&self, pid: i32) -> bool {
        self.records.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.values()
    }
}
