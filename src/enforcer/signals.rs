// Suspend/resume signal delivery for managed processes

use crate::monitor::ProcState;
use crate::policy::{Decision, DesiredState};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

/// The one state transition (if any) a managed process needs this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Stop,
    Continue,
}

impl Action {
    const fn signal(self) -> Signal {
        match self {
            Self::Stop => Signal::SIGSTOP,
            Self::Continue => Signal::SIGCONT,
        }
    }
}

/// Result of one signal delivery attempt
#[derive(Debug)]
pub enum SignalOutcome {
    /// Signal was accepted by the kernel
    Delivered,
    /// Target exited before delivery; it will drop out of the next snapshot
    Vanished,
    /// Permission denied (target owned by another user)
    PermissionDenied,
    /// Other errno
    Failed(String),
}

impl SignalOutcome {
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Delivered => "delivered",
            Self::Vanished => "target already gone",
            Self::PermissionDenied => "permission denied",
            Self::Failed(msg) => msg,
        }
    }
}

/// Decide which signal, if any, moves a process from its observed run
/// state to the desired one. Already-matching states get no signal, which
/// is what makes repeated enforcement over an unchanged snapshot a no-op.
pub fn action_for(current: ProcState, desired: DesiredState) -> Option<Action> {
    match desired {
        DesiredState::Suspend if !current.is_stopped() => Some(Action::Stop),
        DesiredState::Run if current.is_stopped() => Some(Action::Continue),
        _ => None,
    }
}

fn send_signal(pid: i32, signal: Signal) -> SignalOutcome {
    match signal::kill(Pid::from_raw(pid), signal) {
        Ok(()) => SignalOutcome::Delivered,
        Err(nix::errno::Errno::ESRCH) => SignalOutcome::Vanished,
        Err(nix::errno::Errno::EPERM) => SignalOutcome::PermissionDenied,
        Err(e) => SignalOutcome::Failed(format!("signal error: {e}")),
    }
}

/// Apply one cycle of decisions: at most one signal per managed process,
/// and nothing outside the decision list is ever signaled. Delivery
/// failures are logged and dropped - the process gets re-evaluated against
/// a fresh snapshot next cycle. Returns the number of signals sent.
pub fn enforce(decisions: &[Decision], dry_run: bool) -> usize {
    let mut sent = 0;

    for decision in decisions {
        let Some(action) = action_for(decision.record.state, decision.desired) else {
            continue;
        };

        let pid = decision.record.pid;
        let signal = action.signal();

        if dry_run {
            log::info!(
                "DRY RUN: would send {} to {} ({})",
                signal,
                pid,
                decision.record.comm
            );
            continue;
        }

        log::debug!("Sending {} to {} ({})", signal, pid, decision.record.comm);
        let outcome = send_signal(pid, signal);
        if outcome.is_delivered() {
            sent += 1;
        } else {
            log::warn!(
                "Failed to send {} to {} ({}): {}",
                signal,
                pid,
                decision.record.comm,
                outcome.description()
            );
        }
    }

    sent
}

/// Best-effort SIGCONT, used by the shutdown path to unfreeze anything
/// still stopped when the governor exits.
pub fn resume(pid: i32) -> SignalOutcome {
    send_signal(pid, Signal::SIGCONT)
}
