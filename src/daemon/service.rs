// Governor service implementation

use crate::config::Config;
use crate::enforcer;
use crate::monitor::{self, Snapshot};
use crate::policy;
use crate::report;
use anyhow::{anyhow, Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Why one scan cycle ended
enum CycleOutcome {
    /// Normal cycle, keep polling
    Continue,
    /// Root pid missing from the snapshot - the tracked tree has ended
    RootGone,
}

/// Governor service that polls the process tree and enforces the budget
pub struct GovernorService {
    config: Config,
    running: Arc<AtomicBool>,
}

impl GovernorService {
    /// Create a new governor service
    pub fn new(config: Config) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the running flag for signal handling
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Main run loop. Returns cleanly when the root pid disappears or a
    /// shutdown signal arrives; cycle errors are logged and retried.
    pub fn run(&mut self) -> Result<()> {
        self.print_startup_info();

        self.running.store(true, Ordering::SeqCst);
        self.setup_signal_handlers()?;

        while self.running.load(Ordering::SeqCst) {
            match self.run_cycle() {
                Ok(CycleOutcome::Continue) => {}
                Ok(CycleOutcome::RootGone) => {
                    log::info!("Process {} not found. Exiting", self.config.root_pid);
                    return Ok(());
                }
                // Transient: /proc enumeration failed. Fall through to the
                // sleep below so a persistent failure cannot busy-loop.
                Err(e) => log::error!("Scan cycle failed: {e:#}"),
            }

            thread::sleep(self.config.scan_interval);
        }

        // Shutdown signal: leave nothing frozen behind us
        log::info!("Shutdown signal received, resuming stopped processes");
        self.release_stopped();
        Ok(())
    }

    /// Setup signal handlers for graceful shutdown
    fn setup_signal_handlers(&self) -> Result<()> {
        let running = Arc::clone(&self.running);

        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })
        .map_err(|e| anyhow!("Failed to set signal handler: {}", e))?;

        Ok(())
    }

    /// Print startup information
    fn print_startup_info(&self) {
        log::info!("=== mem-throttle v{} starting ===", env!("CARGO_PKG_VERSION"));
        log::info!("Tracking process tree rooted at pid {}", self.config.root_pid);
        log::info!(
            "VSZ budget: {} MiB, scan interval: {} ms",
            self.config.vsz_limit_mb(),
            self.config.scan_interval.as_millis()
        );

        let mut names: Vec<&str> = self.config.whitelist.iter().map(String::as_str).collect();
        names.sort_unstable();
        log::info!("Whitelist: {}", names.join(", "));

        if self.config.dry_run {
            log::warn!("DRY RUN MODE - will not send any signals");
        }
    }

    /// One full cycle: sample, resolve descendants, decide, enforce, report.
    /// No state survives into the next cycle; every decision is made against
    /// this snapshot alone.
    fn run_cycle(&self) -> Result<CycleOutcome> {
        let snapshot = Snapshot::capture().context("Failed to sample processes")?;

        let Some(descendant_set) = monitor::descendants(&snapshot, self.config.root_pid) else {
            return Ok(CycleOutcome::RootGone);
        };

        let cycle = policy::decide(
            &snapshot,
            &descendant_set,
            &self.config.whitelist,
            self.config.vsz_limit_bytes,
        );

        let sent = enforcer::enforce(&cycle.managed, self.config.dry_run);
        if sent > 0 {
            log::debug!("Sent {sent} signal(s) this cycle");
        }

        report::report_cycle(&cycle);

        Ok(CycleOutcome::Continue)
    }

    /// Final pass on shutdown: SIGCONT every managed descendant still
    /// stopped, so an interrupted run never leaves a build frozen.
    /// Best-effort; any failure here is logged and dropped.
    fn release_stopped(&self) {
        let snapshot = match Snapshot::capture() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Could not sample processes for final resume: {e:#}");
                return;
            }
        };

        let Some(descendant_set) = monitor::descendants(&snapshot, self.config.root_pid) else {
            return;
        };

        for pid in descendant_set {
            let Some(record) = snapshot.get(pid) else {
                continue;
            };
            if self.config.whitelist.contains(&record.comm) && record.state.is_stopped() {
                if self.config.dry_run {
                    log::info!("DRY RUN: would resume {} ({})", pid, record.comm);
                    continue;
                }
                let outcome = enforcer::resume(pid);
                if outcome.is_delivered() {
                    log::info!("Resumed {} ({})", pid, record.comm);
                } else {
                    log::warn!(
                        "Failed to resume {} ({}): {}",
                        pid,
                        record.comm,
                        outcome.description()
                    );
                }
            }
        }
    }
}
