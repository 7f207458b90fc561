use anyhow::{Result, bail};
use log::{info, warn};

/// Track progress of a scrape run across all pages
pub struct RunProgress {
    total: usize,
    written: usize,
    empty: usize,
    failed: usize,
    points: usize,
}

impl RunProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            written: 0,
            empty: 0,
            failed: 0,
            points: 0,
        }
    }

    pub fn record_written(&mut self, points: usize) {
        if points == 0 {
            self.empty += 1;
        } else {
            self.written += 1;
            self.points += points;
        }
        self.log_progress();
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.written + self.empty + self.failed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn points(&self) -> usize {
        self.points
    }

    /// Fails when any page of the run was not stored.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.failed() > 0 {
            bail!("{} of {} pages failed to scrape or store", self.failed(), self.total);
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        info!(
            "  → Pages: {} written, {} empty, {} failed; {} points stored",
            self.written, self.empty, self.failed, self.points
        );
        if self.failed > 0 {
            warn!("  → {} of {} pages were not stored", self.failed, self.total);
        }
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Progress: {}/{} pages ({} points, {} failed)",
                current, self.total, self.points, self.failed
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}
