//! Time-windowed markers
//!
//! The platform gives no causal identifier tying a narrative card to the
//! roll that follows it, so temporal proximity is the only available link.
//! Two markers share the mechanism: the pending-attack marker arms when a
//! melee card is observed and is consumed by the next qualifying roll, and
//! the suppression guard arms when any detector commits and blocks the
//! other detectors from committing the same physical attack again.
//!
//! Both are per-participant, process-local, mutated only by the owning
//! orchestrator's handlers. Logical races (a card arriving twice before a
//! roll, a stale marker from an unrelated earlier action) resolve by
//! last-write-wins overwrite and prompt consumption.

use std::time::Duration;

use tokio::time::Instant;

/// "A melee action was just announced; the next roll belongs to it."
#[derive(Debug)]
pub struct PendingAttackTracker {
    window: Duration,
    expires_at: Option<Instant>,
}

impl PendingAttackTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            expires_at: None,
        }
    }

    /// Arm the marker. Unconditional overwrite: repeat detections debounce
    /// into a single fresh window, they do not accumulate.
    pub fn mark(&mut self) {
        self.expires_at = Some(Instant::now() + self.window);
    }

    pub fn is_pending(&self) -> bool {
        self.expires_at.is_some_and(|expiry| Instant::now() <= expiry)
    }

    /// Consume the marker
    pub fn clear(&mut self) {
        self.expires_at = None;
    }
}

/// "An attack is already resolving; drop redundant detections."
#[derive(Debug)]
pub struct SuppressionGuard {
    window: Duration,
    expires_at: Option<Instant>,
}

impl SuppressionGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            expires_at: None,
        }
    }

    pub fn arm(&mut self) {
        self.expires_at = Some(Instant::now() + self.window);
    }

    pub fn is_armed(&self) -> bool {
        self.expires_at.is_some_and(|expiry| Instant::now() <= expiry)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn marker_is_pending_immediately_after_mark() {
        let mut tracker = PendingAttackTracker::new(Duration::from_secs(10));
        assert!(!tracker.is_pending());
        tracker.mark();
        assert!(tracker.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn marker_expires_after_the_window() {
        let mut tracker = PendingAttackTracker::new(Duration::from_secs(10));
        tracker.mark();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(tracker.is_pending());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!tracker.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_forces_expiry_immediately() {
        let mut tracker = PendingAttackTracker::new(Duration::from_secs(10));
        tracker.mark();
        tracker.clear();
        assert!(!tracker.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn remark_overwrites_the_expiry() {
        let mut tracker = PendingAttackTracker::new(Duration::from_secs(10));
        tracker.mark();

        tokio::time::advance(Duration::from_secs(8)).await;
        tracker.mark();

        // Past the first window, inside the second
        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(tracker.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn guard_blocks_until_window_elapses() {
        let mut guard = SuppressionGuard::new(Duration::from_secs(5));
        assert!(!guard.is_armed());

        guard.arm();
        assert!(guard.is_armed());

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(!guard.is_armed());
    }
}
