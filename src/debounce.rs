//! Trailing-edge debouncing on the tokio timer.
//!
//! A [`Debouncer`] owns at most one [`ScheduledTask`]. Scheduling a new action
//! swaps the new task into the slot and drops the old one, which aborts it, so
//! a burst of triggers only ever runs the action scheduled by the last one.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

/// A spawned timer task that is aborted when this handle is dropped.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: AbortHandle,
}

impl ScheduledTask {
    /// Spawn `action` to run once `delay` has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        })
        .abort_handle();
        Self { handle }
    }

    /// Whether the task is still waiting (or running).
    pub fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Coalesces bursts of triggers into a single delayed action.
#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    slot: Mutex<Option<ScheduledTask>>,
}

impl Debouncer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            slot: Mutex::new(None),
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule `action` after the quiet interval, cancelling whatever was
    /// scheduled before.
    pub fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Spawn and replace under one lock so concurrent callers cannot
        // leave an earlier timer in the slot. The displaced task aborts as it
        // drops, after the lock is released.
        let previous = {
            let mut slot = self.lock();
            slot.replace(ScheduledTask::spawn(self.interval, action))
        };
        drop(previous);
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        let previous = self.lock().take();
        drop(previous);
    }

    pub fn is_pending(&self) -> bool {
        self.lock().as_ref().is_some_and(ScheduledTask::is_pending)
    }

    fn lock(&self) -> MutexGuard<'_, Option<ScheduledTask>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let make = {
            let count = Arc::clone(&count);
            move || {
                let count = Arc::clone(&count);
                Box::new(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                }) as Box<dyn FnOnce() + Send>
            }
        };
        (count, make)
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_action_runs_after_interval() {
        let (count, make) = counter();
        let debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.schedule(make());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_reschedule_cancels_previous_action() {
        let (count, make) = counter();
        let debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.schedule(make());
        tokio::time::sleep(Duration::from_millis(60)).await;
        debouncer.schedule(make());
        tokio::time::sleep(Duration::from_millis(60)).await;

        // First deadline has passed, but it was superseded.
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_schedules_leave_exactly_one_action() {
        let count = Arc::new(AtomicUsize::new(0));
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(200)));

        let callers: Vec<_> = (0..8)
            .map(|_| {
                let debouncer = Arc::clone(&debouncer);
                let count = Arc::clone(&count);
                tokio::spawn(async move {
                    for _ in 0..50 {
                        let count = Arc::clone(&count);
                        debouncer.schedule(move || {
                            count.fetch_add(1, Ordering::SeqCst);
                        });
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        for caller in callers {
            caller.await.expect("caller");
        }

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_cancel_prevents_action() {
        let (count, make) = counter();
        let debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.schedule(make());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_dropping_debouncer_aborts_pending_action() {
        let (count, make) = counter();
        let debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule(make());
        drop(debouncer);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
