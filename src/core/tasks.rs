/// Scoped background tasks for simulated operations
///
/// Every delayed mutation is a tokio task that sleeps and then sends an event
/// back to the run loop. The scope keeps the handles so the owning view can
/// abort whatever is still pending when it goes away.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

pub struct TaskScope<E> {
    tx: UnboundedSender<E>,
    handles: Vec<JoinHandle<()>>,
}

impl<E: Send + 'static> TaskScope<E> {
    pub fn new(tx: UnboundedSender<E>) -> Self {
        Self {
            tx,
            handles: Vec::new(),
        }
    }

    /// Deliver `event` once after `delay`
    pub fn after(&mut self, delay: Duration, event: E) {
        self.prune();

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(event);
        });

        self.handles.push(handle);
    }

    /// Deliver an event built by `make` every `period`, first one after one period
    pub fn every<F>(&mut self, period: Duration, mut make: F)
    where
        F: FnMut() -> E + Send + 'static,
    {
        self.prune();

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if tx.send(make()).is_err() {
                    break;
                }
            }
        });

        self.handles.push(handle);
    }

    /// Abort every pending task of this scope
    pub fn cancel(&mut self) {
        let pending = self.handles.len();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        if pending > 0 {
            trace!(pending, "Cancelled scoped tasks");
        }
    }

    /// Number of tasks that have not finished yet
    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    fn prune(&mut self) {
        self.handles.retain(|h| !h.is_finished());
    }
}

impl<E> Drop for TaskScope<E> {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test(start_paused = true)]
    async fn test_after_delivers_once_delay_elapsed() {
        let (tx, mut rx) = unbounded_channel();
        let mut scope = TaskScope::new(tx);

        scope.after(Duration::from_secs(3), 7u32);
        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_events() {
        let (tx, mut rx) = unbounded_channel();
        let mut scope = TaskScope::new(tx);

        scope.after(Duration::from_secs(1), "late");
        scope.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_scope_aborts_tasks() {
        let (tx, mut rx) = unbounded_channel();
        {
            let mut scope = TaskScope::new(tx);
            scope.after(Duration::from_secs(1), 1u8);
            scope.every(Duration::from_secs(1), || 2u8);
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_repeats() {
        let (tx, mut rx) = unbounded_channel();
        let mut scope = TaskScope::new(tx);
        let mut n = 0u32;
        scope.every(Duration::from_secs(8), move || {
            n += 1;
            n
        });

        tokio::time::sleep(Duration::from_millis(24_500)).await;
        let received: Vec<u32> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(received, vec![1, 2, 3]);
    }
}
