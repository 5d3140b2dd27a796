//! Debounced derived values.
//!
//! [`Debouncer`] is a single-value cache with cancel-and-reschedule semantics: every change of
//! the source value cancels the pending update and schedules a new one `delay` later. The
//! cached output only moves once the source has stayed put for the whole delay.
//!
//! [`debounce`] lifts that into a stream transformer driven by a tokio task, which is how the
//! render loop consumes it.

use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Delay used when the configuration does not override it.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Timer-backed cache that lags a source value by a fixed delay.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    source: T,
    emitted: T,
    deadline: Option<Instant>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Start with `initial` as both the source and the emitted value.
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            source: initial.clone(),
            emitted: initial,
            deadline: None,
        }
    }

    /// Record a new source value observed at `now`.
    ///
    /// Setting the value it already has is not a change and leaves any pending update alone.
    pub fn push(&mut self, value: T, now: Instant) {
        if value == self.source {
            return;
        }
        self.source = value;
        self.deadline = Some(now + self.delay);
    }

    /// When the pending update is due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Settle the pending update if its deadline has passed.
    ///
    /// Returns the new output only when it differs from the last one emitted.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.source == self.emitted {
                    None
                } else {
                    self.emitted = self.source.clone();
                    Some(self.emitted.clone())
                }
            }
            _ => None,
        }
    }

    /// Drop the pending update without emitting it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// The last emitted (stable) value.
    pub fn current(&self) -> &T {
        &self.emitted
    }
}

/// Stream of debounced values; dropping it cancels any pending update.
pub struct DebouncedStream<T> {
    inner: UnboundedReceiverStream<T>,
    task: JoinHandle<()>,
}

impl<T> Stream for DebouncedStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl<T> Drop for DebouncedStream<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Debounce a stream of source values.
///
/// The output starts at `initial` (which is not re-emitted) and yields a value once the source
/// has been unchanged for `delay`. When the source ends, a pending update is discarded and the
/// output stream ends.
pub fn debounce<S, T>(source: S, initial: T, delay: Duration) -> DebouncedStream<T>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Clone + PartialEq + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        let mut source = source;
        let mut debouncer = Debouncer::new(initial, delay);

        loop {
            let deadline = debouncer.deadline();
            tokio::select! {
                biased;
                next = source.next() => match next {
                    Some(value) => debouncer.push(value, Instant::now()),
                    None => {
                        debouncer.cancel();
                        break;
                    }
                },
                _ = wait_for(deadline) => {
                    if let Some(value) = debouncer.fire(Instant::now()) {
                        if tx.send(value).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    DebouncedStream {
        inner: UnboundedReceiverStream::new(rx),
        task,
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout};

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), DELAY);

        debouncer.push("c".to_string(), start);
        debouncer.push("ca".to_string(), start + Duration::from_millis(100));
        debouncer.push("cat".to_string(), start + Duration::from_millis(200));

        // 500ms after the first keystroke, but only 300ms after the last one.
        assert_eq!(debouncer.fire(start + Duration::from_millis(500)), None);
        assert!(debouncer.is_pending());

        assert_eq!(
            debouncer.fire(start + Duration::from_millis(700)),
            Some("cat".to_string())
        );
        assert_eq!(debouncer.current(), "cat");
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_same_value_does_not_reschedule() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(0u32, DELAY);

        debouncer.push(1, start);
        debouncer.push(1, start + Duration::from_millis(400));
        assert_eq!(debouncer.deadline(), Some(start + DELAY));
        assert_eq!(debouncer.fire(start + DELAY), Some(1));
    }

    #[test]
    fn test_returning_to_emitted_value_emits_nothing() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new("cat".to_string(), DELAY);

        debouncer.push("cats".to_string(), start);
        debouncer.push("cat".to_string(), start + Duration::from_millis(50));
        assert_eq!(debouncer.fire(start + Duration::from_secs(1)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_cancel_discards_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), DELAY);
        debouncer.push("dog".to_string(), start);
        debouncer.cancel();

        assert_eq!(debouncer.fire(start + Duration::from_secs(5)), None);
        assert_eq!(debouncer.current(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_emits_only_final_value() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut output = debounce(UnboundedReceiverStream::new(rx), String::new(), DELAY);

        for term in ["c", "ca", "cat"] {
            tx.send(term.to_string()).unwrap();
            sleep(Duration::from_millis(100)).await;
        }

        let started = Instant::now();
        assert_eq!(output.next().await, Some("cat".to_string()));
        // 300ms of the delay were still outstanding after the last keystroke.
        assert!(started.elapsed() >= Duration::from_millis(300));

        let nothing_more = timeout(Duration::from_secs(5), output.next()).await;
        assert!(nothing_more.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_end_cancels_pending_update() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut output = debounce(UnboundedReceiverStream::new(rx), 0u32, DELAY);

        tx.send(7).unwrap();
        drop(tx);

        assert_eq!(output.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_stream_cancels_pending_update() {
        let (tx, rx) = mpsc::unbounded_channel();
        let output = debounce(UnboundedReceiverStream::new(rx), 0u32, DELAY);

        tx.send(7).unwrap();
        sleep(Duration::from_millis(100)).await;
        assert!(!tx.is_closed());

        drop(output);
        // Still inside the quiet period: only an aborted task has released its source
        sleep(Duration::from_millis(100)).await;

        assert!(tx.is_closed());
        assert!(tx.send(8).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_changes_are_all_emitted_in_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut output = debounce(UnboundedReceiverStream::new(rx), 0u32, DELAY);

        tx.send(1).unwrap();
        assert_eq!(output.next().await, Some(1));
        tx.send(2).unwrap();
        assert_eq!(output.next().await, Some(2));
    }
}
