//! Fixed request pacing.
//!
//! The tracker applies secondary (abuse) rate limits to bursts of writes, so
//! every issue and every copied comment is preceded by the same short pause.
//! There is no adaptive backoff.

use std::time::Duration;
use tracing::trace;

/// Waits a fixed duration between sequential requests.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    /// Creates a pacer with the given delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspends the current task for the configured delay.
    ///
    /// Only the calling task sleeps; other tasks on the runtime keep running.
    /// A zero delay returns immediately.
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }

        trace!(delay = ?self.delay, "Pacing");
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_delay() {
        let pacer = Pacer::new(Duration::from_millis(500));
        let start = Instant::now();

        pacer.wait().await;

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_sleep() {
        let pacer = Pacer::new(Duration::ZERO);
        let start = Instant::now();

        pacer.wait().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_does_not_block_other_tasks() {
        let pacer = Pacer::new(Duration::from_millis(500));
        let other = tokio::spawn(async { 42 });

        pacer.wait().await;

        assert_eq!(other.await.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_logs_sub_millisecond_delay() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        Pacer::new(Duration::from_micros(250)).wait().await;

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("delay=250µs"), "{output}");
    }
}
