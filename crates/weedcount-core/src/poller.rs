use std::sync::mpsc::{self, RecvTimeoutError, TrySendError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, WeedCountError};
use crate::orientation::{OrientationSample, OrientationSource};

/// Repeating task that reads an [`OrientationSource`] at a fixed interval and
/// forwards each reading (present or absent) over a channel.
///
/// The task runs until [`OrientationPoller::stop`] is called, the poller is
/// dropped, or the receiving end of the channel goes away. Ticks never overlap:
/// each one is a single non-blocking read followed by a send. The send never
/// blocks either: while the receiver has not yet taken the previous reading,
/// new ones are dropped, so an idle receiver holds at most the channel's
/// capacity.
pub struct OrientationPoller {
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl OrientationPoller {
    pub fn spawn(
        source: Arc<dyn OrientationSource>,
        interval: Duration,
        sink: mpsc::SyncSender<Option<OrientationSample>>,
    ) -> Result<Self> {
        if interval.is_zero() {
            return Err(WeedCountError::InvalidSettings(
                "orientation poll interval must be > 0".into(),
            ));
        }
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = std::thread::Builder::new()
            .name("orientation-poller".into())
            .spawn(move || poll_loop(source.as_ref(), interval, &stop_rx, &sink))?;

        debug!(interval_ms = interval.as_millis() as u64, "orientation poller spawned");

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the task and wait for its thread to exit. Idempotent.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("orientation poller stopped");
        }
    }
}

impl Drop for OrientationPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll_loop(
    source: &dyn OrientationSource,
    interval: Duration,
    stop_rx: &mpsc::Receiver<()>,
    sink: &mpsc::SyncSender<Option<OrientationSample>>,
) {
    loop {
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => match sink.try_send(source.sample()) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => break,
            },
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
