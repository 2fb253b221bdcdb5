//! Bounded hand-off between frame production and the encoder's stdin.
//!
//! Encoded frames are queued on a bounded channel and drained by a dedicated
//! worker thread that writes them to the child process. The producer blocks
//! once the queue is full, so a slow encoder throttles frame generation
//! instead of growing memory. Frames reach the sink in submission order.
//!
//! Shutdown comes in two flavors with different delivery contracts:
//! `finish` closes the channel and lets the worker drain everything still
//! queued, while `shutdown` raises the cancel flag and drops whatever has
//! not been written yet. The worker observes cancellation within one poll
//! interval even when no frames arrive.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, SyncSender, sync_channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{trace, warn};

use crate::error::{CoreError, CoreResult};

/// Upper bound on frames queued ahead of the encoder.
pub const QUEUE_CAPACITY: usize = 20;

/// How long the worker waits for the next frame before re-checking state.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Cooperative cancellation flag shared between the session owner, the
/// feeder worker and any thread that wants to request an abort.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Bounded FIFO hand-off feeding encoded frames to a byte sink.
pub struct FrameFeeder {
    sender: Option<SyncSender<Vec<u8>>>,
    worker: Option<JoinHandle<()>>,
    cancel: CancelToken,
}

impl FrameFeeder {
    /// Starts the worker thread draining frames into `sink`.
    pub fn start<W>(sink: W, cancel: CancelToken) -> CoreResult<Self>
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = sync_channel::<Vec<u8>>(QUEUE_CAPACITY);
        let worker_cancel = cancel.clone();

        let worker = thread::Builder::new()
            .name("frame-feeder".to_string())
            .spawn(move || {
                let mut sink = sink;
                loop {
                    if worker_cancel.is_cancelled() {
                        trace!("frame feeder cancelled, dropping queued frames");
                        break;
                    }
                    match receiver.recv_timeout(POLL_INTERVAL) {
                        Ok(frame) => {
                            trace!("feeding frame of {} bytes", frame.len());
                            if let Err(err) = sink.write_all(&frame) {
                                warn!("frame write failed, stopping feeder: {err}");
                                break;
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                if let Err(err) = sink.flush() {
                    trace!("sink flush after drain failed: {err}");
                }
            })
            .map_err(CoreError::Io)?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            cancel,
        })
    }

    /// Queues one encoded frame. Blocks while the queue is at capacity;
    /// fails once the worker has stopped accepting frames.
    pub fn enqueue(&self, frame: Vec<u8>) -> CoreResult<()> {
        let sender = self.sender.as_ref().ok_or(CoreError::FeederStopped)?;
        sender.send(frame).map_err(|_| CoreError::FeederStopped)
    }

    /// Closes the queue and joins the worker after it has written every
    /// frame still queued.
    pub fn finish(&mut self) -> CoreResult<()> {
        drop(self.sender.take());
        self.join()
    }

    /// Cancels the worker and joins it. Queued frames are not delivered.
    pub fn shutdown(&mut self) -> CoreResult<()> {
        self.cancel.cancel();
        drop(self.sender.take());
        self.join()
    }

    fn join(&mut self) -> CoreResult<()> {
        if let Some(worker) = self.worker.take() {
            worker
                .join()
                .map_err(|_| CoreError::OperationFailed("frame feeder worker panicked".to_string()))?;
        }
        Ok(())
    }
}

impl Drop for FrameFeeder {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.cancel.cancel();
            drop(self.sender.take());
            let _ = self.join();
        }
    }
}
