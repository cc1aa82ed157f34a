//! A bounded, cancellation-aware work queue with one producer and any number of consumers.
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

use crate::order_poller::ShutdownSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("Shutdown was triggered while waiting on the queue")]
    Cancelled,
    #[error("The other end of the queue has gone away")]
    Closed,
}

pub struct WorkQueue;

impl WorkQueue {
    /// Creates a queue holding at most `depth` items (at least one). `put` blocks while the queue is full.
    pub fn bounded<T>(depth: usize) -> (QueueProducer<T>, QueueConsumer<T>) {
        let (tx, rx) = mpsc::channel(depth.max(1));
        (QueueProducer { tx }, QueueConsumer { rx: Arc::new(Mutex::new(rx)) })
    }
}

pub struct QueueProducer<T> {
    tx: mpsc::Sender<T>,
}

impl<T> QueueProducer<T> {
    /// Enqueues `item`, waiting for space if necessary. The item is dropped if `signal` fires first.
    pub async fn put(&self, item: T, signal: &mut ShutdownSignal) -> Result<(), QueueError> {
        if signal.is_triggered() {
            return Err(QueueError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = signal.wait() => Err(QueueError::Cancelled),
            sent = self.tx.send(item) => sent.map_err(|_| QueueError::Closed),
        }
    }
}

/// Consumers are cheap to clone. Each item is delivered to exactly one of them.
pub struct QueueConsumer<T> {
    rx: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for QueueConsumer<T> {
    fn clone(&self) -> Self {
        Self { rx: Arc::clone(&self.rx) }
    }
}

impl<T> QueueConsumer<T> {
    /// Waits for the next item. Returns [`QueueError::Cancelled`] if `signal` fires first, and
    /// [`QueueError::Closed`] once the producer is gone and the queue has been drained.
    pub async fn take(&self, signal: &mut ShutdownSignal) -> Result<T, QueueError> {
        if signal.is_triggered() {
            return Err(QueueError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = signal.wait() => Err(QueueError::Cancelled),
            item = async { self.rx.lock().await.recv().await } => item.ok_or(QueueError::Closed),
        }
    }
}
