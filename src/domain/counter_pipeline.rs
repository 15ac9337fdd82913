//! Background counter increments, decoupled from the redirect that triggered them.
//!
//! A bounded FIFO queue of short codes is drained by a fixed pool of tokio
//! tasks, each calling [`UrlStore::increment_counter`] for the codes it takes.
//!
//! # Backpressure
//!
//! [`CounterHandle::submit`] waits for free capacity when the queue is full.
//! Codes are never dropped while the pipeline is running.
//!
//! # Shutdown
//!
//! [`CounterPipeline::shutdown`] flips a stop flag. Workers then close the
//! queue so no new codes are accepted, drain everything already buffered,
//! and exit. `shutdown` returns once every worker has finished.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::repositories::UrlStore;

/// Number of codes that may wait in the queue at once.
pub const COUNTER_QUEUE_CAPACITY: usize = 100;

type SharedQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// Sending side of the counter queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    tx: mpsc::Sender<String>,
}

impl CounterHandle {
    /// Queues an increment for `code`, waiting while the queue is full.
    ///
    /// Never fails from the caller's point of view: once the pipeline has
    /// been shut down the code is logged and discarded.
    pub async fn submit(&self, code: String) {
        if let Err(mpsc::error::SendError(code)) = self.tx.send(code).await {
            warn!(code = %code, "Counter queue is closed, increment discarded");
        }
    }

    /// Free slots currently available in the queue.
    pub fn available_capacity(&self) -> usize {
        self.tx.capacity()
    }

    /// True once the pipeline has shut down and no longer accepts codes.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A running pool of counter workers.
pub struct CounterPipeline {
    handle: CounterHandle,
    queue: SharedQueue,
    stop: watch::Sender<bool>,
    workers: Vec<JoinHandle<()>>,
}

impl CounterPipeline {
    /// Creates the queue and spawns `workers` tasks consuming from it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S>(store: Arc<S>, workers: usize) -> Self
    where
        S: UrlStore + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel(COUNTER_QUEUE_CAPACITY);
        let (stop, stop_rx) = watch::channel(false);
        let queue: SharedQueue = Arc::new(Mutex::new(rx));

        let workers = (0..workers)
            .map(|id| {
                tokio::spawn(run_counter_worker(
                    id,
                    queue.clone(),
                    store.clone(),
                    stop_rx.clone(),
                ))
            })
            .collect::<Vec<_>>();

        info!(
            "Counter pipeline started: {} workers, queue capacity {}",
            workers.len(),
            COUNTER_QUEUE_CAPACITY
        );

        Self {
            handle: CounterHandle { tx },
            queue,
            stop,
            workers,
        }
    }

    pub fn handle(&self) -> CounterHandle {
        self.handle.clone()
    }

    /// Stops accepting codes, drains the queue and waits for all workers.
    ///
    /// The queue stays open until this is called, even with no workers.
    pub async fn shutdown(self) {
        if self.workers.is_empty() {
            warn!("Counter pipeline has no workers, queued increments are lost");
        }

        // Workers only exit through the stop flag or a closed queue, so a
        // failed send just means they are all gone already.
        let _ = self.stop.send(true);

        for worker in self.workers {
            if let Err(e) = worker.await {
                error!("Counter worker terminated abnormally: {}", e);
            }
        }

        self.queue.lock().await.close();

        info!("Counter pipeline drained and stopped");
    }
}

async fn run_counter_worker<S>(
    id: usize,
    queue: SharedQueue,
    store: Arc<S>,
    mut stop: watch::Receiver<bool>,
) where
    S: UrlStore + ?Sized,
{
    debug!(worker = id, "Counter worker started");

    let mut stopping = false;

    loop {
        let next = {
            let mut rx = queue.lock().await;
            if stopping {
                rx.recv().await
            } else {
                tokio::select! {
                    code = rx.recv() => code,
                    // A dropped pipeline counts as a stop request too.
                    _ = stop.changed() => {
                        stopping = true;
                        rx.close();
                        rx.recv().await
                    }
                }
            }
        };

        let Some(code) = next else {
            break;
        };

        match store.increment_counter(&code).await {
            Ok(()) => debug!(worker = id, code = %code, "Counter incremented"),
            Err(e) => error!(worker = id, code = %code, "unable to increment code counter: {}", e),
        }
    }

    debug!(worker = id, "Counter worker stopped");
}
