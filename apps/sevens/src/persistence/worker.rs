//! Snapshot I/O off the caller's thread.
//!
//! One dedicated thread runs requests in submission order, so a save
//! followed by a load of the same path always sees the saved game.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::{SnapshotStore, StorageError};
use crate::domain::GameState;

type Job = Box<dyn FnOnce(&dyn SnapshotStore) + Send>;

/// Result of a request queued on a [`SnapshotWorker`].
#[must_use = "dropping the handle discards the outcome"]
pub struct PendingIo<T> {
    reply: Receiver<Result<T, StorageError>>,
}

impl<T> PendingIo<T> {
    /// Block until the worker has run the request.
    pub fn wait(self) -> Result<T, StorageError> {
        self.reply.recv().unwrap_or(Err(StorageError::WorkerStopped))
    }

    /// The outcome if the request already finished, without blocking.
    pub fn try_take(&self) -> Option<Result<T, StorageError>> {
        self.reply.try_recv().ok()
    }
}

/// Wraps a [`SnapshotStore`] with a single background I/O thread.
pub struct SnapshotWorker {
    jobs: Option<Sender<Job>>,
    thread: Option<JoinHandle<()>>,
}

impl SnapshotWorker {
    pub fn spawn(store: Arc<dyn SnapshotStore>) -> Result<Self, StorageError> {
        let (jobs, queue) = channel::<Job>();
        let thread = thread::Builder::new()
            .name("storage-io".into())
            .spawn(move || {
                for job in queue {
                    job(store.as_ref());
                }
                debug!("Storage worker drained");
            })
            .map_err(|e| StorageError::io(&PathBuf::from("<storage-io thread>"), e))?;
        Ok(Self {
            jobs: Some(jobs),
            thread: Some(thread),
        })
    }

    pub fn save(&self, state: GameState, path: PathBuf) -> PendingIo<()> {
        self.submit(move |store: &dyn SnapshotStore| store.save(&state, &path))
    }

    pub fn load(&self, path: PathBuf) -> PendingIo<GameState> {
        self.submit(move |store: &dyn SnapshotStore| store.load(&path))
    }

    fn submit<T: Send + 'static>(
        &self,
        work: impl FnOnce(&dyn SnapshotStore) -> Result<T, StorageError> + Send + 'static,
    ) -> PendingIo<T> {
        let (tx, reply) = channel();
        let job: Job = Box::new(move |store: &dyn SnapshotStore| {
            // Caller may have dropped the handle; nothing to report to.
            let _ = tx.send(work(store));
        });
        match &self.jobs {
            Some(jobs) if jobs.send(job).is_ok() => {}
            _ => warn!("Storage worker is gone, request dropped"),
        }
        PendingIo { reply }
    }

    /// Finish every queued request, then stop the thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.jobs.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Storage worker panicked");
            }
        }
    }
}

impl Drop for SnapshotWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for SnapshotWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotWorker")
            .field("running", &self.thread.is_some())
            .finish()
    }
}
