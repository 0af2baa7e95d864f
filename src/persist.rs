
use std::sync::Arc;
use std::time::Duration;

use log::{error, trace};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::storage::{CollectionSlot, StorageError};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Pending,
    Saved,
}

/// Coalesces bursts of edits into one storage write. Edits go through
/// the debounced [`schedule`](PersistenceScheduler::schedule) path;
/// structure- and security-affecting mutations go through
/// [`commit_now`](PersistenceScheduler::commit_now), which must not be
/// lost to a session ending while the timer runs.
///
/// There is a single pending-timer slot: a newer write always cancels
/// and fully supersedes an older one.
pub struct PersistenceScheduler {
    slot: Arc<dyn CollectionSlot>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    status: watch::Sender<SaveStatus>,
}

impl PersistenceScheduler {
    pub fn new(
        slot: Arc<dyn CollectionSlot>,
        delay: Duration,
    ) -> PersistenceScheduler {
        let (status, _) = watch::channel(SaveStatus::Idle);
        PersistenceScheduler { slot, delay, pending: None, status }
    }

    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.status.subscribe()
    }

    /// Trailing-edge debounce: the commit lands once the quiet period
    /// elapses after the most recent call.
    pub fn schedule(&mut self, encoded: String) {
        self.cancel_pending();
        self.status.send_replace(SaveStatus::Pending);
        trace!("scheduling a commit in {:?}", self.delay);
        let slot = Arc::clone(&self.slot);
        let status = self.status.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match slot.store(&encoded).await {
                Ok(()) => {
                    status.send_replace(SaveStatus::Saved);
                },
                Err(e) => error!("debounced commit failed: {e}"),
            }
        }));
    }

    pub async fn commit_now(
        &mut self,
        encoded: String,
    ) -> Result<(), StorageError> {
        self.cancel_pending();
        match self.slot.store(&encoded).await {
            Ok(()) => {
                self.status.send_replace(SaveStatus::Saved);
                Ok(())
            },
            Err(e) => {
                error!("immediate commit failed: {e}");
                Err(e)
            },
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                trace!("superseding the pending commit");
            }
            handle.abort();
        }
    }
}

impl Drop for PersistenceScheduler {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
