//! Background persistence writer.
//!
//! Session and glossary mutators enqueue their writes here instead of
//! awaiting storage. A single task drains the queue in FIFO order, so writes
//! to the same key are never reordered. Failures are logged and dropped: the
//! in-memory state stays authoritative for the running session.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::repository::{StateKey, StateRepository};

enum WriteCommand {
    Save(StateKey, String),
    Remove(StateKey),
    Flush(oneshot::Sender<()>),
}

impl WriteCommand {
    fn key(&self) -> Option<StateKey> {
        match self {
            Self::Save(key, _) | Self::Remove(key) => Some(*key),
            Self::Flush(_) => None,
        }
    }
}

/// Cloneable handle to the persistence queue.
#[derive(Clone)]
pub struct StateWriter {
    sender: mpsc::UnboundedSender<WriteCommand>,
}

impl StateWriter {
    /// Starts the writer task on the current tokio runtime.
    ///
    /// The task exits once every `StateWriter` clone has been dropped and
    /// the queue is drained.
    pub fn spawn(repository: Arc<dyn StateRepository>) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<WriteCommand>();

        let handle = tokio::spawn(async move {
            while let Some(first) = receiver.recv().await {
                let mut batch = vec![first];
                while let Ok(next) = receiver.try_recv() {
                    batch.push(next);
                }
                apply_batch(repository.as_ref(), batch).await;
            }
            tracing::debug!("State writer stopped");
        });

        (Self { sender }, handle)
    }

    /// Enqueues a write of `value` under `key`.
    pub fn save(&self, key: StateKey, value: impl Into<String>) {
        self.enqueue(WriteCommand::Save(key, value.into()));
    }

    /// Enqueues removal of `key`.
    pub fn remove(&self, key: StateKey) {
        self.enqueue(WriteCommand::Remove(key));
    }

    /// Waits until every write enqueued before this call has been applied.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(WriteCommand::Flush(ack)).is_ok() {
            // A dropped ack means the writer task is gone; nothing left to wait for.
            let _ = done.await;
        }
    }

    fn enqueue(&self, command: WriteCommand) {
        if self.sender.send(command).is_err() {
            tracing::warn!("State writer is gone; dropping persistence write");
        }
    }
}

async fn apply_batch(repository: &dyn StateRepository, batch: Vec<WriteCommand>) {
    let mut pending = Vec::new();
    for command in batch {
        match command {
            WriteCommand::Flush(ack) => {
                apply_writes(repository, std::mem::take(&mut pending)).await;
                // Receiver gone: nothing to acknowledge.
                let _ = ack.send(());
            }
            write => pending.push(write),
        }
    }
    apply_writes(repository, pending).await;
}

/// Applies writes in order, skipping any write superseded later in the same run.
async fn apply_writes(repository: &dyn StateRepository, writes: Vec<WriteCommand>) {
    let keys: Vec<Option<StateKey>> = writes.iter().map(WriteCommand::key).collect();

    for (index, write) in writes.into_iter().enumerate() {
        if keys[index + 1..].contains(&keys[index]) {
            continue;
        }

        let result = match write {
            WriteCommand::Save(key, value) => repository.save(key, value).await,
            WriteCommand::Remove(key) => repository.remove(key).await,
            WriteCommand::Flush(_) => continue,
        };

        if let Err(e) = result {
            tracing::warn!("Failed to persist {:?}: {}", keys[index], e);
        }
    }
}
