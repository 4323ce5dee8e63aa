//! Store Worker Task
//!
//! Background task that owns the bucket store, executes one operation at a
//! time, and expires entries as their deadlines pass.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use super::handle::{Command, StoreHandle};
use crate::store::BucketStore;

/// Maximum number of requests queued ahead of the worker.
pub const COMMAND_QUEUE_DEPTH: usize = 1024;

/// Spawns the store worker and returns a handle for talking to it.
///
/// The worker runs until every clone of the returned handle is dropped.
/// Between requests it removes expired entries, then waits for whichever
/// comes first: the next request or the next expiry deadline.
///
/// # Returns
/// The request handle and the task's JoinHandle, which can be awaited or
/// aborted during shutdown.
///
/// # Example
/// ```ignore
/// let store = BucketStore::from_config(&config)?;
/// let (handle, worker) = spawn_store_worker(store);
/// let slug = handle.set_auto(Bytes::from_static(b"hello")).await?;
/// ```
pub fn spawn_store_worker(store: BucketStore) -> (StoreHandle, JoinHandle<()>) {
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
    let limits = store.limits();

    let worker = tokio::spawn(async move {
        info!(
            "Starting store worker: max_entries={}, max_size={} bytes",
            limits.max_entries, limits.max_size
        );
        run(store, commands_rx).await;
        info!("Store worker stopped");
    });

    (StoreHandle::new(commands_tx), worker)
}

async fn run(mut store: BucketStore, mut commands: mpsc::Receiver<Command>) {
    loop {
        let expired = store.expire_due(Instant::now());
        if expired > 0 {
            debug!("TTL expiry: removed {} buckets", expired);
        }

        let command = match store.next_expiry() {
            Some(deadline) => tokio::select! {
                command = commands.recv() => command,
                _ = sleep_until(deadline) => continue,
            },
            None => commands.recv().await,
        };

        match command {
            Some(command) => execute(&mut store, command),
            None => break,
        }
    }
}

/// Runs one command to completion and answers it.
fn execute(store: &mut BucketStore, command: Command) {
    let delivered = match command {
        Command::Get { key, reply } => reply.send(store.get(&key)).is_ok(),
        Command::Delete { key, reply } => reply.send(store.delete(&key)).is_ok(),
        Command::SetAuto { value, reply } => {
            reply.send(store.set_auto(value, Instant::now())).is_ok()
        }
        Command::SetAtPath { key, value, reply } => {
            reply.send(store.set_at_path(key, value, Instant::now())).is_ok()
        }
        Command::Stats { reply } => reply.send(store.stats()).is_ok(),
    };

    if !delivered {
        debug!("Caller went away before its reply was delivered");
    }
}
