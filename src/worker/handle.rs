//! Store Handle
//!
//! Cloneable client side of the store worker. Every request carries its own
//! reply channel, so a caller only ever receives the answer to its own request.

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};

use crate::error::{Result, StoreError};
use crate::store::StoreStats;

/// Request sent to the store worker
#[derive(Debug)]
pub(crate) enum Command {
    Get {
        key: String,
        reply: oneshot::Sender<Result<Bytes>>,
    },
    Delete {
        key: String,
        reply: oneshot::Sender<Result<()>>,
    },
    SetAuto {
        value: Bytes,
        reply: oneshot::Sender<Result<String>>,
    },
    SetAtPath {
        key: String,
        value: Bytes,
        reply: oneshot::Sender<Result<String>>,
    },
    Stats {
        reply: oneshot::Sender<StoreStats>,
    },
}

/// Handle for submitting operations to the store worker.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    commands: mpsc::Sender<Command>,
}

impl StoreHandle {
    pub(crate) fn new(commands: mpsc::Sender<Command>) -> Self {
        Self { commands }
    }

    /// Fetches a bucket's payload.
    pub async fn get(&self, key: impl Into<String>) -> Result<Bytes> {
        let key = key.into();
        self.request(|reply| Command::Get { key, reply }).await?
    }

    /// Deletes a bucket.
    pub async fn delete(&self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        self.request(|reply| Command::Delete { key, reply }).await?
    }

    /// Stores a payload under a generated slug and returns the slug.
    pub async fn set_auto(&self, value: Bytes) -> Result<String> {
        self.request(|reply| Command::SetAuto { value, reply })
            .await?
    }

    /// Stores a payload under `key`, replacing any existing bucket.
    pub async fn set_at_path(&self, key: impl Into<String>, value: Bytes) -> Result<String> {
        let key = key.into();
        self.request(|reply| Command::SetAtPath { key, value, reply })
            .await?
    }

    /// Returns a statistics snapshot.
    pub async fn stats(&self) -> Result<StoreStats> {
        self.request(|reply| Command::Stats { reply }).await
    }

    /// Sends one command and waits for its reply.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|_| StoreError::Unavailable("store worker stopped".into()))?;

        reply_rx
            .await
            .map_err(|_| StoreError::Unavailable("store worker dropped the request".into()))
    }
}
