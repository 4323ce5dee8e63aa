//! Store Worker Module
//!
//! The single task that owns store state, and the handle used to reach it.
//!
//! # Flow
//! Gateway → `StoreHandle` (mpsc, one oneshot reply per request) → worker → reply

mod actor;
mod handle;

pub use actor::{spawn_store_worker, COMMAND_QUEUE_DEPTH};
pub use handle::StoreHandle;
