//! Eviction Policy Module
//!
//! Decides how many of the oldest entries must go before an insert.

// == Store Limits ==
/// Caps enforced on every insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    /// Maximum number of stored entries
    pub max_entries: usize,
    /// Maximum aggregate payload size in bytes
    pub max_size: u64,
}

// == Evictions Needed ==
/// Returns how many entries to drop from the front of the queue so that an
/// incoming payload of `incoming` bytes fits under both caps.
///
/// `sizes` yields entry sizes oldest first; `count` and `total` describe the
/// current queue. Size pressure is resolved first. If it evicts nothing but
/// the queue is already at the entry cap, the single oldest entry goes.
///
/// The caller must have rejected payloads larger than `limits.max_size`.
pub fn evictions_needed<I>(
    sizes: I,
    count: usize,
    total: u64,
    incoming: u64,
    limits: StoreLimits,
) -> usize
where
    I: IntoIterator<Item = u64>,
{
    debug_assert!(incoming <= limits.max_size, "oversize payload reached eviction");

    let mut sizes = sizes.into_iter();
    let mut del_count = 0;
    let mut del_size = 0u64;

    while total - del_size + incoming > limits.max_size {
        let Some(size) = sizes.next() else {
            break;
        };
        del_size += size;
        del_count += 1;
    }

    if del_count == 0 && count >= limits.max_entries {
        del_count = 1;
    }

    del_count
}
