//! Device cache trait.
//!
//! The device cache holds the single most recently known profile snapshot on
//! the current device. It is read synchronously before any remote call
//! completes (so the form never flashes blank) and written through on every
//! field edit, which makes unsaved edits durable across restarts.

use crate::error::Result;
use crate::profile::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached profile snapshot with the moment it was written.
///
/// The timestamp is not consulted by the load logic today; it exists so an
/// implementation can layer staleness checks or cross-instance invalidation
/// on top without changing callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedProfile {
    pub cached_at: DateTime<Utc>,
    pub profile: Profile,
}

impl CachedProfile {
    pub fn now(profile: Profile) -> Self {
        Self {
            cached_at: Utc::now(),
            profile,
        }
    }
}

/// Synchronous local persistence of the last-known profile snapshot under a
/// fixed cache identifier.
///
/// Cache failures are always non-fatal: callers swallow the error, log it,
/// and proceed as if the cache were empty. Implementations must never panic
/// on corrupt content.
pub trait DeviceCache: Send + Sync {
    /// Reads the cached snapshot, `None` when nothing has been cached yet.
    fn read(&self) -> Result<Option<CachedProfile>>;

    /// Replaces the cached snapshot with the given profile.
    fn write(&self, profile: &Profile) -> Result<()>;
}
