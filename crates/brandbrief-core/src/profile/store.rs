//! Profile store trait.
//!
//! Defines the interface for authoritative profile persistence.

use super::model::Profile;
use crate::error::Result;

/// An abstract store for profile documents, keyed by the owning user's
/// opaque identifier.
///
/// This trait decouples the application's core logic from the specific
/// storage mechanism (directory of JSON documents, database, remote API).
/// The unit of persistence is always the whole profile document; there is
/// exactly one document per user.
///
/// # Implementation Notes
///
/// `upsert` must be idempotent: submitting the same payload twice must not
/// create a duplicate record and must leave the stored document equal to the
/// payload. No optimistic-concurrency token is used; concurrent upserts for
/// the same user resolve last-write-wins.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Retrieves the stored profile for a user, or `None` when no document
    /// exists yet.
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Creates or replaces the user's profile document and returns the
    /// persisted value.
    async fn upsert(&self, user_id: &str, profile: &Profile) -> Result<Profile>;
}
