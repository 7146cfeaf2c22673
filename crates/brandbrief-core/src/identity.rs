//! Identity resolution trait.
//!
//! Identity and session mechanics live outside this crate; all the core
//! needs is an opaque, stable identifier for the owning user, or nothing.

use serde::{Deserialize, Serialize};

/// The opaque identity of the current user.
///
/// The id is the only key ever used against the profile store. It is stable
/// across sessions for the same user and carries no other meaning here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Resolves the current user from whatever credential the delivery layer
/// carries (a bearer token for the HTTP surface, nothing for the local CLI).
///
/// Every profile operation fails with `Unauthorized` when resolution
/// returns `None`.
#[async_trait::async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn current_user(&self, bearer_token: Option<&str>) -> Option<UserIdentity>;
}
