//! Infrastructure adapters: file-backed persistence, path management,
//! identity resolvers, and secret storage.

pub mod device_cache;
pub mod identity;
pub mod paths;
pub mod profile_store;
pub mod secret;

pub use device_cache::JsonFileDeviceCache;
pub use identity::{SingleUserIdentityResolver, TokenFileIdentityResolver};
pub use paths::BriefPaths;
pub use profile_store::DirProfileStore;
pub use secret::{OpenAiSecret, SecretConfig, SecretStorage};
