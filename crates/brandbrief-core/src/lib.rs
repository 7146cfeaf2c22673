pub mod cache;
pub mod error;
pub mod generation;
pub mod identity;
pub mod module;
pub mod profile;
pub mod wizard;

// Re-export common error type
pub use error::BriefError;
