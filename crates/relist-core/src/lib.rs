pub mod config;
pub mod constants;
pub mod identity;
pub mod models;
pub mod store;
pub mod tracing_setup;

#[cfg(test)]
pub(crate) mod proptest_generators;

// Re-export the session entry points at crate root for convenience
pub use config::CoreConfig;
pub use identity::{IdentityProvider, StaticIdentity, UserInfo};
pub use store::{ConversationStore, Dataset, MessagingSession};
