//! CLI command implementations.

pub mod completions;
pub mod indicators;
pub mod ingest;
pub mod init;
pub mod new;

// Re-export command handlers
pub use completions::completions;
pub use indicators::indicators;
pub use ingest::ingest;
pub use init::init;
pub use new::new_obra;
