// ============================================================================
// Utilities Module
// Optional helpers for binaries embedding the engine
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::{init_logging, DEFAULT_DIRECTIVE};
