// ============================================================================
// Domain Models Module
// Caller-facing configuration and the derived-value cache
// ============================================================================

pub mod cache;
pub mod config;

pub use cache::AmountCache;
pub use config::{DisplayConfig, ParseOptions, SymbolPosition};
