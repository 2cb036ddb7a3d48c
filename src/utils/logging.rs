// ============================================================================
// Logging Setup
// Subscriber installation for binaries and demos embedding the engine
// ============================================================================

use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Directive used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_DIRECTIVE: &str = "huge_amount=info";

/// Install a global fmt subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set; the existing one
/// is left in place.
pub fn init_logging() -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))
        .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .finish();

    let installed = tracing::subscriber::set_global_default(subscriber).is_ok();
    if installed {
        tracing::debug!("tracing initialized");
    }
    installed
}
