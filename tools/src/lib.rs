pub mod observability;
pub mod toml;

use rustls::crypto::ring;
#[cfg(feature = "derive")]
pub use tools_derive::main;

use crate::observability::setup_tracing;

/// Initializes the application with essential setup routines.
///
/// Call this before anything else in `main`: it installs the panic hook,
/// the tracing subscriber and the TLS crypto provider.
///
/// # Errors
///
/// Returns an error if tracing or the rustls provider cannot be installed.
///
/// # Example
///
/// ```no_run
/// tools::setup_application(env!("CARGO_PKG_NAME")).expect("setup failed");
/// ```
pub fn setup_application(name: &'static str) -> anyhow::Result<()> {
    setup_panic_hook();
    setup_tracing(name)?;
    setup_tls_provider()
}

/// Logs panics through `tracing`, with their source location when known, and
/// exits with code 1.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Some(location) = panic_info.location() {
            tracing::error!(
                message = %panic_info,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            );
        } else {
            tracing::error!(message = %panic_info);
        }

        #[allow(clippy::exit)]
        std::process::exit(1);
    }))
}

/// Selects ring as the process-wide rustls crypto provider.
///
/// rustls 0.23 cannot always pick a provider on its own and panics during the
/// first TLS handshake otherwise.
pub fn setup_tls_provider() -> anyhow::Result<()> {
    ring::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install rustls crypto provider: {e:?}"))
}
