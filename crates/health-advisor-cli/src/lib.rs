//! health-advisor-cli: terminal chat client for the health advisor
//!
//! [`AdviceClient`] speaks the `POST /api/health-advice` contract and
//! [`ChatSession`] keeps the per-session message history and the selected
//! report. The `health-chat` binary wraps both in an interactive prompt.

pub mod client;
pub mod session;

pub use client::{AdviceClient, TransportError, DEFAULT_URL};
pub use session::{ChatSession, TurnOutcome};

/// Initialize tracing for the chat binary
///
/// Logs go to stderr at `warn` unless `RUST_LOG` is set; `verbose` raises
/// the client crates to `debug`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "health_advisor_cli=debug,reqwest=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}
