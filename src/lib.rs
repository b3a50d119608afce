//! Bankscope turns a personal bank-account ledger export into JSON-formatted
//! analytical reports: dashboard and events pages, cashback-oriented category
//! rankings, and rolling three-month spending breakdowns.

pub mod analysis;
pub mod cli;
pub mod errors;
pub mod ledger;
pub mod market;
pub mod pages;
pub mod reports;
pub mod settings;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Bankscope tracing initialized.");
    });
}

/// Installs the global tracing subscriber with sensible defaults.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("bankscope=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
