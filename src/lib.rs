pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod matchwise;
pub mod outcomes;
pub mod ratios;
pub mod reorder;
pub mod report;
pub mod scoring;
pub mod season;
pub mod team_picks;

pub use error::{PoolError, Result};
pub use season::{Fixture, MatchResult, Outcome, Predictions, Season};

/// Installs the fmt subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prediction_pool=info,warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
