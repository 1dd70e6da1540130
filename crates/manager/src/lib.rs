//! This library contains the validator set manager, which drives the lifecycle of validators on
//! the L1 rollup contracts.

pub use config::{ManagerConfig, DEFAULT_CONFIRMATION_TIMEOUT};
mod config;

pub use error::ManagerError;
mod error;

mod manager;
pub use manager::{Admission, FastForwardOutcome, PruneOutcome, ValidatorSetManager};

pub use metrics::ManagerMetrics;
mod metrics;
