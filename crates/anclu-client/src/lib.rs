pub mod cache;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod dataset;
pub mod error;
pub mod period;
pub mod report;

pub use cache::DatasetCache;
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
