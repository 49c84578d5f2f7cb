pub mod aggregate;
pub mod args;
pub mod client;
pub mod error;
pub mod pipeline;
pub mod records;
pub mod utils;

pub use aggregate::aggregate;
pub use args::Args;
pub use client::ApiClient;
pub use error::{EtlError, Result};
pub use pipeline::run_etl;
pub use records::{AggregationResult, LoginRecord, SubmissionPayload};
