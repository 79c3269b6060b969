//! `dockcheck-recon` — challan-vs-sticker inbound reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded extraction records, returns a
//! classified variance report. No CLI or file IO dependencies. Each pipeline
//! stage consumes the previous stage's output by value and nothing is mutated
//! after construction, so whole runs parallelize trivially.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod report;
pub mod similarity;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{RawItemRecord, ReconInput, ReconciliationReport};
