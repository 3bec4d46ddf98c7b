pub mod codec;
pub mod config;
pub mod error;
pub mod pass;
pub mod processing;
pub mod report;
pub mod signal_processing;
pub mod source;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use codec::{Sample, SampleFormat};
pub use config::FilterConfig;
pub use error::{FiltfiltError, Result};
pub use processing::ZeroPhaseFilter;
pub use report::{FilterReport, ReportFormat};
