use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FiltfiltError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported data type: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Invalid coefficient '{0}'")]
    InvalidCoefficient(String),

    #[error("Invalid channel: {channel} (expected 1..={channel_count})")]
    InvalidChannel { channel: i64, channel_count: usize },

    #[error("At least one FIR coefficient must be provided")]
    NoFirCoefficients,

    #[error("Could not {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed input: {byte_len} bytes is not a multiple of the {frame_size}-byte frame size")]
    MalformedInput { byte_len: u64, frame_size: u64 },

    #[error("Leading denominator coefficient a[0] must be nonzero")]
    ZeroLeadingDenominator,

    #[error("Coefficient {name}[{index}] is not finite: {value}")]
    NonFiniteCoefficient {
        name: &'static str,
        index: usize,
        value: f64,
    },

    #[error("Filter output is not finite at frame {frame}, channel {channel}")]
    NonFiniteOutput { frame: u64, channel: usize },
}

impl FiltfiltError {
    /// Wrap an I/O error with a description of the failed operation
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FiltfiltError>;
