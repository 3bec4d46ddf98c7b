//! Filter configuration.
//!
//! A configuration can come from the positional token grammar used on the
//! command line:
//!
//! ```text
//! format channel_count [ selected channels ... ] a [ AR coefficients ... ] b [ FIR coefficients ... ]
//! ```
//!
//! or from a TOML file:
//!
//! ```toml
//! format = "float32"
//! channels = 3
//! select = [2, 1]
//! a = [-0.9]
//! b = [0.05, 0.05]
//! ```
//!
//! In both forms `a` lists the AR coefficients `a[1] a[2] ...`; `a[0]` is 1.0
//! unless the TOML file sets `a0`.
//!
//! # Example
//! ```
//! use filtfilt::config::FilterConfig;
//!
//! let config = FilterConfig::from_tokens(&["float64", "2", "a", "-0.5", "b", "1"]).unwrap();
//! assert_eq!(config.coefficients().unwrap().a(), &[1.0, -0.5]);
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::codec::SampleFormat;
use crate::error::{FiltfiltError, Result};
use crate::signal_processing::{ChannelMap, Coefficients};

/// Complete description of one filtering run
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Sample element width
    pub format: SampleFormat,
    /// Channels per input frame
    pub channel_count: usize,
    /// 1-based channels to keep, in output order; empty keeps all
    pub selected_channels: Vec<usize>,
    /// Leading denominator coefficient `a[0]`
    pub leading_denominator: f64,
    /// AR coefficients `a[1]`, `a[2]`, ...
    pub ar_coefficients: Vec<f64>,
    /// FIR coefficients `b[0]`, `b[1]`, ...
    pub fir_coefficients: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    format: String,
    channels: usize,
    #[serde(default)]
    select: Vec<usize>,
    #[serde(default = "default_leading_denominator")]
    a0: f64,
    #[serde(default)]
    a: Vec<f64>,
    #[serde(default)]
    b: Vec<f64>,
}

fn default_leading_denominator() -> f64 {
    1.0
}

/// Which list the numeric tokens currently extend
#[derive(Clone, Copy)]
enum TokenList {
    Channels,
    Ar,
    Fir,
}

impl FilterConfig {
    /// Parse the positional token grammar
    ///
    /// The single-character tokens `a` and `b` switch which coefficient list
    /// the following numbers extend; they may appear in any order and more
    /// than once. Numbers before the first marker are channel numbers.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let tokens: Vec<&str> = tokens.iter().map(|token| token.as_ref()).collect();
        let mut tokens = tokens.into_iter();

        let format = tokens
            .next()
            .ok_or_else(|| FiltfiltError::Config("missing data format".to_string()))?
            .parse::<SampleFormat>()?;
        let channel_count = tokens
            .next()
            .ok_or_else(|| FiltfiltError::Config("missing channel count".to_string()))
            .and_then(|token| parse_count(token, format))?;

        let mut config = Self {
            format,
            channel_count,
            selected_channels: Vec::new(),
            leading_denominator: 1.0,
            ar_coefficients: Vec::new(),
            fir_coefficients: Vec::new(),
        };

        let mut list = TokenList::Channels;
        for token in tokens {
            match token {
                "a" => list = TokenList::Ar,
                "b" => list = TokenList::Fir,
                _ => match list {
                    TokenList::Channels => config
                        .selected_channels
                        .push(parse_channel(token, channel_count)?),
                    TokenList::Ar => config.ar_coefficients.push(parse_coefficient(token)?),
                    TokenList::Fir => config.fir_coefficients.push(parse_coefficient(token)?),
                },
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let toml: TomlConfig = toml::from_str(content)
            .map_err(|e| FiltfiltError::Config(format!("invalid filter file: {}", e)))?;
        let config = Self {
            format: toml.format.parse()?,
            channel_count: toml.channels,
            selected_channels: toml.select,
            leading_denominator: toml.a0,
            ar_coefficients: toml.a,
            fir_coefficients: toml.b,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FiltfiltError::io(format!("read filter file '{}'", path.display()), e)
        })?;
        Self::from_toml_str(&content)
    }

    /// Check everything that can be checked before touching any file
    pub fn validate(&self) -> Result<()> {
        self.format.frame_size(self.channel_count)?;
        if let Some(&channel) = self
            .selected_channels
            .iter()
            .find(|&&c| c == 0 || c > self.channel_count)
        {
            return Err(FiltfiltError::InvalidChannel {
                channel: channel as i64,
                channel_count: self.channel_count,
            });
        }
        self.coefficients()?;
        Ok(())
    }

    /// Full denominator `[a0, a1, ...]` and numerator
    pub fn coefficients(&self) -> Result<Coefficients> {
        let mut a = Vec::with_capacity(self.ar_coefficients.len() + 1);
        a.push(self.leading_denominator);
        a.extend_from_slice(&self.ar_coefficients);
        Coefficients::new(a, self.fir_coefficients.clone())
    }

    /// Zero-based selection map for the first pass
    pub fn channel_map(&self) -> Result<ChannelMap> {
        ChannelMap::from_one_based(&self.selected_channels, self.channel_count)
    }
}

fn parse_count(token: &str, format: SampleFormat) -> Result<usize> {
    let count: i64 = token
        .trim()
        .parse()
        .map_err(|_| FiltfiltError::InvalidNumber(token.to_string()))?;
    if count <= 0 {
        return Err(FiltfiltError::Config(format!(
            "channel count must be positive, got {}",
            count
        )));
    }
    let count =
        usize::try_from(count).map_err(|_| FiltfiltError::InvalidNumber(token.to_string()))?;
    format.frame_size(count)?;
    Ok(count)
}

fn parse_channel(token: &str, channel_count: usize) -> Result<usize> {
    let channel: i64 = token
        .trim()
        .parse()
        .map_err(|_| FiltfiltError::InvalidNumber(token.to_string()))?;
    match usize::try_from(channel) {
        Ok(c) if (1..=channel_count).contains(&c) => Ok(c),
        _ => Err(FiltfiltError::InvalidChannel {
            channel,
            channel_count,
        }),
    }
}

fn parse_coefficient(token: &str) -> Result<f64> {
    token
        .trim()
        .parse()
        .map_err(|_| FiltfiltError::InvalidCoefficient(token.to_string()))
}
