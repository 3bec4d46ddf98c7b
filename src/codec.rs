//! Sample codec for raw interleaved frames.
//!
//! Frames are stored back to back in native byte order with no header. The
//! element width is chosen once per run through [`SampleFormat`]; after that
//! every read and write is statically dispatched through the [`Sample`] trait.

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use bytemuck::Pod;
use serde::Serialize;

use crate::error::{FiltfiltError, Result};

/// Largest frame accepted, in bytes
pub const MAX_FRAME_SIZE: usize = 1 << 20;

/// On-disk sample element width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// 4-byte IEEE 754 float
    Float32,
    /// 8-byte IEEE 754 float
    Float64,
}

impl SampleFormat {
    /// Size of one sample element in bytes
    pub fn width(&self) -> usize {
        match self {
            SampleFormat::Float32 => std::mem::size_of::<f32>(),
            SampleFormat::Float64 => std::mem::size_of::<f64>(),
        }
    }

    /// Most channels a frame may hold without exceeding [`MAX_FRAME_SIZE`]
    pub fn max_channels(&self) -> usize {
        MAX_FRAME_SIZE / self.width()
    }

    /// Size of one frame of `channel_count` samples in bytes
    ///
    /// # Errors
    /// `Config` if `channel_count` is zero or the frame would exceed
    /// [`MAX_FRAME_SIZE`].
    pub fn frame_size(&self, channel_count: usize) -> Result<usize> {
        match self.width().checked_mul(channel_count) {
            Some(size) if channel_count > 0 && size <= MAX_FRAME_SIZE => Ok(size),
            _ => Err(FiltfiltError::Config(format!(
                "channel count must be between 1 and {} for {}, got {}",
                self.max_channels(),
                self,
                channel_count
            ))),
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleFormat::Float32 => write!(f, "float32"),
            SampleFormat::Float64 => write!(f, "float64"),
        }
    }
}

impl FromStr for SampleFormat {
    type Err = FiltfiltError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("float32") {
            Ok(SampleFormat::Float32)
        } else if s.eq_ignore_ascii_case("float64") {
            Ok(SampleFormat::Float64)
        } else {
            Err(FiltfiltError::UnsupportedFormat(s.to_string()))
        }
    }
}

/// A sample element type that can be stored in a raw frame file
///
/// Filter arithmetic is carried out in `f64`; values are narrowed back to the
/// element type when they are written or stored in history.
pub trait Sample: Pod + Default + fmt::Debug + Send + 'static {
    /// Format tag matching this element type
    const FORMAT: SampleFormat;

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;

    fn is_finite(self) -> bool {
        self.to_f64().is_finite()
    }
}

impl Sample for f32 {
    const FORMAT: SampleFormat = SampleFormat::Float32;

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    const FORMAT: SampleFormat = SampleFormat::Float64;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Read exactly one frame (`frame.len()` samples) from `reader`
pub fn read_frame<T: Sample, R: Read>(reader: &mut R, frame: &mut [T]) -> io::Result<()> {
    reader.read_exact(bytemuck::cast_slice_mut(frame))
}

/// Write exactly one frame (`frame.len()` samples) to `writer`
pub fn write_frame<T: Sample, W: Write>(writer: &mut W, frame: &[T]) -> io::Result<()> {
    writer.write_all(bytemuck::cast_slice(frame))
}
