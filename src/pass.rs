//! Reverse-read filter pass.
//!
//! Reads every frame of a source last-to-first, runs the difference equation
//! on each selected channel and appends the results to the output in the
//! order they are produced. The output therefore holds the filtered signal
//! with its time axis reversed; feeding it through a second identical pass
//! restores the original order.

use std::io::Write;

use bytemuck::Zeroable;

use crate::codec::{Sample, write_frame};
use crate::error::{FiltfiltError, Result};
use crate::signal_processing::{ChannelHistory, ChannelMap, Coefficients};
use crate::source::ReverseFrameSource;

/// Outcome of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// Frames read and written
    pub frames: u64,
    pub input_channels: usize,
    pub output_channels: usize,
}

/// Run one pass from `source` into `output`
///
/// `output_name` labels the output in error messages.
///
/// Memory use is one input frame, one output frame and the per-channel
/// history rings, independent of the stream length. The output is written
/// sequentially and never seeked.
///
/// # Errors
/// - `InvalidChannel` if `channel_map` refers past the source's channel count
/// - `Io` on any read, seek or write failure
/// - `NonFiniteOutput` if a produced sample is NaN or infinite
pub fn run_pass<T, S, W>(
    source: &mut S,
    output: &mut W,
    output_name: &str,
    coefficients: &Coefficients,
    channel_map: &ChannelMap,
) -> Result<PassSummary>
where
    T: Sample,
    S: ReverseFrameSource<T>,
    W: Write,
{
    let channel_count = source.channel_count();
    channel_map.validate(channel_count)?;

    let frame_count = source.frame_count();
    log::debug!(
        "Pass over {} frames: {} -> {} channels, na={}, nb={}",
        frame_count,
        channel_count,
        channel_map.len(),
        coefficients.na(),
        coefficients.nb()
    );

    let mut histories: Vec<ChannelHistory<T>> = (0..channel_map.len())
        .map(|_| ChannelHistory::new(coefficients))
        .collect();
    let mut input_frame = vec![T::zeroed(); channel_count];
    let mut output_frame = vec![T::zeroed(); channel_map.len()];

    for reverse_index in 0..frame_count {
        source.read_reversed(reverse_index, &mut input_frame)?;

        for (channel, (&column, history)) in channel_map
            .indices()
            .iter()
            .zip(histories.iter_mut())
            .enumerate()
        {
            let y = coefficients.step(history, input_frame[column]);
            if !y.is_finite() {
                return Err(FiltfiltError::NonFiniteOutput {
                    frame: frame_count - 1 - reverse_index,
                    channel,
                });
            }
            output_frame[channel] = y;
        }

        write_frame(output, &output_frame)
            .map_err(|e| FiltfiltError::io(format!("write to '{}'", output_name), e))?;
    }

    Ok(PassSummary {
        frames: frame_count,
        input_channels: channel_count,
        output_channels: channel_map.len(),
    })
}
