use std::fmt;

use serde::Serialize;

use crate::codec::SampleFormat;
use crate::pass::PassSummary;

/// How a finished run is reported on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    None,
}

/// Summary of a zero-phase filtering run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub format: SampleFormat,
    pub frames: u64,
    pub input_channels: usize,
    pub output_channels: usize,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl FilterReport {
    pub fn new(format: SampleFormat, first: &PassSummary, second: &PassSummary) -> Self {
        debug_assert_eq!(first.frames, second.frames);
        let width = format.width() as u64;
        Self {
            format,
            frames: second.frames,
            input_channels: first.input_channels,
            output_channels: second.output_channels,
            bytes_read: first.frames * first.input_channels as u64 * width,
            bytes_written: second.frames * second.output_channels as u64 * width,
        }
    }

    /// Render in the requested format, `None` when nothing should be printed
    pub fn render(&self, format: ReportFormat) -> serde_json::Result<Option<String>> {
        match format {
            ReportFormat::Text => Ok(Some(self.to_string())),
            ReportFormat::Json => serde_json::to_string_pretty(self).map(Some),
            ReportFormat::None => Ok(None),
        }
    }
}

impl fmt::Display for FilterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Filtered {} frames ({}): {} -> {} channels, {} bytes read, {} bytes written",
            self.frames,
            self.format,
            self.input_channels,
            self.output_channels,
            self.bytes_read,
            self.bytes_written
        )
    }
}
