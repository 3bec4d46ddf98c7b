use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use crate::codec::{Sample, SampleFormat};
use crate::config::FilterConfig;
use crate::error::{FiltfiltError, Result};
use crate::pass::{PassSummary, run_pass};
use crate::report::FilterReport;
use crate::signal_processing::{ChannelMap, Coefficients};
use crate::source::{ReverseFrameSource, SeekingFrameSource};

const TEMPORARY_FILE: &str = "temporary file";

/// Zero-phase forward-backward filter over raw sample streams
///
/// Runs the reverse-read pass twice: first from the input into an
/// intermediate stream while selecting channels, then from the intermediate
/// stream into the output with every retained channel passed through. The
/// two time reversals cancel, so the output is in the input's order.
pub struct ZeroPhaseFilter {
    format: SampleFormat,
    channel_count: usize,
    coefficients: Coefficients,
    selection: ChannelMap,
}

impl ZeroPhaseFilter {
    /// Build from a validated configuration
    pub fn new(config: &FilterConfig) -> Result<Self> {
        config.validate()?;
        Self::from_parts(
            config.format,
            config.channel_count,
            config.coefficients()?,
            config.channel_map()?,
        )
    }

    pub fn from_parts(
        format: SampleFormat,
        channel_count: usize,
        coefficients: Coefficients,
        selection: ChannelMap,
    ) -> Result<Self> {
        format.frame_size(channel_count)?;
        selection.validate(channel_count)?;
        if selection.is_empty() {
            return Err(FiltfiltError::Config(
                "at least one channel must be selected".to_string(),
            ));
        }
        Ok(Self {
            format,
            channel_count,
            coefficients,
            selection,
        })
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Number of channels in the output
    pub fn output_channels(&self) -> usize {
        self.selection.len()
    }

    /// Filter `input_path` into `output_path`
    ///
    /// The intermediate result lives in an anonymous temporary file. The
    /// output file is only created once the first pass has succeeded, so a
    /// malformed or unreadable input leaves an existing output untouched.
    pub fn filter_files(&self, input_path: &Path, output_path: &Path) -> Result<FilterReport> {
        match self.format {
            SampleFormat::Float32 => self.filter_files_as::<f32>(input_path, output_path),
            SampleFormat::Float64 => self.filter_files_as::<f64>(input_path, output_path),
        }
    }

    /// Filter between arbitrary streams, using `scratch` for the intermediate
    ///
    /// `scratch` must be empty and positioned at its start.
    pub fn filter_streams<R, S, W>(
        &self,
        input: R,
        scratch: S,
        output: &mut W,
    ) -> Result<FilterReport>
    where
        R: Read + Seek,
        S: Read + Write + Seek,
        W: Write,
    {
        match self.format {
            SampleFormat::Float32 => {
                self.filter_streams_as::<f32, _, _, _>(input, scratch, output)
            }
            SampleFormat::Float64 => {
                self.filter_streams_as::<f64, _, _, _>(input, scratch, output)
            }
        }
    }

    fn filter_files_as<T: Sample>(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<FilterReport> {
        let input = File::open(input_path).map_err(|e| {
            FiltfiltError::io(format!("open input file '{}'", input_path.display()), e)
        })?;
        let scratch =
            tempfile::tempfile().map_err(|e| FiltfiltError::io("create temporary file", e))?;

        let input_name = input_path.display().to_string();
        let output_name = output_path.display().to_string();

        let (intermediate, first) =
            self.first_pass::<T, _, _>(input, &input_name, scratch, TEMPORARY_FILE)?;
        intermediate
            .sync_data()
            .map_err(|e| FiltfiltError::io("flush temporary file", e))?;

        let output = File::create(output_path).map_err(|e| {
            FiltfiltError::io(format!("create output file '{}'", output_name), e)
        })?;
        let mut writer = BufWriter::new(output);
        let second = self.second_pass::<T, _, _>(
            intermediate,
            TEMPORARY_FILE,
            &mut writer,
            &output_name,
        )?;
        writer
            .flush()
            .map_err(|e| FiltfiltError::io(format!("write to '{}'", output_name), e))?;

        Ok(FilterReport::new(T::FORMAT, &first, &second))
    }

    fn filter_streams_as<T, R, S, W>(
        &self,
        input: R,
        scratch: S,
        output: &mut W,
    ) -> Result<FilterReport>
    where
        T: Sample,
        R: Read + Seek,
        S: Read + Write + Seek,
        W: Write,
    {
        let (intermediate, first) =
            self.first_pass::<T, _, _>(input, "input", scratch, "scratch")?;
        let second = self.second_pass::<T, _, _>(intermediate, "scratch", output, "output")?;
        output
            .flush()
            .map_err(|e| FiltfiltError::io("flush output", e))?;
        Ok(FilterReport::new(T::FORMAT, &first, &second))
    }

    /// Input -> intermediate, selecting channels
    fn first_pass<T, R, S>(
        &self,
        input: R,
        input_name: &str,
        scratch: S,
        scratch_name: &str,
    ) -> Result<(S, PassSummary)>
    where
        T: Sample,
        R: Read + Seek,
        S: Write + Seek,
    {
        let mut source =
            SeekingFrameSource::<R, T>::new(input, self.channel_count, input_name)?;
        log::info!(
            "Backward pass: {} frames, {} -> {} channels",
            source.frame_count(),
            self.channel_count,
            self.selection.len()
        );

        let mut writer = BufWriter::new(scratch);
        let summary = run_pass(
            &mut source,
            &mut writer,
            scratch_name,
            &self.coefficients,
            &self.selection,
        )?;
        let scratch = writer.into_inner().map_err(|e| {
            FiltfiltError::io(format!("write to '{}'", scratch_name), e.into_error())
        })?;
        log::debug!("Intermediate holds {} frames", summary.frames);
        Ok((scratch, summary))
    }

    /// Intermediate -> output, all retained channels in order
    fn second_pass<T, S, W>(
        &self,
        intermediate: S,
        intermediate_name: &str,
        output: &mut W,
        output_name: &str,
    ) -> Result<PassSummary>
    where
        T: Sample,
        S: Read + Seek,
        W: Write,
    {
        let channels = self.selection.len();
        let mut source =
            SeekingFrameSource::<S, T>::new(intermediate, channels, intermediate_name)?;
        log::info!(
            "Forward pass: {} frames, {} channels",
            source.frame_count(),
            channels
        );
        run_pass(
            &mut source,
            output,
            output_name,
            &self.coefficients,
            &ChannelMap::identity(channels),
        )
    }
}
