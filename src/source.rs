//! Reversible frame sources.
//!
//! A pass consumes its input last frame first. Sources hide how that is
//! done: [`SeekingFrameSource`] seeks around a file one frame at a time,
//! [`MemoryFrameSource`] indexes a slice.

use std::io::{Read, Seek, SeekFrom};
use std::marker::PhantomData;

use crate::codec::{Sample, read_frame};
use crate::error::{FiltfiltError, Result};

/// Random access to frames counted from the end of a stream
pub trait ReverseFrameSource<T: Sample> {
    /// Samples per frame
    fn channel_count(&self) -> usize;

    /// Total number of frames
    fn frame_count(&self) -> u64;

    /// Read the frame `reverse_index` positions before the end
    ///
    /// Index 0 is the last frame, `frame_count() - 1` the first.
    fn read_reversed(&mut self, reverse_index: u64, frame: &mut [T]) -> Result<()>;
}

/// Frame source over any seekable byte stream
///
/// Never buffers more than the single frame being read. `name` labels the
/// stream in error messages, usually the file path.
pub struct SeekingFrameSource<R, T> {
    inner: R,
    name: String,
    channel_count: usize,
    frame_count: u64,
    frame_size: u64,
    _sample: PhantomData<T>,
}

impl<R: Read + Seek, T: Sample> SeekingFrameSource<R, T> {
    /// Measure the stream and check that it holds whole frames
    ///
    /// # Errors
    /// - `Config` if `channel_count` is zero or too large
    /// - `Io` if the stream cannot be measured
    /// - `MalformedInput` if the byte length is not a multiple of the frame size
    pub fn new(mut inner: R, channel_count: usize, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let frame_size = T::FORMAT.frame_size(channel_count)? as u64;
        let byte_len = inner
            .seek(SeekFrom::End(0))
            .map_err(|e| FiltfiltError::io(format!("calculate length of '{}'", name), e))?;
        if byte_len % frame_size != 0 {
            return Err(FiltfiltError::MalformedInput {
                byte_len,
                frame_size,
            });
        }

        let frame_count = byte_len / frame_size;
        log::debug!(
            "'{}' holds {} frames of {} x {} ({} bytes)",
            name,
            frame_count,
            channel_count,
            T::FORMAT,
            byte_len
        );

        Ok(Self {
            inner,
            name,
            channel_count,
            frame_count,
            frame_size,
            _sample: PhantomData,
        })
    }
}

impl<R: Read + Seek, T: Sample> ReverseFrameSource<T> for SeekingFrameSource<R, T> {
    fn channel_count(&self) -> usize {
        self.channel_count
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn read_reversed(&mut self, reverse_index: u64, frame: &mut [T]) -> Result<()> {
        debug_assert!(reverse_index < self.frame_count);
        debug_assert_eq!(frame.len(), self.channel_count);

        let offset = (self.frame_count - 1 - reverse_index) * self.frame_size;
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(|e| FiltfiltError::io(format!("seek in '{}'", self.name), e))?;
        read_frame(&mut self.inner, frame)
            .map_err(|e| FiltfiltError::io(format!("read from '{}'", self.name), e))
    }
}

/// Frame source over interleaved samples held in memory
pub struct MemoryFrameSource<'a, T> {
    samples: &'a [T],
    channel_count: usize,
}

impl<'a, T: Sample> MemoryFrameSource<'a, T> {
    /// Wrap interleaved samples
    ///
    /// # Errors
    /// - `Config` if `channel_count` is zero or too large
    /// - `MalformedInput` if `samples.len()` is not a multiple of `channel_count`
    pub fn new(samples: &'a [T], channel_count: usize) -> Result<Self> {
        let frame_size = T::FORMAT.frame_size(channel_count)? as u64;
        if samples.len() % channel_count != 0 {
            return Err(FiltfiltError::MalformedInput {
                byte_len: samples.len() as u64 * T::FORMAT.width() as u64,
                frame_size,
            });
        }
        Ok(Self {
            samples,
            channel_count,
        })
    }
}

impl<T: Sample> ReverseFrameSource<T> for MemoryFrameSource<'_, T> {
    fn channel_count(&self) -> usize {
        self.channel_count
    }

    fn frame_count(&self) -> u64 {
        (self.samples.len() / self.channel_count) as u64
    }

    fn read_reversed(&mut self, reverse_index: u64, frame: &mut [T]) -> Result<()> {
        let index = self.frame_count() - 1 - reverse_index;
        let start = index as usize * self.channel_count;
        frame.copy_from_slice(&self.samples[start..start + self.channel_count]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::write_frame;
    use std::io::{self, Cursor};

    fn encode(samples: &[f32]) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_frame(&mut bytes, samples).unwrap();
        bytes
    }

    #[test]
    fn test_seeking_source_reads_backwards() {
        let bytes = encode(&[1.0, 10.0, 2.0, 20.0, 3.0, 30.0]);
        let mut source =
            SeekingFrameSource::<_, f32>::new(Cursor::new(bytes), 2, "in.raw").unwrap();
        assert_eq!(source.frame_count(), 3);

        let mut frame = [0.0f32; 2];
        let mut seen = Vec::new();
        for r in 0..source.frame_count() {
            source.read_reversed(r, &mut frame).unwrap();
            seen.push(frame);
        }
        assert_eq!(seen, vec![[3.0, 30.0], [2.0, 20.0], [1.0, 10.0]]);
    }

    #[test]
    fn test_seeking_source_empty() {
        let source =
            SeekingFrameSource::<_, f64>::new(Cursor::new(Vec::new()), 4, "in.raw").unwrap();
        assert_eq!(source.frame_count(), 0);
    }

    #[test]
    fn test_seeking_source_malformed_length() {
        let mut bytes = encode(&[1.0, 2.0, 3.0]);
        bytes.push(0);
        let result = SeekingFrameSource::<_, f32>::new(Cursor::new(bytes), 3, "in.raw");
        assert!(matches!(
            result,
            Err(FiltfiltError::MalformedInput {
                byte_len: 13,
                frame_size: 12
            })
        ));
    }

    #[test]
    fn test_zero_channels_rejected() {
        let result = SeekingFrameSource::<_, f32>::new(Cursor::new(Vec::new()), 0, "in.raw");
        assert!(matches!(result, Err(FiltfiltError::Config(_))));
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let result =
            SeekingFrameSource::<_, f32>::new(Cursor::new(Vec::new()), usize::MAX, "in.raw");
        assert!(matches!(result, Err(FiltfiltError::Config(_))));
        assert!(matches!(
            MemoryFrameSource::<f64>::new(&[], usize::MAX),
            Err(FiltfiltError::Config(_))
        ));
    }

    /// Reports one frame's worth of length but fails every read
    struct UnreadableStream;

    impl Read for UnreadableStream {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    impl Seek for UnreadableStream {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            Ok(match pos {
                SeekFrom::End(_) => 8,
                _ => 0,
            })
        }
    }

    #[test]
    fn test_read_error_names_stream() {
        let mut source =
            SeekingFrameSource::<_, f64>::new(UnreadableStream, 1, "/data/in.raw").unwrap();
        let mut frame = [0.0f64];
        match source.read_reversed(0, &mut frame) {
            Err(FiltfiltError::Io { context, .. }) => {
                assert_eq!(context, "read from '/data/in.raw'")
            }
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_source_matches_seeking_source() {
        let samples = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut memory = MemoryFrameSource::new(&samples, 3).unwrap();
        let mut seeking =
            SeekingFrameSource::<_, f32>::new(Cursor::new(encode(&samples)), 3, "in.raw")
                .unwrap();

        let mut a = [0.0f32; 3];
        let mut b = [0.0f32; 3];
        for r in 0..2 {
            memory.read_reversed(r, &mut a).unwrap();
            seeking.read_reversed(r, &mut b).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_memory_source_malformed() {
        let samples = [1.0f64; 5];
        assert!(matches!(
            MemoryFrameSource::new(&samples, 2),
            Err(FiltfiltError::MalformedInput {
                byte_len: 40,
                frame_size: 16
            })
        ));
    }
}
