use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bytemuck::Zeroable;

use crate::codec::{Sample, read_frame, write_frame};
use crate::error::{FiltfiltError, Result};

/// Write samples to a headerless raw file at the width of `T`
pub fn write_raw_samples<T: Sample>(path: &Path, samples: &[f64]) -> Result<()> {
    let context = || format!("write samples to '{}'", path.display());
    let file = File::create(path).map_err(|e| FiltfiltError::io(context(), e))?;
    let mut writer = BufWriter::new(file);
    for &sample in samples {
        write_frame(&mut writer, &[T::from_f64(sample)])
            .map_err(|e| FiltfiltError::io(context(), e))?;
    }
    writer.flush().map_err(|e| FiltfiltError::io(context(), e))
}

/// Read a whole headerless raw file of `T` samples, widened to `f64`
pub fn read_raw_samples<T: Sample>(path: &Path) -> Result<Vec<f64>> {
    let context = || format!("read samples from '{}'", path.display());
    let file = File::open(path).map_err(|e| FiltfiltError::io(context(), e))?;
    let width = T::FORMAT.width() as u64;
    let byte_len = file
        .metadata()
        .map_err(|e| FiltfiltError::io(context(), e))?
        .len();
    if byte_len % width != 0 {
        return Err(FiltfiltError::MalformedInput {
            byte_len,
            frame_size: width,
        });
    }

    let mut reader = BufReader::new(file);
    let mut sample = [T::zeroed()];
    let mut samples = Vec::with_capacity((byte_len / width) as usize);
    for _ in 0..byte_len / width {
        read_frame(&mut reader, &mut sample).map_err(|e| FiltfiltError::io(context(), e))?;
        samples.push(sample[0].to_f64());
    }
    Ok(samples)
}
