#![allow(dead_code)]

use std::path::{Path, PathBuf};

use filtfilt::Sample;
use filtfilt::signal_processing::Coefficients;
use filtfilt::simulation::{
    SignalConfig, generate_test_signal, read_raw_samples, write_raw_samples,
};
use tempfile::TempDir;

/// Scratch directory holding raw input/output files for one test
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write<T: Sample>(&self, name: &str, samples: &[f64]) -> PathBuf {
        let path = self.path(name);
        write_raw_samples::<T>(&path, samples).expect("write raw samples");
        path
    }

    pub fn read<T: Sample>(&self, path: &Path) -> Vec<f64> {
        read_raw_samples::<T>(path).expect("read raw samples")
    }
}

/// Seeded noisy multi-tone signal, interleaved
pub fn noisy_signal(frames: usize, channel_count: usize, seed: u64) -> Vec<f64> {
    let config = SignalConfig {
        frames,
        channel_count,
        seed: Some(seed),
        ..Default::default()
    };
    generate_test_signal(&config).expect("generate signal")
}

/// Extract one column of an interleaved signal
pub fn column(samples: &[f64], channel_count: usize, channel: usize) -> Vec<f64> {
    samples
        .iter()
        .skip(channel)
        .step_by(channel_count)
        .copied()
        .collect()
}

/// Causal filter evaluated directly from the recurrence with zero history
pub fn direct_filter(coefficients: &Coefficients, x: &[f64]) -> Vec<f64> {
    let (a, b) = (coefficients.a(), coefficients.b());
    let mut y: Vec<f64> = Vec::with_capacity(x.len());
    for t in 0..x.len() {
        let mut value = 0.0;
        for (r, br) in b.iter().enumerate() {
            if r <= t {
                value += br * x[t - r];
            }
        }
        for (r, ar) in a.iter().enumerate().skip(1) {
            if r <= t {
                value -= ar * y[t - r];
            }
        }
        y.push(value / a[0]);
    }
    y
}

/// Reference zero-phase filter evaluated in memory
///
/// Filters the time-reversed signal, reverses the result and filters again.
pub fn reference_filtfilt(coefficients: &Coefficients, x: &[f64]) -> Vec<f64> {
    let reversed: Vec<f64> = x.iter().rev().copied().collect();
    let backward = direct_filter(coefficients, &reversed);
    let restored: Vec<f64> = backward.iter().rev().copied().collect();
    direct_filter(coefficients, &restored)
}
