mod measure;
mod raw;
mod signal;

pub use measure::{max_abs_difference, rms_difference, signal_power};
pub use raw::{read_raw_samples, write_raw_samples};
pub use signal::{SignalConfig, Tone, generate_impulse, generate_test_signal};
