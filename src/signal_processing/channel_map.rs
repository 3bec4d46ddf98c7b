use crate::error::{FiltfiltError, Result};

/// Maps each output column to the input column that feeds it
///
/// Entries are zero-based. The map does not need to be a permutation:
/// channels may be repeated or left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    indices: Vec<usize>,
}

impl ChannelMap {
    /// Pass all `channel_count` channels through in order
    pub fn identity(channel_count: usize) -> Self {
        Self {
            indices: (0..channel_count).collect(),
        }
    }

    /// Select zero-based input channels
    ///
    /// # Errors
    /// Returns `InvalidChannel` (reported 1-based) if an index is outside
    /// `0..channel_count`.
    pub fn select(indices: Vec<usize>, channel_count: usize) -> Result<Self> {
        let map = Self { indices };
        map.validate(channel_count)?;
        Ok(map)
    }

    /// Build from 1-based channel numbers; an empty list selects everything
    pub fn from_one_based(channels: &[usize], channel_count: usize) -> Result<Self> {
        if channels.is_empty() {
            return Ok(Self::identity(channel_count));
        }
        let indices = channels
            .iter()
            .map(|&channel| {
                if channel == 0 || channel > channel_count {
                    Err(FiltfiltError::InvalidChannel {
                        channel: channel as i64,
                        channel_count,
                    })
                } else {
                    Ok(channel - 1)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { indices })
    }

    /// Check every entry against an input channel count
    pub fn validate(&self, channel_count: usize) -> Result<()> {
        match self.indices.iter().find(|&&i| i >= channel_count) {
            Some(&i) => Err(FiltfiltError::InvalidChannel {
                channel: i as i64 + 1,
                channel_count,
            }),
            None => Ok(()),
        }
    }

    /// Number of output channels
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}
