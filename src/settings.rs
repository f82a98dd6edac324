//! Audio settings shared by buffers in a processing chain.
//!
//! [`AudioSettings`] records the sample rate, channel count and blocksize a
//! pipeline runs at. Buffers only care about the latter two, but keeping the
//! sample rate alongside them lets a host pass one value around instead of
//! three.

use crate::{SampleBufferError, SampleBufferResult};

/// Sample rate used when none is configured, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Channel count used when none is configured.
pub const DEFAULT_NUM_CHANNELS: usize = 2;
/// Samples per channel used when none is configured.
pub const DEFAULT_BLOCKSIZE: usize = 512;

/// Processing parameters for a chain of sample buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AudioSettings {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels per buffer
    pub num_channels: usize,

    /// Number of samples per channel per buffer
    pub blocksize: usize,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            num_channels: DEFAULT_NUM_CHANNELS,
            blocksize: DEFAULT_BLOCKSIZE,
        }
    }
}

impl AudioSettings {
    /// Create settings from explicit values.
    pub const fn new(sample_rate: u32, num_channels: usize, blocksize: usize) -> Self {
        Self {
            sample_rate,
            num_channels,
            blocksize,
        }
    }

    /// Set the sample rate.
    pub const fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the channel count.
    pub const fn with_num_channels(mut self, num_channels: usize) -> Self {
        self.num_channels = num_channels;
        self
    }

    /// Set the blocksize.
    pub const fn with_blocksize(mut self, blocksize: usize) -> Self {
        self.blocksize = blocksize;
        self
    }

    /// Duration of one block in seconds.
    pub fn block_duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.blocksize as f64 / self.sample_rate as f64
    }

    /// Check that the settings describe a usable buffer shape.
    ///
    /// A blocksize of zero is accepted; zero channels or a zero sample rate are not.
    pub fn validate(&self) -> SampleBufferResult<()> {
        if self.sample_rate == 0 {
            return Err(SampleBufferError::invalid_settings(
                "sample rate must be > 0",
            ));
        }
        if self.num_channels == 0 {
            return Err(SampleBufferError::invalid_settings(
                "channel count must be > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_defaults() {
        let settings = AudioSettings::default();
        assert_eq!(settings.sample_rate, 44100);
        assert_eq!(settings.num_channels, 2);
        assert_eq!(settings.blocksize, 512);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let settings = AudioSettings::default()
            .with_sample_rate(48000)
            .with_num_channels(8)
            .with_blocksize(128);
        assert_eq!(settings, AudioSettings::new(48000, 8, 128));
    }

    #[test]
    fn test_validate_rejects_zero_channels_and_rate() {
        let no_channels = AudioSettings::default().with_num_channels(0);
        assert!(matches!(
            no_channels.validate(),
            Err(SampleBufferError::InvalidSettings(_))
        ));

        let no_rate = AudioSettings::default().with_sample_rate(0);
        assert!(no_rate.validate().is_err());
        assert_eq!(no_rate.block_duration_seconds(), 0.0);
    }

    #[test]
    fn test_zero_blocksize_is_valid() {
        assert!(AudioSettings::default().with_blocksize(0).validate().is_ok());
    }

    #[test]
    fn test_block_duration() {
        let settings = AudioSettings::new(48000, 2, 480);
        assert_approx_eq!(settings.block_duration_seconds(), 0.01, 1e-12);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_serde_fills_missing_fields_from_defaults() {
        let settings: AudioSettings = serde_json::from_str(r#"{"blocksize": 64}"#).unwrap();
        assert_eq!(settings.blocksize, 64);
        assert_eq!(settings.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(settings.num_channels, DEFAULT_NUM_CHANNELS);

        let json = serde_json::to_string(&settings).unwrap();
        let back: AudioSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
