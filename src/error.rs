//! Error types and result utilities for sample buffer operations.

use thiserror::Error;

/// Convenience type alias for results that may contain a [`SampleBufferError`].
pub type SampleBufferResult<T> = Result<T, SampleBufferError>;

/// Error types that can occur while operating on sample buffers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleBufferError {
    /// Source and destination have a different number of samples per channel.
    ///
    /// Channel-mapped copies require identical blocksizes. Nothing is written
    /// when this error is returned.
    #[error("Blocksize mismatch: destination holds {destination_blocksize} samples per channel, source holds {source_blocksize}")]
    BlocksizeMismatch {
        /// Blocksize of the destination buffer.
        destination_blocksize: usize,
        /// Blocksize of the source buffer.
        source_blocksize: usize,
    },

    /// The source buffer has no channels to read from.
    #[error("Source buffer has no channels to map into {destination_channels} destination channel(s)")]
    EmptySource {
        /// Number of channels the destination expected to fill.
        destination_channels: usize,
    },

    /// A channel index is outside the buffer.
    #[error("Channel index {channel} out of range for buffer with {num_channels} channel(s)")]
    ChannelOutOfRange {
        /// Requested channel index.
        channel: usize,
        /// Number of channels in the buffer.
        num_channels: usize,
    },

    /// A sample index is outside a channel.
    #[error("Sample index {index} out of range for blocksize {blocksize}")]
    SampleOutOfRange {
        /// Requested sample index.
        index: usize,
        /// Blocksize of the buffer.
        blocksize: usize,
    },

    /// A sample window does not fit inside a channel.
    #[error("Range of {len} sample(s) at offset {offset} exceeds blocksize {blocksize}")]
    RangeOutOfBounds {
        /// First sample of the window.
        offset: usize,
        /// Number of samples in the window.
        len: usize,
        /// Blocksize of the buffer the window was applied to.
        blocksize: usize,
    },

    /// An interleaved PCM slice does not hold exactly one block of frames.
    #[error("PCM length mismatch: expected {expected} interleaved samples, got {actual}")]
    PcmLengthMismatch {
        /// `num_channels * blocksize` of the buffer.
        expected: usize,
        /// Length of the provided slice.
        actual: usize,
    },

    /// A two-dimensional array does not have the expected `(channels, blocksize)` shape.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected `(channels, blocksize)`.
        expected: (usize, usize),
        /// Actual `(channels, blocksize)`.
        actual: (usize, usize),
    },

    /// Audio settings failed validation.
    #[error("Invalid audio settings: {0}")]
    InvalidSettings(String),
}

impl SampleBufferError {
    /// Create a blocksize mismatch error
    pub const fn blocksize_mismatch(destination_blocksize: usize, source_blocksize: usize) -> Self {
        Self::BlocksizeMismatch {
            destination_blocksize,
            source_blocksize,
        }
    }

    /// Create a range error for a `len`-sample window at `offset`
    pub const fn range_out_of_bounds(offset: usize, len: usize, blocksize: usize) -> Self {
        Self::RangeOutOfBounds {
            offset,
            len,
            blocksize,
        }
    }

    /// Create an invalid settings error
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        Self::InvalidSettings(reason.into())
    }

    /// Check if the error came from mismatched buffer shapes rather than bad indices
    pub const fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::BlocksizeMismatch { .. }
                | Self::EmptySource { .. }
                | Self::PcmLengthMismatch { .. }
                | Self::ShapeMismatch { .. }
        )
    }
}
