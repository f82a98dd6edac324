//! Interleaved 16-bit PCM import and export.
//!
//! Hosts and file writers usually exchange audio as frame-major interleaved
//! `i16` words (`L R L R ...`). These methods move one block of such data in
//! and out of a [`SampleBuffer`], scaling between the integer range and the
//! nominal -1.0 to 1.0 float range.

use crate::{Sample, SampleBuffer, SampleBufferError, SampleBufferResult};

/// Byte order of exported PCM words relative to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PcmByteOrder {
    /// Words are written in host byte order
    #[default]
    Native,
    /// Each 16-bit word has its two bytes swapped
    Swapped,
}

impl PcmByteOrder {
    /// Byte order that yields little-endian words on this host.
    pub const fn little_endian() -> Self {
        if cfg!(target_endian = "little") {
            Self::Native
        } else {
            Self::Swapped
        }
    }

    /// Byte order that yields big-endian words on this host.
    pub const fn big_endian() -> Self {
        if cfg!(target_endian = "big") {
            Self::Native
        } else {
            Self::Swapped
        }
    }

    #[inline(always)]
    const fn apply(self, word: i16) -> i16 {
        match self {
            Self::Native => word,
            Self::Swapped => word.swap_bytes(),
        }
    }
}

impl<T: Sample> SampleBuffer<T> {
    /// Overwrite the buffer with one block of interleaved PCM.
    ///
    /// `interleaved[i * num_channels + c]` lands in channel `c`, sample `i`.
    ///
    /// # Errors
    /// Returns [`SampleBufferError::PcmLengthMismatch`] if `interleaved` does not
    /// hold exactly `num_channels * blocksize` words. Nothing is written in that case.
    pub fn copy_from_pcm(&mut self, interleaved: &[i16]) -> SampleBufferResult<()> {
        self.check_pcm_len(interleaved.len())?;
        let num_channels = self.num_channels();
        for (c, ch) in self.channels_mut().enumerate() {
            for (i, sample) in ch.iter_mut().enumerate() {
                *sample = T::from_pcm_i16(interleaved[i * num_channels + c]);
            }
        }
        Ok(())
    }

    /// Write the buffer out as one block of interleaved PCM.
    ///
    /// Samples are scaled by 32767, rounded and clamped to the `i16` range.
    ///
    /// # Errors
    /// Returns [`SampleBufferError::PcmLengthMismatch`] if `out` does not hold
    /// exactly `num_channels * blocksize` words.
    pub fn write_pcm(&self, out: &mut [i16], byte_order: PcmByteOrder) -> SampleBufferResult<()> {
        self.check_pcm_len(out.len())?;
        self.interleave_into(out, byte_order);
        Ok(())
    }

    /// Interleaved PCM for the whole buffer.
    pub fn to_pcm(&self, byte_order: PcmByteOrder) -> Vec<i16> {
        let mut out = vec![0i16; self.total_samples()];
        self.interleave_into(&mut out, byte_order);
        out
    }

    /// Interleaved PCM for the whole buffer as raw bytes in memory order.
    pub fn pcm_bytes(&self, byte_order: PcmByteOrder) -> Vec<u8> {
        let words = self.to_pcm(byte_order);
        bytemuck::cast_slice::<i16, u8>(&words).to_vec()
    }

    /// `out` must hold exactly `total_samples()` words.
    fn interleave_into(&self, out: &mut [i16], byte_order: PcmByteOrder) {
        let num_channels = self.num_channels();
        for (c, ch) in self.channels().enumerate() {
            for (i, sample) in ch.iter().enumerate() {
                out[i * num_channels + c] = byte_order.apply(sample.to_pcm_i16());
            }
        }
    }

    fn check_pcm_len(&self, actual: usize) -> SampleBufferResult<()> {
        let expected = self.total_samples();
        if actual != expected {
            return Err(SampleBufferError::PcmLengthMismatch { expected, actual });
        }
        Ok(())
    }
}
