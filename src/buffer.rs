//! Fixed-shape multi-channel sample buffers.
//!
//! A [`SampleBuffer`] owns `num_channels` independently allocated channels of
//! exactly `blocksize` samples each. The shape is chosen at construction and
//! never changes; every operation works in place on the existing storage.
//!
//! # Channel mapping
//!
//! [`SampleBuffer::copy_and_map_channels`] copies a source buffer into a
//! destination with a possibly different channel count. Destination channel
//! `i` always reads source channel `i % source.num_channels()`:
//!
//! - equal channel counts copy channel for channel,
//! - a wider destination repeats the source channels in order (up-mix),
//! - a narrower destination takes the first source channels (down-mix).
//!
//! No mixdown is performed; callers that need averaging or panning have to do
//! it themselves.
//!
//! ```rust
//! use sample_buffer::SampleBuffer;
//!
//! let mut stereo = SampleBuffer::<f32>::new(2, 1);
//! stereo[0][0] = 1.0;
//! stereo[1][0] = 2.0;
//!
//! let mut quad = SampleBuffer::<f32>::new(4, 1);
//! assert!(quad.copy_and_map_channels(&stereo));
//! let mapped: Vec<f32> = quad.channels().map(|ch| ch[0]).collect();
//! assert_eq!(mapped, [1.0, 2.0, 1.0, 2.0]);
//! ```

use std::ops::{Index, IndexMut};

use crate::{AudioSettings, Sample, SampleBufferError, SampleBufferResult};

/// A block of audio with a fixed number of channels and samples per channel.
///
/// Contents after [`new`](Self::new) are not part of the contract. Call
/// [`clear`](Self::clear) before reading if a known state is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer<T: Sample = f32> {
    blocksize: usize,
    samples: Vec<Box<[T]>>,
}

impl<T: Sample> SampleBuffer<T> {
    /// Allocate a buffer of `num_channels` channels holding `blocksize` samples each.
    ///
    /// A zero blocksize gives zero-length channels. A zero channel count gives
    /// a buffer with no channel storage; it is safe to use but cannot act as a
    /// copy source for a non-empty destination.
    ///
    /// Allocation failure aborts the process, like any other Rust allocation.
    pub fn new(num_channels: usize, blocksize: usize) -> Self {
        tracing::debug!(num_channels, blocksize, "allocating sample buffer");
        let samples = (0..num_channels)
            .map(|_| vec![T::zero(); blocksize].into_boxed_slice())
            .collect();
        Self { blocksize, samples }
    }

    /// Allocate a buffer shaped by `settings`.
    ///
    /// # Errors
    /// Returns [`SampleBufferError::InvalidSettings`] if the settings fail validation.
    pub fn from_settings(settings: &AudioSettings) -> SampleBufferResult<Self> {
        settings.validate()?;
        Ok(Self::new(settings.num_channels, settings.blocksize))
    }

    /// Number of channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples in each channel.
    #[inline]
    pub const fn blocksize(&self) -> usize {
        self.blocksize
    }

    /// `(num_channels, blocksize)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_channels(), self.blocksize)
    }

    /// Total number of samples across all channels.
    #[inline]
    pub fn total_samples(&self) -> usize {
        self.num_channels() * self.blocksize
    }

    /// Returns true if the buffer holds no samples at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_samples() == 0
    }

    /// Borrow one channel.
    #[inline]
    pub fn channel(&self, channel: usize) -> Option<&[T]> {
        self.samples.get(channel).map(|ch| &ch[..])
    }

    /// Mutably borrow one channel.
    #[inline]
    pub fn channel_mut(&mut self, channel: usize) -> Option<&mut [T]> {
        self.samples.get_mut(channel).map(|ch| &mut ch[..])
    }

    /// Iterate over channels in order.
    pub fn channels(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        self.samples.iter().map(|ch| &ch[..])
    }

    /// Iterate mutably over channels in order.
    pub fn channels_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [T]> + '_ {
        self.samples.iter_mut().map(|ch| &mut ch[..])
    }

    /// Read a single sample.
    #[inline]
    pub fn get(&self, channel: usize, index: usize) -> Option<T> {
        self.samples.get(channel)?.get(index).copied()
    }

    /// Write a single sample.
    ///
    /// # Errors
    /// Returns [`SampleBufferError::ChannelOutOfRange`] or
    /// [`SampleBufferError::SampleOutOfRange`] if either index is outside the buffer.
    pub fn set(&mut self, channel: usize, index: usize, value: T) -> SampleBufferResult<()> {
        let num_channels = self.num_channels();
        let blocksize = self.blocksize;
        let ch = self
            .samples
            .get_mut(channel)
            .ok_or(SampleBufferError::ChannelOutOfRange {
                channel,
                num_channels,
            })?;
        let slot = ch
            .get_mut(index)
            .ok_or(SampleBufferError::SampleOutOfRange { index, blocksize })?;
        *slot = value;
        Ok(())
    }

    /// Set every sample in every channel to `value`.
    pub fn fill(&mut self, value: T) {
        for ch in self.samples.iter_mut() {
            ch.fill(value);
        }
    }

    /// Set every sample in every channel to zero.
    pub fn clear(&mut self) {
        self.fill(T::zero());
    }

    /// Copy `source` into this buffer, remapping channels.
    ///
    /// Destination channel `i` receives source channel `i % source.num_channels()`.
    /// Returns `false` without touching either buffer if the blocksizes differ
    /// or `source` has no channels to read; see
    /// [`try_copy_and_map_channels`](Self::try_copy_and_map_channels) for the reason.
    pub fn copy_and_map_channels(&mut self, source: &SampleBuffer<T>) -> bool {
        self.try_copy_and_map_channels(source).is_ok()
    }

    /// Copy `source` into this buffer, remapping channels.
    ///
    /// # Errors
    /// - [`SampleBufferError::BlocksizeMismatch`] if the blocksizes differ.
    /// - [`SampleBufferError::EmptySource`] if `source` has no channels and
    ///   this buffer has at least one.
    ///
    /// Neither buffer is modified when an error is returned.
    pub fn try_copy_and_map_channels(&mut self, source: &SampleBuffer<T>) -> SampleBufferResult<()> {
        if self.blocksize != source.blocksize {
            tracing::debug!(
                destination_blocksize = self.blocksize,
                source_blocksize = source.blocksize,
                "refusing channel-mapped copy between different blocksizes"
            );
            return Err(SampleBufferError::blocksize_mismatch(
                self.blocksize,
                source.blocksize,
            ));
        }
        self.map_channels_from(source, 0, 0, self.blocksize)
    }

    /// Copy a window of `num_frames` samples per channel from `source` into
    /// this buffer, remapping channels the same way as
    /// [`copy_and_map_channels`](Self::copy_and_map_channels).
    ///
    /// The blocksizes may differ; both windows only have to fit. Returns
    /// `false` without touching either buffer otherwise.
    pub fn copy_and_map_channels_with_offset(
        &mut self,
        dest_offset: usize,
        source: &SampleBuffer<T>,
        source_offset: usize,
        num_frames: usize,
    ) -> bool {
        self.try_copy_and_map_channels_with_offset(dest_offset, source, source_offset, num_frames)
            .is_ok()
    }

    /// Copy a window of `num_frames` samples per channel from `source`,
    /// starting at `source_offset`, into this buffer starting at `dest_offset`.
    ///
    /// # Errors
    /// - [`SampleBufferError::RangeOutOfBounds`] if either window runs past
    ///   the end of its buffer.
    /// - [`SampleBufferError::EmptySource`] if `source` has no channels and
    ///   this buffer has at least one.
    ///
    /// Neither buffer is modified when an error is returned.
    pub fn try_copy_and_map_channels_with_offset(
        &mut self,
        dest_offset: usize,
        source: &SampleBuffer<T>,
        source_offset: usize,
        num_frames: usize,
    ) -> SampleBufferResult<()> {
        check_window(dest_offset, num_frames, self.blocksize)?;
        check_window(source_offset, num_frames, source.blocksize)?;
        self.map_channels_from(source, dest_offset, source_offset, num_frames)
    }

    /// Bounds must already be checked by the caller.
    fn map_channels_from(
        &mut self,
        source: &SampleBuffer<T>,
        dest_offset: usize,
        source_offset: usize,
        num_frames: usize,
    ) -> SampleBufferResult<()> {
        let source_channels = source.num_channels();
        if source_channels == 0 {
            if self.samples.is_empty() {
                return Ok(());
            }
            return Err(SampleBufferError::EmptySource {
                destination_channels: self.num_channels(),
            });
        }

        for (i, dest) in self.samples.iter_mut().enumerate() {
            let src = &source.samples[i % source_channels];
            dest[dest_offset..dest_offset + num_frames]
                .copy_from_slice(&src[source_offset..source_offset + num_frames]);
        }

        tracing::trace!(
            destination_channels = self.samples.len(),
            source_channels,
            num_frames,
            "copied and mapped channels"
        );
        Ok(())
    }
}

fn check_window(offset: usize, len: usize, blocksize: usize) -> SampleBufferResult<()> {
    match offset.checked_add(len) {
        Some(end) if end <= blocksize => Ok(()),
        _ => Err(SampleBufferError::range_out_of_bounds(offset, len, blocksize)),
    }
}

impl<T: Sample> Index<usize> for SampleBuffer<T> {
    type Output = [T];

    #[inline]
    fn index(&self, channel: usize) -> &Self::Output {
        &self.samples[channel]
    }
}

impl<T: Sample> IndexMut<usize> for SampleBuffer<T> {
    #[inline]
    fn index_mut(&mut self, channel: usize) -> &mut Self::Output {
        &mut self.samples[channel]
    }
}

/// Release a buffer and all of its channel storage.
///
/// Dropping a [`SampleBuffer`] does the same thing; this exists for callers
/// that hold an optional handle. Passing `None` does nothing.
pub fn release<T: Sample>(buffer: Option<SampleBuffer<T>>) {
    if let Some(buffer) = buffer {
        tracing::trace!(
            num_channels = buffer.num_channels(),
            blocksize = buffer.blocksize(),
            "releasing sample buffer"
        );
        drop(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_BLOCKSIZE;
    use approx_eq::assert_approx_eq;

    fn mock_buffer() -> SampleBuffer<f32> {
        SampleBuffer::new(1, 1)
    }

    #[test]
    fn test_new_sample_buffer() {
        let s = mock_buffer();
        assert_eq!(s.num_channels(), 1);
        assert_eq!(s.blocksize(), 1);
        release(Some(s));
    }

    #[test]
    fn test_new_sample_buffer_multichannel() {
        let mut s = SampleBuffer::<f32>::new(8, 128);
        assert_eq!(s.num_channels(), 8);
        assert_eq!(s.shape(), (8, 128));
        assert_eq!(s.total_samples(), 1024);

        // write every slot to catch any short channel
        for i in 0..s.blocksize() {
            for j in 0..s.num_channels() {
                s[j][i] = 0.5;
            }
        }
        assert!(s.channels().all(|ch| ch.len() == 128));
        assert!(s.channels().flatten().all(|&x| x == 0.5));
    }

    #[test]
    fn test_shape_invariant() {
        for n in 1..5 {
            for b in [0usize, 1, 7, 64] {
                let s = SampleBuffer::<f64>::new(n, b);
                assert_eq!(s.num_channels(), n);
                assert!(s.channels().all(|ch| ch.len() == b));
            }
        }
    }

    #[test]
    fn test_zero_blocksize() {
        let mut s = SampleBuffer::<f32>::new(2, 0);
        assert!(s.is_empty());
        assert_eq!(s[1].len(), 0);
        s.clear();

        let src = SampleBuffer::<f32>::new(3, 0);
        assert!(s.copy_and_map_channels(&src));
    }

    #[test]
    fn test_zero_channels() {
        let mut empty = SampleBuffer::<f32>::new(0, 4);
        assert_eq!(empty.num_channels(), 0);
        assert_eq!(empty.channel(0), None);
        empty.clear();

        let mut dest = SampleBuffer::<f32>::new(2, 4);
        dest.fill(3.0);
        assert_eq!(
            dest.try_copy_and_map_channels(&empty),
            Err(SampleBufferError::EmptySource {
                destination_channels: 2
            })
        );
        assert!(dest.channels().flatten().all(|&x| x == 3.0));

        let other_empty = SampleBuffer::<f32>::new(0, 4);
        assert!(empty.copy_and_map_channels(&other_empty));
    }

    #[test]
    fn test_clear_sample_buffer() {
        let mut s = mock_buffer();
        s[0][0] = 123.0;
        s.clear();
        assert_approx_eq!(s[0][0] as f64, 0.0, 1e-10);
    }

    #[test]
    fn test_clear_is_total_and_idempotent() {
        let mut s = SampleBuffer::<f64>::new(3, 16);
        for (c, ch) in s.channels_mut().enumerate() {
            for (i, x) in ch.iter_mut().enumerate() {
                *x = (c * 16 + i) as f64 - 7.5;
            }
        }
        s.clear();
        let once = s.clone();
        assert!(s.channels().flatten().all(|&x| x == 0.0));
        s.clear();
        assert_eq!(s, once);
    }

    #[test]
    fn test_copy_and_map_channels_sample_buffers() {
        let mut s1 = mock_buffer();
        let mut s2 = mock_buffer();
        s1[0][0] = 123.0;
        assert!(s2.copy_and_map_channels(&s1));
        assert_approx_eq!(s2[0][0] as f64, 123.0, 1e-10);
    }

    #[test]
    fn test_copy_and_map_channels_different_blocksizes() {
        let mut s1 = SampleBuffer::<f32>::new(1, DEFAULT_BLOCKSIZE);
        let mut s2 = mock_buffer();
        s1.clear();
        s2.clear();

        s1[0][0] = 123.0;
        assert!(!s2.copy_and_map_channels(&s1));
        // contents must not change when the sizes differ
        assert_approx_eq!(s1[0][0] as f64, 123.0, 1e-10);
        assert_approx_eq!(s2[0][0] as f64, 0.0, 1e-10);

        assert_eq!(
            s2.try_copy_and_map_channels(&s1),
            Err(SampleBufferError::BlocksizeMismatch {
                destination_blocksize: 1,
                source_blocksize: DEFAULT_BLOCKSIZE
            })
        );
    }

    #[test]
    fn test_copy_and_map_channels_different_channels_bigger() {
        let mut s1 = SampleBuffer::<f32>::new(4, 1);
        let mut s2 = SampleBuffer::<f32>::new(2, 1);

        s2[0][0] = 1.0;
        s2[1][0] = 2.0;

        assert!(s1.copy_and_map_channels(&s2));
        assert_approx_eq!(s1[0][0] as f64, 1.0, 1e-10);
        assert_approx_eq!(s1[1][0] as f64, 2.0, 1e-10);
        assert_approx_eq!(s1[2][0] as f64, 1.0, 1e-10);
        assert_approx_eq!(s1[3][0] as f64, 2.0, 1e-10);
    }

    #[test]
    fn test_copy_and_map_channels_different_channels_smaller() {
        let mut s1 = SampleBuffer::<f32>::new(1, 1);
        let mut s2 = SampleBuffer::<f32>::new(4, 1);
        s1.fill(1.0);
        s2.fill(2.0);

        assert!(s1.copy_and_map_channels(&s2));
        assert_approx_eq!(s1[0][0] as f64, 2.0, 1e-10);
    }

    #[test]
    fn test_down_mix_uses_leading_channels_only() {
        let mut src = SampleBuffer::<f64>::new(5, 3);
        for (c, ch) in src.channels_mut().enumerate() {
            ch.fill(c as f64 + 1.0);
        }
        let before = src.clone();

        let mut dest = SampleBuffer::<f64>::new(2, 3);
        assert!(dest.copy_and_map_channels(&src));
        assert_eq!(dest.channel(0), Some(&[1.0, 1.0, 1.0][..]));
        assert_eq!(dest.channel(1), Some(&[2.0, 2.0, 2.0][..]));
        assert_eq!(src, before);
    }

    #[test]
    fn test_up_mix_cycles_whole_channels() {
        let mut src = SampleBuffer::<f32>::new(3, 2);
        src[0].copy_from_slice(&[0.1, 0.2]);
        src[1].copy_from_slice(&[0.3, 0.4]);
        src[2].copy_from_slice(&[0.5, 0.6]);

        let mut dest = SampleBuffer::<f32>::new(7, 2);
        assert!(dest.copy_and_map_channels(&src));
        for i in 0..7 {
            assert_eq!(&dest[i], &src[i % 3]);
        }
    }

    #[test]
    fn test_copy_storage_is_not_shared() {
        let mut src = SampleBuffer::<f32>::new(1, 2);
        src.fill(1.0);
        let mut dest = SampleBuffer::<f32>::new(2, 2);
        assert!(dest.copy_and_map_channels(&src));

        src[0][0] = 9.0;
        dest[1][1] = -9.0;
        assert_eq!(dest[0][0], 1.0);
        assert_eq!(src[0][1], 1.0);
        assert_eq!(dest[0][1], 1.0);
    }

    #[test]
    fn test_copy_with_offset_splices_window() {
        let mut src = SampleBuffer::<f32>::new(2, 4);
        src[0].copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        src[1].copy_from_slice(&[5.0, 6.0, 7.0, 8.0]);

        let mut dest = SampleBuffer::<f32>::new(3, 6);
        dest.clear();
        assert!(dest.copy_and_map_channels_with_offset(3, &src, 1, 2));

        assert_eq!(&dest[0], &[0.0, 0.0, 0.0, 2.0, 3.0, 0.0]);
        assert_eq!(&dest[1], &[0.0, 0.0, 0.0, 6.0, 7.0, 0.0]);
        assert_eq!(&dest[2], &[0.0, 0.0, 0.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_copy_with_offset_rejects_out_of_bounds() {
        let mut src = SampleBuffer::<f32>::new(1, 4);
        src.fill(1.0);
        let mut dest = SampleBuffer::<f32>::new(1, 4);
        dest.clear();

        assert_eq!(
            dest.try_copy_and_map_channels_with_offset(0, &src, 3, 2),
            Err(SampleBufferError::RangeOutOfBounds {
                offset: 3,
                len: 2,
                blocksize: 4
            })
        );
        assert!(!dest.copy_and_map_channels_with_offset(4, &src, 0, 1));
        assert!(!dest.copy_and_map_channels_with_offset(usize::MAX, &src, 0, 1));
        assert!(dest.channels().flatten().all(|&x| x == 0.0));

        // an empty window at the very end is fine
        assert!(dest.copy_and_map_channels_with_offset(4, &src, 4, 0));
    }

    #[test]
    fn test_get_and_set() {
        let mut s = SampleBuffer::<f64>::new(2, 3);
        s.clear();
        s.set(1, 2, 0.25).unwrap();
        assert_eq!(s.get(1, 2), Some(0.25));
        assert_eq!(s.get(2, 0), None);
        assert_eq!(s.get(0, 3), None);

        assert_eq!(
            s.set(2, 0, 1.0),
            Err(SampleBufferError::ChannelOutOfRange {
                channel: 2,
                num_channels: 2
            })
        );
        assert_eq!(
            s.set(0, 3, 1.0),
            Err(SampleBufferError::SampleOutOfRange {
                index: 3,
                blocksize: 3
            })
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = AudioSettings::default().with_num_channels(6).with_blocksize(32);
        let s = SampleBuffer::<f32>::from_settings(&settings).unwrap();
        assert_eq!(s.shape(), (6, 32));

        let bad = settings.with_num_channels(0);
        assert!(SampleBuffer::<f32>::from_settings(&bad).is_err());
    }

    #[test]
    fn test_release_none() {
        release::<f32>(None);
        release::<f64>(None);
    }
}
