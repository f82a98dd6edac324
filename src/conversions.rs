//! Conversions between [`SampleBuffer`] and `ndarray` arrays.
//!
//! Arrays use the same layout as the rest of the ecosystem: shape
//! `(channels, samples_per_channel)`, one row per channel.

use ndarray::{Array2, ArrayView2, Axis};

use crate::{Sample, SampleBuffer, SampleBufferError, SampleBufferResult};

impl<T: Sample> SampleBuffer<T> {
    /// Build a buffer from a `(channels, blocksize)` array view.
    pub fn from_array(array: ArrayView2<'_, T>) -> Self {
        let (num_channels, blocksize) = array.dim();
        let mut buffer = Self::new(num_channels, blocksize);
        for (dest, row) in buffer.channels_mut().zip(array.axis_iter(Axis(0))) {
            for (d, s) in dest.iter_mut().zip(row.iter()) {
                *d = *s;
            }
        }
        buffer
    }

    /// Copy the buffer into a `(channels, blocksize)` array.
    pub fn to_array(&self) -> Array2<T> {
        Array2::from_shape_fn(self.shape(), |(c, i)| self[c][i])
    }

    /// Overwrite the buffer from an array of the same shape.
    ///
    /// # Errors
    /// Returns [`SampleBufferError::ShapeMismatch`] if the array shape differs
    /// from [`shape`](Self::shape). Nothing is written in that case.
    pub fn copy_from_array(&mut self, array: ArrayView2<'_, T>) -> SampleBufferResult<()> {
        if array.dim() != self.shape() {
            return Err(SampleBufferError::ShapeMismatch {
                expected: self.shape(),
                actual: array.dim(),
            });
        }
        for (dest, row) in self.channels_mut().zip(array.axis_iter(Axis(0))) {
            for (d, s) in dest.iter_mut().zip(row.iter()) {
                *d = *s;
            }
        }
        Ok(())
    }
}

impl<T: Sample> From<&SampleBuffer<T>> for Array2<T> {
    fn from(buffer: &SampleBuffer<T>) -> Self {
        buffer.to_array()
    }
}

impl<T: Sample> From<Array2<T>> for SampleBuffer<T> {
    fn from(array: Array2<T>) -> Self {
        Self::from_array(array.view())
    }
}
