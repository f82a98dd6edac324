use bytemuck::{NoUninit, Zeroable};
use num_traits::{Float, FromPrimitive, NumCast};
use std::fmt::{Debug, Display};

/// Floating-point element type stored in a [`SampleBuffer`](crate::SampleBuffer).
///
/// Implemented for `f32` and `f64`. Samples are nominally normalised to the
/// range -1.0 to 1.0, which is the range the PCM conversions scale against,
/// but nothing in the buffer itself clamps values.
///
/// # Supported Types
/// - `f32`: 32-bit floating-point samples (the default)
/// - `f64`: 64-bit floating-point samples
pub trait Sample:
    // Standard library traits
    Copy
    + Sized
    + Default
    + Display
    + Debug
    + Send
    + Sync
    + PartialEq
    + PartialOrd

    // External crate traits
    + Float // num-traits: zero, arithmetic, rounding
    + FromPrimitive // num-traits: conversion from integer PCM words
    + NumCast // num-traits: conversion back to integer PCM words
    + NoUninit // bytemuck: no padding or uninitialised bytes
    + Zeroable // bytemuck: all-zero bit pattern is 0.0
{
    /// Upper bound of the nominal sample range.
    const MAX: Self;
    /// Lower bound of the nominal sample range.
    const MIN: Self;
    /// Bit width of the sample type.
    const BITS: u8;

    /// Divisor applied when reading 16-bit PCM (`32768`).
    const PCM_IN_SCALE: Self;
    /// Multiplier applied when writing 16-bit PCM (`32767`).
    const PCM_OUT_SCALE: Self;

    /// Converts a 16-bit PCM word to a sample, dividing by 32768.
    #[inline]
    fn from_pcm_i16(value: i16) -> Self {
        // every i16 is exactly representable in f32 and f64
        Self::from_i16(value).unwrap_or_else(Self::zero) / Self::PCM_IN_SCALE
    }

    /// Converts a sample to a 16-bit PCM word, scaling by 32767 and clamping.
    #[inline]
    fn to_pcm_i16(self) -> i16 {
        if self.is_nan() {
            return 0;
        }
        let scaled = (self * Self::PCM_OUT_SCALE).round();
        let clamped = scaled.max(-Self::PCM_IN_SCALE).min(Self::PCM_OUT_SCALE);
        <i16 as NumCast>::from(clamped).unwrap_or(0)
    }
}

macro_rules! impl_sample {
    ($type:ty, $bits:expr) => {
        impl Sample for $type {
            const MAX: Self = 1.0;
            const MIN: Self = -1.0;
            const BITS: u8 = $bits;
            const PCM_IN_SCALE: Self = 32768.0;
            const PCM_OUT_SCALE: Self = 32767.0;
        }
    };
}

impl_sample!(f32, 32);
impl_sample!(f64, 64);
