use thiserror::Error;

use crate::core::block::ChannelLayout;

/// Rejected effect configuration.
///
/// Out-of-range parameters are surfaced, never clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Delay time does not fit inside the allocated storage headroom.
    #[error("delay time {time} s exceeds the delay buffer headroom of {state_size_s} s")]
    DelayExceedsHeadroom { time: f32, state_size_s: f32 },
    /// The active delay length cannot splice whole blocks.
    #[error(
        "delay length of {delay_samples} samples is shorter than the block size of {block_size}"
    )]
    DelayShorterThanBlock {
        delay_samples: usize,
        block_size: usize,
    },
    /// A blend gain lies outside [0, 1].
    #[error("{name} gain {value} is outside [0, 1]")]
    GainOutOfRange { name: &'static str, value: f32 },
    /// The distortion volume is negative or not finite.
    #[error("volume {value} must be a finite gain of at least 0")]
    VolumeOutOfRange { value: f32 },
}

/// Errors raised by effect construction or per-block processing.
///
/// Every variant is fatal to the run; there are no retries and no silent
/// recovery.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EffectError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A block's channel layout does not match the invoked entry point.
    #[error("channel layout mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: ChannelLayout,
        actual: ChannelLayout,
    },
    /// The selected effect variant has no committed algorithm.
    #[error("the {effect} effect is not implemented")]
    Unimplemented { effect: &'static str },
}

/// Errors from the driver loop, generic over the collaborating source and
/// sink error types.
#[derive(Debug, Error)]
pub enum StreamError<S, K> {
    #[error(transparent)]
    Effect(#[from] EffectError),
    /// The input stream's rate differs from the configured rate. Checked
    /// once, before any block is processed.
    #[error("input sample rate {actual} Hz does not match the configured {expected} Hz")]
    SampleRateMismatch { expected: u32, actual: u32 },
    #[error("block source: {0}")]
    Source(S),
    #[error("block sink: {0}")]
    Sink(K),
}
