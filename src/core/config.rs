/// The closed set of selectable effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Stateless gain distortion.
    Distortion,
    /// Feedback delay line.
    Delay,
    /// Stereo reverb placeholder.
    Reverb,
    /// Diagnostic mono-to-stereo duplication.
    PassthroughStereo,
}

/// Immutable configuration for one processing run.
///
/// Captured once at effect construction and threaded through the driver;
/// nothing here changes while a stream is in flight.
#[derive(Clone, Copy, Debug)]
pub struct EffectConfig {
    /// Stream sample rate in Hz.
    pub sample_rate: u32,
    /// Frames handed to the effect per driver read. The final block of a
    /// stream may be shorter.
    pub block_size: usize,
    /// Delay time in seconds.
    pub time: f32,
    /// Feedback gain applied to the stored echo, 0.0 to 1.0.
    pub feedback: f32,
    /// Wet/dry blend: 0.0 is dry only, 1.0 is wet only.
    pub mix: f32,
    /// Amplification factor for distortion, 1.0 is unity.
    pub volume: f32,
    /// Delay storage headroom in seconds. `time` may grow up to this bound
    /// without the delay line reallocating.
    pub state_size_s: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        EffectConfig {
            sample_rate: 48_000,
            block_size: 1024,
            time: 0.5,
            feedback: 0.5,
            mix: 0.5,
            volume: 1.0,
            state_size_s: 5.0,
        }
    }
}
