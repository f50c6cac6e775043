use alloc::vec;
use alloc::vec::Vec;

const COS_PI_4: f32 = 0.707;

/// Reference signals for exercising effects and eyeballing their output.
///
/// Rendered as floats in [-1, 1]; convert with [`to_i16_full_scale`] before
/// feeding the 16-bit pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestSignal {
    /// 0 to 1 step at the midpoint.
    DcStep,
    /// Alternating -1 +1: the Nyquist frequency.
    Nyquist,
    /// -1 0 +1 0 cycle: half the Nyquist frequency.
    HalfNyquist,
    /// Eight-sample cosine staircase: a quarter of the Nyquist frequency.
    QuarterNyquist,
    /// A single full-scale sample in silence, centered.
    Impulse,
}

/// Renders `samples` samples of the chosen signal.
pub fn generate(signal: TestSignal, samples: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; samples];
    match signal {
        TestSignal::DcStep => {
            for (i, value) in out.iter_mut().enumerate() {
                *value = if i < samples / 2 { 0.0 } else { 1.0 };
            }
        }
        TestSignal::Nyquist => {
            for (i, value) in out.iter_mut().enumerate() {
                *value = if i % 2 == 0 { -1.0 } else { 1.0 };
            }
        }
        TestSignal::HalfNyquist => {
            for (i, value) in out.iter_mut().enumerate() {
                *value = match i % 4 {
                    0 => -1.0,
                    2 => 1.0,
                    _ => 0.0,
                };
            }
        }
        TestSignal::QuarterNyquist => {
            for (i, value) in out.iter_mut().enumerate() {
                *value = match i % 8 {
                    0 => -1.0,
                    1 | 7 => -COS_PI_4,
                    2 | 6 => 0.0,
                    3 | 5 => COS_PI_4,
                    _ => 1.0,
                };
            }
        }
        TestSignal::Impulse => {
            if !out.is_empty() {
                out[samples / 2] = 1.0;
            }
        }
    }
    out
}

/// Scales a [-1, 1] float signal to full-scale 16-bit samples.
pub fn to_i16_full_scale(signal: &[f32]) -> Vec<i16> {
    signal
        .iter()
        .map(|&value| (value * i16::MAX as f32) as i16)
        .collect()
}
