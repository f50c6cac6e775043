use alloc::vec::Vec;

use crate::core::block::{AudioBlock, ChannelLayout};
use crate::core::effect::Effect;
use crate::core::error::EffectError;

/// Duplicates a mono block across both stereo channels.
///
/// Diagnostic effect: no transform beyond the duplication, so the
/// interleaved stereo path can be exercised end to end without a real
/// stereo algorithm behind it.
pub struct StereoDuplicate;

impl StereoDuplicate {
    pub fn new() -> Self {
        StereoDuplicate
    }
}

impl Default for StereoDuplicate {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for StereoDuplicate {
    fn output_layout(&self) -> ChannelLayout {
        ChannelLayout::Stereo
    }

    fn process_stereo(&mut self, block: AudioBlock) -> Result<AudioBlock, EffectError> {
        if block.layout() != ChannelLayout::Mono {
            return Err(EffectError::ShapeMismatch {
                expected: ChannelLayout::Mono,
                actual: block.layout(),
            });
        }

        let mut samples = Vec::with_capacity(block.frames() * 2);
        for &sample in block.samples() {
            samples.push(sample);
            samples.push(sample);
        }
        Ok(AudioBlock::stereo(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn duplicates_into_interleaved_frames() {
        let out = StereoDuplicate::new()
            .process_stereo(AudioBlock::mono(vec![1, -2, 3]))
            .unwrap();
        assert_eq!(out.layout(), ChannelLayout::Stereo);
        assert_eq!(out.frames(), 3);
        assert_eq!(out.samples(), [1, 1, -2, -2, 3, 3]);
    }

    #[test]
    fn stereo_input_is_rejected() {
        let err = StereoDuplicate::new()
            .process_stereo(AudioBlock::stereo(vec![1, 1]))
            .unwrap_err();
        assert!(matches!(
            err,
            EffectError::ShapeMismatch {
                expected: ChannelLayout::Mono,
                actual: ChannelLayout::Stereo,
            }
        ));
    }
}
