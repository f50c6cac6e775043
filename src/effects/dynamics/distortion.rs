use wide::f32x4;

use crate::core::block::{wrap_sample, AudioBlock, ChannelLayout};
use crate::core::config::EffectConfig;
use crate::core::effect::Effect;
use crate::core::error::{ConfigError, EffectError};

/// Distortion through plain amplification.
///
/// Every sample is scaled by `volume`, rounded, and cast straight back to
/// i16. Gain past full scale wraps around instead of saturating — the
/// fold-over is the effect (see [`wrap_sample`]). Stateless: each block is a
/// pure function of its input.
#[derive(Debug)]
pub struct Distortion {
    volume: f32,
}

impl Distortion {
    /// Creates a Distortion from the configured `volume`.
    pub fn new(config: &EffectConfig) -> Result<Self, EffectError> {
        if !config.volume.is_finite() || config.volume < 0.0 {
            return Err(ConfigError::VolumeOutOfRange {
                value: config.volume,
            }
            .into());
        }
        Ok(Distortion {
            volume: config.volume,
        })
    }
}

impl Effect for Distortion {
    fn output_layout(&self) -> ChannelLayout {
        ChannelLayout::Mono
    }

    fn process_mono(&mut self, mut block: AudioBlock) -> Result<AudioBlock, EffectError> {
        if block.layout() != ChannelLayout::Mono {
            return Err(EffectError::ShapeMismatch {
                expected: ChannelLayout::Mono,
                actual: block.layout(),
            });
        }

        let volume = f32x4::splat(self.volume);
        let mut chunks = block.samples_mut().chunks_exact_mut(4);
        for chunk in &mut chunks {
            let scaled = f32x4::new([
                chunk[0] as f32,
                chunk[1] as f32,
                chunk[2] as f32,
                chunk[3] as f32,
            ]) * volume;
            for (sample, value) in chunk.iter_mut().zip(scaled.to_array()) {
                *sample = wrap_sample(value);
            }
        }
        for sample in chunks.into_remainder() {
            *sample = wrap_sample(*sample as f32 * self.volume);
        }

        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn distortion(volume: f32) -> Distortion {
        Distortion::new(&EffectConfig {
            volume,
            ..EffectConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn unity_volume_is_the_identity() {
        let input: Vec<i16> = vec![0, 1, -1, 12345, -12345, i16::MAX, i16::MIN];
        let out = distortion(1.0)
            .process_mono(AudioBlock::mono(input.clone()))
            .unwrap();
        assert_eq!(out.samples(), input);
    }

    #[test]
    fn scales_and_rounds_within_range() {
        let out = distortion(1.5)
            .process_mono(AudioBlock::mono(vec![1000, -2000, 3, -3, 1]))
            .unwrap();
        // 1.5 * 3 = 4.5 rounds away from zero.
        assert_eq!(out.samples(), [1500, -3000, 5, -5, 2]);
    }

    #[test]
    fn overdrive_wraps_instead_of_clipping() {
        let out = distortion(2.0)
            .process_mono(AudioBlock::mono(vec![30000, -30000, 100]))
            .unwrap();
        // 60000 mod 2^16 = 60000 - 65536
        assert_eq!(out.samples(), [-5536, 5536, 200]);
    }

    #[test]
    fn rejects_negative_volume() {
        let err = Distortion::new(&EffectConfig {
            volume: -1.0,
            ..EffectConfig::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            EffectError::Config(ConfigError::VolumeOutOfRange { .. })
        ));
    }

    #[test]
    fn stereo_blocks_are_rejected() {
        let err = distortion(1.0)
            .process_mono(AudioBlock::stereo(vec![1, 1]))
            .unwrap_err();
        assert!(matches!(err, EffectError::ShapeMismatch { .. }));
    }
}
