use alloc::boxed::Box;

use crate::core::block::{AudioBlock, ChannelLayout};
use crate::core::config::{EffectConfig, EffectKind};
use crate::core::error::EffectError;
use crate::effects::dynamics::distortion::Distortion;
use crate::effects::time::delay::DelayLine;
use crate::effects::time::reverb::Reverb;
use crate::effects::utility::stereo_duplicate::StereoDuplicate;

/// A per-block audio transform, stateless or stateful.
///
/// Every concrete effect commits to exactly one entry point and reports the
/// layout it produces through [`Effect::output_layout`]; the driver uses that
/// to dispatch. The uncommitted entry point fails with
/// [`EffectError::ShapeMismatch`] via the trait defaults, so no variant can
/// fall through to a silent no-op.
///
/// The pipeline feeds effects mono blocks: mono effects return mono, stereo
/// effects synthesize both output channels from the mono input. Stateful
/// effects may mutate internal state per call and must stay consistent with
/// every prior call in sequence; none of them sees stream position or total
/// length.
pub trait Effect {
    /// Channel layout of the blocks this effect produces.
    fn output_layout(&self) -> ChannelLayout;

    /// Transforms one mono block into the next mono output block.
    fn process_mono(&mut self, block: AudioBlock) -> Result<AudioBlock, EffectError> {
        let _ = block;
        Err(EffectError::ShapeMismatch {
            expected: self.output_layout(),
            actual: ChannelLayout::Mono,
        })
    }

    /// Transforms one mono block into the next interleaved stereo block.
    fn process_stereo(&mut self, block: AudioBlock) -> Result<AudioBlock, EffectError> {
        let _ = block;
        Err(EffectError::ShapeMismatch {
            expected: self.output_layout(),
            actual: ChannelLayout::Stereo,
        })
    }
}

/// Builds the selected effect variant from one immutable config.
///
/// The only construction path the driver layer uses; all parameter
/// validation happens here, before the first block is read.
pub fn build_effect(
    kind: EffectKind,
    config: &EffectConfig,
) -> Result<Box<dyn Effect>, EffectError> {
    let effect: Box<dyn Effect> = match kind {
        EffectKind::Distortion => Box::new(Distortion::new(config)?),
        EffectKind::Delay => Box::new(DelayLine::new(config)?),
        EffectKind::Reverb => Box::new(Reverb::new()),
        EffectKind::PassthroughStereo => Box::new(StereoDuplicate::new()),
    };
    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn build_covers_every_kind() {
        let config = EffectConfig::default();
        for kind in [
            EffectKind::Distortion,
            EffectKind::Delay,
            EffectKind::Reverb,
            EffectKind::PassthroughStereo,
        ] {
            assert!(build_effect(kind, &config).is_ok());
        }
    }

    #[test]
    fn uncommitted_entry_point_is_a_shape_mismatch() {
        let config = EffectConfig::default();
        let mut delay = build_effect(EffectKind::Delay, &config).unwrap();
        let err = delay
            .process_stereo(AudioBlock::mono(vec![0; 4]))
            .unwrap_err();
        assert!(matches!(err, EffectError::ShapeMismatch { .. }));

        let mut duplicate = build_effect(EffectKind::PassthroughStereo, &config).unwrap();
        let err = duplicate
            .process_mono(AudioBlock::mono(vec![0; 4]))
            .unwrap_err();
        assert!(matches!(err, EffectError::ShapeMismatch { .. }));
    }
}
