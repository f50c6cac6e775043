use alloc::vec;
use alloc::vec::Vec;

use crate::core::block::{wrap_sample, AudioBlock, ChannelLayout};
use crate::core::config::EffectConfig;
use crate::core::effect::Effect;
use crate::core::error::{ConfigError, EffectError};

/// A feedback delay line over circular 16-bit storage.
///
/// Storage holds `state_size_s` seconds of samples, but only the leading
/// `delay_samples` entries are ever addressed: the active delay length, not
/// the allocated capacity, is the period of the feedback loop. The unused
/// tail is reserved headroom so the delay time can grow up to the headroom
/// without reallocating.
///
/// Each block reads the echo written one period ago and re-seeds the same
/// region with `state * feedback + dry`, so an impulse comes back every
/// `delay_samples` samples, attenuated by another factor of `feedback` per
/// round trip. Stored samples wrap on overflow like every other gain stage
/// (see [`wrap_sample`]).
#[derive(Debug)]
pub struct DelayLine {
    state: Vec<i16>,
    delay_samples: usize,
    cursor: usize,
    feedback: f32,
    mix: f32,
}

impl DelayLine {
    /// Validates the delay parameters and allocates zeroed storage.
    ///
    /// Fails if `time` does not fit in `state_size_s`, if the delay is too
    /// short to splice whole blocks, or if `feedback`/`mix` leave [0, 1].
    pub fn new(config: &EffectConfig) -> Result<Self, EffectError> {
        if config.time > config.state_size_s {
            return Err(ConfigError::DelayExceedsHeadroom {
                time: config.time,
                state_size_s: config.state_size_s,
            }
            .into());
        }
        for (name, value) in [("feedback", config.feedback), ("mix", config.mix)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::GainOutOfRange { name, value }.into());
            }
        }

        let capacity = (config.state_size_s * config.sample_rate as f32) as usize;
        let delay_samples = (config.time * config.sample_rate as f32) as usize;
        if delay_samples < config.block_size {
            return Err(ConfigError::DelayShorterThanBlock {
                delay_samples,
                block_size: config.block_size,
            }
            .into());
        }

        Ok(DelayLine {
            state: vec![0; capacity],
            delay_samples,
            cursor: 0,
            feedback: config.feedback,
            mix: config.mix,
        })
    }

    /// Mixes one contiguous span of stored echo into `out` and re-seeds it
    /// from the dry input.
    fn splice(&mut self, start: usize, dry: &[i16], out: &mut [i16]) {
        let span = &mut self.state[start..start + dry.len()];
        for ((stored, &input), mixed) in span.iter_mut().zip(dry).zip(out) {
            let wet = *stored as f32;
            *mixed = wrap_sample(input as f32 * (1.0 - self.mix) + wet * self.mix);
            *stored = wrap_sample(wet * self.feedback + input as f32);
        }
    }

    #[cfg(test)]
    fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Effect for DelayLine {
    fn output_layout(&self) -> ChannelLayout {
        ChannelLayout::Mono
    }

    fn process_mono(&mut self, block: AudioBlock) -> Result<AudioBlock, EffectError> {
        if block.layout() != ChannelLayout::Mono {
            return Err(EffectError::ShapeMismatch {
                expected: ChannelLayout::Mono,
                actual: block.layout(),
            });
        }

        let n = block.frames();
        debug_assert!(n <= self.delay_samples, "block longer than the delay period");

        let dry = block.samples();
        let mut out = vec![0i16; n];

        // The echo region ends at the active delay length, never at the
        // storage capacity; a block that crosses it splits into two spans.
        let contiguous = self.delay_samples.min(self.cursor + n) - self.cursor;
        let wrapped = n - contiguous;

        self.splice(self.cursor, &dry[..contiguous], &mut out[..contiguous]);
        if wrapped > 0 {
            self.splice(0, &dry[contiguous..], &mut out[contiguous..]);
        }

        self.cursor = (self.cursor + n) % self.delay_samples;
        Ok(AudioBlock::mono(out))
    }
}
