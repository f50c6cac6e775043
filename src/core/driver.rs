use crate::core::block::{AudioBlock, ChannelLayout};
use crate::core::config::EffectConfig;
use crate::core::effect::Effect;
use crate::core::error::StreamError;

/// Yields blocks from a PCM container in stream order.
pub trait BlockSource {
    type Error;

    /// Sample rate of the underlying stream in Hz.
    fn sample_rate(&self) -> u32;

    /// Channel count of the underlying stream (1 or 2).
    fn channels(&self) -> u16;

    /// Reads up to `frames` frames. Returns `None` once the stream is
    /// exhausted; the final block may be shorter than `frames`.
    fn read_block(&mut self, frames: usize) -> Result<Option<AudioBlock>, Self::Error>;
}

/// Consumes processed blocks in stream order.
pub trait BlockSink {
    type Error;

    fn write_block(&mut self, block: &AudioBlock) -> Result<(), Self::Error>;
}

/// Sequential block pump: source, one effect, sink.
///
/// Holds no audio beyond the block in flight, so memory use is bounded by
/// the effect's internal state plus one block regardless of stream length.
/// Strictly ordered: a block's effect call and write complete before the
/// next read.
pub struct StreamDriver {
    sample_rate: u32,
    block_size: usize,
}

impl StreamDriver {
    pub fn new(config: &EffectConfig) -> Self {
        StreamDriver {
            sample_rate: config.sample_rate,
            block_size: config.block_size,
        }
    }

    /// Runs the effect over the whole stream and returns the frames read.
    ///
    /// The source's sample rate is checked against the configured rate once,
    /// before the first block; a mismatch aborts with nothing read. The
    /// first error from any stage ends the run — whatever the sink already
    /// flushed stays written but is not guaranteed complete.
    pub fn run<S, K>(
        &self,
        source: &mut S,
        sink: &mut K,
        effect: &mut dyn Effect,
    ) -> Result<u64, StreamError<S::Error, K::Error>>
    where
        S: BlockSource,
        K: BlockSink,
    {
        if source.sample_rate() != self.sample_rate {
            return Err(StreamError::SampleRateMismatch {
                expected: self.sample_rate,
                actual: source.sample_rate(),
            });
        }

        let mut frames = 0u64;
        while let Some(block) = source
            .read_block(self.block_size)
            .map_err(StreamError::Source)?
        {
            frames += block.frames() as u64;
            let out = match effect.output_layout() {
                ChannelLayout::Mono => effect.process_mono(block)?,
                ChannelLayout::Stereo => effect.process_stereo(block)?,
            };
            sink.write_block(&out).map_err(StreamError::Sink)?;
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EffectKind;
    use crate::core::effect::build_effect;
    use crate::core::error::EffectError;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    struct VecSource {
        sample_rate: u32,
        data: Vec<i16>,
        pos: usize,
    }

    impl VecSource {
        fn new(sample_rate: u32, data: Vec<i16>) -> Self {
            VecSource {
                sample_rate,
                data,
                pos: 0,
            }
        }
    }

    impl BlockSource for VecSource {
        type Error = Infallible;

        fn sample_rate(&self) -> u32 {
            self.sample_rate
        }

        fn channels(&self) -> u16 {
            1
        }

        fn read_block(&mut self, frames: usize) -> Result<Option<AudioBlock>, Infallible> {
            if self.pos >= self.data.len() {
                return Ok(None);
            }
            let end = (self.pos + frames).min(self.data.len());
            let block = AudioBlock::mono(self.data[self.pos..end].to_vec());
            self.pos = end;
            Ok(Some(block))
        }
    }

    #[derive(Default)]
    struct VecSink {
        blocks: Vec<AudioBlock>,
    }

    impl BlockSink for VecSink {
        type Error = Infallible;

        fn write_block(&mut self, block: &AudioBlock) -> Result<(), Infallible> {
            self.blocks.push(block.clone());
            Ok(())
        }
    }

    fn config(sample_rate: u32, block_size: usize) -> EffectConfig {
        EffectConfig {
            sample_rate,
            block_size,
            volume: 1.0,
            ..EffectConfig::default()
        }
    }

    #[test]
    fn pumps_blocks_in_order_with_short_tail() {
        let config = config(48_000, 4);
        let mut effect = build_effect(EffectKind::Distortion, &config).unwrap();
        let mut source = VecSource::new(48_000, (1..=10).collect());
        let mut sink = VecSink::default();

        let frames = StreamDriver::new(&config)
            .run(&mut source, &mut sink, effect.as_mut())
            .unwrap();

        assert_eq!(frames, 10);
        let lens: Vec<usize> = sink.blocks.iter().map(|b| b.frames()).collect();
        assert_eq!(lens, [4, 4, 2]);
        let flat: Vec<i16> = sink
            .blocks
            .iter()
            .flat_map(|b| b.samples().iter().copied())
            .collect();
        assert_eq!(flat, (1..=10).collect::<Vec<i16>>());
    }

    #[test]
    fn stereo_effects_get_the_stereo_entry_point() {
        let config = config(48_000, 4);
        let mut effect = build_effect(EffectKind::PassthroughStereo, &config).unwrap();
        let mut source = VecSource::new(48_000, vec![7, -7]);
        let mut sink = VecSink::default();

        StreamDriver::new(&config)
            .run(&mut source, &mut sink, effect.as_mut())
            .unwrap();

        assert_eq!(sink.blocks.len(), 1);
        assert_eq!(sink.blocks[0].layout(), ChannelLayout::Stereo);
        assert_eq!(sink.blocks[0].samples(), [7, 7, -7, -7]);
    }

    #[test]
    fn sample_rate_mismatch_aborts_before_any_block() {
        let config = config(48_000, 4);
        let mut effect = build_effect(EffectKind::Distortion, &config).unwrap();
        let mut source = VecSource::new(44_100, vec![1, 2, 3, 4]);
        let mut sink = VecSink::default();

        let err = StreamDriver::new(&config)
            .run(&mut source, &mut sink, effect.as_mut())
            .unwrap_err();

        assert!(matches!(
            err,
            StreamError::SampleRateMismatch {
                expected: 48_000,
                actual: 44_100,
            }
        ));
        assert_eq!(source.pos, 0);
        assert!(sink.blocks.is_empty());
    }

    #[test]
    fn reverb_fails_fast_as_unimplemented() {
        let config = config(48_000, 4);
        let mut effect = build_effect(EffectKind::Reverb, &config).unwrap();
        let mut source = VecSource::new(48_000, vec![1, 2, 3, 4]);
        let mut sink = VecSink::default();

        let err = StreamDriver::new(&config)
            .run(&mut source, &mut sink, effect.as_mut())
            .unwrap_err();

        assert!(matches!(
            err,
            StreamError::Effect(EffectError::Unimplemented { effect: "reverb" })
        ));
        assert!(sink.blocks.is_empty());
    }
}
