//! WAV container adapters for the block pipeline.
//!
//! 16-bit signed PCM only. Stereo input contributes its left channel — the
//! mono pipeline upstream expects one channel and the right one is dropped.
//! Output shape follows whatever block layout the effect produces.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use blockfx_core::{AudioBlock, BlockSink, BlockSource, ChannelLayout};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

pub struct WavBlockSource {
    reader: WavReader<BufReader<File>>,
    spec: WavSpec,
}

impl WavBlockSource {
    /// Opens a WAV file, rejecting anything but 16-bit integer PCM in one
    /// or two channels.
    pub fn open(path: &Path) -> Result<Self, hound::Error> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(hound::Error::Unsupported);
        }
        if spec.channels == 0 || spec.channels > 2 {
            return Err(hound::Error::Unsupported);
        }
        Ok(WavBlockSource { reader, spec })
    }

    /// Total length of the stream in frames.
    pub fn duration_frames(&self) -> u32 {
        self.reader.duration()
    }
}

impl BlockSource for WavBlockSource {
    type Error = hound::Error;

    fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    fn channels(&self) -> u16 {
        self.spec.channels
    }

    fn read_block(&mut self, frames: usize) -> Result<Option<AudioBlock>, hound::Error> {
        let channels = self.spec.channels as usize;
        let mut data = Vec::with_capacity(frames);
        let mut samples = self.reader.samples::<i16>();
        'frames: for _ in 0..frames {
            let mut frame = [0i16; 2];
            for slot in frame.iter_mut().take(channels) {
                match samples.next() {
                    Some(sample) => *slot = sample?,
                    None => break 'frames,
                }
            }
            data.push(frame[0]);
        }
        if data.is_empty() {
            return Ok(None);
        }
        Ok(Some(AudioBlock::mono(data)))
    }
}

pub struct WavBlockSink {
    writer: WavWriter<BufWriter<File>>,
}

impl WavBlockSink {
    /// Creates the output file with a header matching the effect's output
    /// layout at the configured sample rate.
    pub fn create(
        path: &Path,
        sample_rate: u32,
        layout: ChannelLayout,
    ) -> Result<Self, hound::Error> {
        let spec = WavSpec {
            channels: layout.channels() as u16,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        Ok(WavBlockSink {
            writer: WavWriter::create(path, spec)?,
        })
    }

    /// Finishes the data chunk and flushes the header.
    pub fn finalize(self) -> Result<(), hound::Error> {
        self.writer.finalize()
    }
}

impl BlockSink for WavBlockSink {
    type Error = hound::Error;

    fn write_block(&mut self, block: &AudioBlock) -> Result<(), hound::Error> {
        for &sample in block.samples() {
            self.writer.write_sample(sample)?;
        }
        Ok(())
    }
}
