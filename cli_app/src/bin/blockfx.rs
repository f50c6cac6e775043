use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blockfx_cli::wav_io::{WavBlockSink, WavBlockSource};
use blockfx_core::synthesis::oscillator::{Oscillator, Waveform};
use blockfx_core::synthesis::signals::{self, TestSignal};
use blockfx_core::{build_effect, BlockSource, Effect, EffectConfig, EffectKind, StreamDriver};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info};

#[derive(Parser)]
#[command(
    name = "blockfx",
    version,
    about = "Offline block effects for 16-bit PCM WAV files"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args)]
struct IoArgs {
    /// Input WAV file (16-bit signed PCM, mono or stereo).
    input: PathBuf,
    /// Output WAV file.
    output: PathBuf,
    /// Expected sample rate of the input in Hz.
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,
    /// Frames processed per block.
    #[arg(long, default_value_t = 1024)]
    block_size: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Apply a feedback delay.
    Delay {
        #[command(flatten)]
        io: IoArgs,
        /// Delay time in seconds.
        #[arg(long, default_value_t = 0.5)]
        time: f32,
        /// Feedback gain in [0, 1].
        #[arg(long, default_value_t = 0.5)]
        feedback: f32,
        /// Wet/dry mix in [0, 1]: 0 is dry only, 1 is wet only.
        #[arg(long, default_value_t = 0.5)]
        mix: f32,
        /// Delay buffer headroom in seconds.
        #[arg(long, default_value_t = 5.0)]
        state_size: f32,
    },
    /// Apply gain distortion. Gain past full scale wraps, loudly.
    Distortion {
        #[command(flatten)]
        io: IoArgs,
        /// Amplification factor, 1.0 is unity.
        #[arg(long, default_value_t = 2.0)]
        volume: f32,
    },
    /// Apply the stereo reverb (currently fails as unimplemented).
    Reverb {
        #[command(flatten)]
        io: IoArgs,
        /// Substitute the diagnostic mono-to-stereo duplication.
        #[arg(long)]
        test: bool,
    },
    /// Render a test wave to a WAV file.
    Generate {
        /// Output WAV file.
        output: PathBuf,
        /// Tone frequency in Hz (sine rendering only).
        #[arg(long, default_value_t = 440.0)]
        frequency: f32,
        /// Output sample rate in Hz.
        #[arg(long, default_value_t = 44_100)]
        sample_rate: u32,
        /// Duration in seconds.
        #[arg(long, default_value_t = 1.0)]
        duration: f32,
        /// Render a reference signal instead of a sine wave.
        #[arg(long, value_enum)]
        signal: Option<SignalArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SignalArg {
    DcStep,
    Nyquist,
    HalfNyquist,
    QuarterNyquist,
    Impulse,
}

impl From<SignalArg> for TestSignal {
    fn from(arg: SignalArg) -> Self {
        match arg {
            SignalArg::DcStep => TestSignal::DcStep,
            SignalArg::Nyquist => TestSignal::Nyquist,
            SignalArg::HalfNyquist => TestSignal::HalfNyquist,
            SignalArg::QuarterNyquist => TestSignal::QuarterNyquist,
            SignalArg::Impulse => TestSignal::Impulse,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().cmd {
        Command::Delay {
            io,
            time,
            feedback,
            mix,
            state_size,
        } => {
            let config = EffectConfig {
                sample_rate: io.sample_rate,
                block_size: io.block_size,
                time,
                feedback,
                mix,
                state_size_s: state_size,
                ..EffectConfig::default()
            };
            run_effect(EffectKind::Delay, &config, &io)
        }
        Command::Distortion { io, volume } => {
            let config = EffectConfig {
                sample_rate: io.sample_rate,
                block_size: io.block_size,
                volume,
                ..EffectConfig::default()
            };
            run_effect(EffectKind::Distortion, &config, &io)
        }
        Command::Reverb { io, test } => {
            let kind = if test {
                EffectKind::PassthroughStereo
            } else {
                EffectKind::Reverb
            };
            let config = EffectConfig {
                sample_rate: io.sample_rate,
                block_size: io.block_size,
                ..EffectConfig::default()
            };
            run_effect(kind, &config, &io)
        }
        Command::Generate {
            output,
            frequency,
            sample_rate,
            duration,
            signal,
        } => generate(&output, frequency, sample_rate, duration, signal),
    }
}

fn run_effect(kind: EffectKind, config: &EffectConfig, io: &IoArgs) -> Result<()> {
    let mut effect = build_effect(kind, config)?;

    let mut source = WavBlockSource::open(&io.input)
        .with_context(|| format!("opening {}", io.input.display()))?;
    info!(
        "processing {}: {} ch at {} Hz, {} frames",
        io.input.display(),
        source.channels(),
        source.sample_rate(),
        source.duration_frames()
    );

    let mut sink = WavBlockSink::create(&io.output, config.sample_rate, effect.output_layout())
        .with_context(|| format!("creating {}", io.output.display()))?;

    let frames = StreamDriver::new(config).run(&mut source, &mut sink, effect.as_mut())?;
    sink.finalize()?;

    debug!("{frames} frames processed");
    info!("wrote {}", io.output.display());
    Ok(())
}

fn generate(
    output: &Path,
    frequency: f32,
    sample_rate: u32,
    duration: f32,
    signal: Option<SignalArg>,
) -> Result<()> {
    let data = match signal {
        Some(arg) => {
            let samples = (sample_rate as f32 * duration) as usize + 1;
            signals::to_i16_full_scale(&signals::generate(arg.into(), samples))
        }
        None => Oscillator::new(frequency, sample_rate).render(Waveform::Sine, duration),
    };
    info!("generating {} samples to {}", data.len(), output.display());

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(output, spec)
        .with_context(|| format!("creating {}", output.display()))?;
    for sample in data {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
