use crate::core::block::{AudioBlock, ChannelLayout};
use crate::core::effect::Effect;
use crate::core::error::EffectError;

/// Placeholder for the stereo reverb.
///
/// No reverb algorithm has been committed yet, so invoking it is an explicit
/// error: the variant can be selected and wired through the driver, but a run
/// that reaches it aborts instead of pretending to process.
pub struct Reverb;

impl Reverb {
    pub fn new() -> Self {
        Reverb
    }
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Reverb {
    fn output_layout(&self) -> ChannelLayout {
        ChannelLayout::Stereo
    }

    fn process_stereo(&mut self, _block: AudioBlock) -> Result<AudioBlock, EffectError> {
        Err(EffectError::Unimplemented { effect: "reverb" })
    }
}
