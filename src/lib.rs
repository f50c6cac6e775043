#![no_std]

extern crate alloc;

pub mod core;
pub mod effects;
pub mod synthesis;

pub use crate::core::block::{AudioBlock, ChannelLayout};
pub use crate::core::config::{EffectConfig, EffectKind};
pub use crate::core::driver::{BlockSink, BlockSource, StreamDriver};
pub use crate::core::effect::{build_effect, Effect};
pub use crate::core::error::{ConfigError, EffectError, StreamError};
