//! C3: the animation decoder.

mod decoder;
mod delta;
mod output;

pub use decoder::{AnimStreams, decode_animation};
pub use output::{Animation, AnimationType, BoneTrack, Notetrack, RotationKey, TranslationKey};
