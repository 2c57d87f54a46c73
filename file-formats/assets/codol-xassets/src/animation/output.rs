//! Normalised animation output.

use std::collections::HashMap;

/// How an animation's keys compose onto the base pose at playback time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationType {
    /// Keys replace the base pose relative to its parent bone.
    Relative,
    /// Keys replace the base pose in world space (viewmodel animations).
    Absolute,
    /// Keys are a separate `tag_origin`-keyed delta layered under the rest
    /// of the skeleton.
    Delta,
    /// Keys add onto whatever pose is already applied.
    Additive,
}

/// One rotation sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationKey {
    /// Frame this key applies at.
    pub frame: u32,
    /// Quaternion X.
    pub x: f32,
    /// Quaternion Y.
    pub y: f32,
    /// Quaternion Z.
    pub z: f32,
    /// Quaternion W.
    pub w: f32,
}

/// One translation sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationKey {
    /// Frame this key applies at.
    pub frame: u32,
    /// X offset.
    pub x: f32,
    /// Y offset.
    pub y: f32,
    /// Z offset.
    pub z: f32,
}

/// Rotation and translation keys for one bone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoneTrack {
    /// Rotation keys, frame-ordered as produced by the decoder.
    pub rotations: Vec<RotationKey>,
    /// Translation keys, frame-ordered as produced by the decoder.
    pub translations: Vec<TranslationKey>,
}

/// A notetrack event: a named marker fired at a specific frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Notetrack {
    /// Event name.
    pub name: String,
    /// Frame the event fires at.
    pub frame: u32,
}

/// A fully decoded animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Asset name.
    pub name: String,
    /// Playback rate in frames per second.
    pub frame_rate: f32,
    /// Whether this animation loops.
    pub looping: bool,
    /// How this animation composes onto the base pose.
    pub anim_type: AnimationType,
    /// `Some("tag_origin")` when this is a delta animation.
    pub delta_tag_name: Option<String>,
    /// Per-bone type overrides layered on top of `anim_type` (viewmodel
    /// animations mark `j_gun`/`j_gun1` relative even though the animation
    /// as a whole is absolute).
    pub bone_type_overrides: HashMap<String, AnimationType>,
    /// Per-bone rotation/translation tracks, keyed by resolved bone name.
    pub tracks: HashMap<String, BoneTrack>,
    /// Notetrack events.
    pub notetracks: Vec<Notetrack>,
}

impl Animation {
    /// Append a rotation key to `bone`'s track, creating the track if this
    /// is its first key.
    pub fn add_rotation_key(&mut self, bone: impl Into<String>, frame: u32, x: f32, y: f32, z: f32, w: f32) {
        self.tracks
            .entry(bone.into())
            .or_default()
            .rotations
            .push(RotationKey { frame, x, y, z, w });
    }

    /// Append a translation key to `bone`'s track, creating the track if
    /// this is its first key.
    pub fn add_translation_key(&mut self, bone: impl Into<String>, frame: u32, x: f32, y: f32, z: f32) {
        self.tracks
            .entry(bone.into())
            .or_default()
            .translations
            .push(TranslationKey { frame, x, y, z });
    }

    /// Append a notetrack event, skipping blank tags the same way the
    /// decoder's driver does.
    pub fn add_notetrack(&mut self, tag: impl Into<String>, frame: u32) {
        let tag = tag.into();
        if !tag.trim().is_empty() {
            self.notetracks.push(Notetrack { name: tag, frame });
        }
    }
}
