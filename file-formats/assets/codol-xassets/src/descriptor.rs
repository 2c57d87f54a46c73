//! Input descriptors the animation and model decoders consume.
//!
//! These mirror the already-resolved asset structures the driver builds
//! while sweeping a pool (see [`crate::pool`]): by the time a descriptor
//! reaches [`crate::animation::decode_animation`] or
//! [`crate::model::decode_model`], placeholder filtering has already run
//! and pointers have already been widened to 64-bit addresses.

use bitflags::bitflags;

bitflags! {
    /// Animation-level flags classified from the asset name or header before
    /// the decoder runs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AnimFlags: u8 {
        /// Name starts with `viewmodel_`.
        const VIEWMODEL = 1 << 0;
        /// Header's loop count is nonzero.
        const LOOPING = 1 << 1;
        /// Header marks this animation additive.
        const ADDITIVE = 1 << 2;
        /// This title's format supports the inline bone-index encoding.
        const SUPPORTS_INLINE_INDICES = 1 << 3;
    }
}

/// How rotation keys are packed in the data streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCoding {
    /// Fixed-point, unpacked by dividing by a per-size scale.
    DivideBySize,
    /// IEEE 754 half-precision components.
    HalfFloat,
}

/// How translation keys are packed. Only one coding is used by the title
/// this decoder targets; kept as an enum to name the field the way the
/// source does rather than hardcoding the behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationCoding {
    /// Minimum/size table-relative fixed-point encoding.
    MinSizeTable,
}

/// Everything [`crate::animation::decode_animation`] needs to run the
/// 11-stage pipeline, resolved and widened by the out-of-scope driver.
#[derive(Debug, Clone)]
pub struct AnimDescriptor {
    /// Asset name.
    pub name: String,
    /// Playback rate in frames per second.
    pub frame_rate: f32,
    /// Total frame count.
    pub frame_count: u32,
    /// Viewmodel/looping/additive/inline-index flags.
    pub flags: AnimFlags,

    /// Bone name string-table index stream.
    pub bone_ids_ptr: u64,
    /// Width in bytes of each bone-id entry (2 or 4).
    pub bone_index_size: u8,
    /// Width in bytes of the inline bone-type index, 0 when unused.
    pub bone_type_size: u8,

    /// Rotation key coding.
    pub rotation_coding: RotationCoding,
    /// Translation key coding.
    pub translation_coding: TranslationCoding,

    /// Byte-keyed frame-index stream.
    pub data_bytes_ptr: u64,
    /// Short-keyed frame-index stream.
    pub data_shorts_ptr: u64,
    /// Int-keyed frame-index stream.
    pub data_ints_ptr: u64,

    /// Byte-keyed random-data stream.
    pub random_data_bytes_ptr: u64,
    /// Short-keyed random-data stream.
    pub random_data_shorts_ptr: u64,
    /// Int-keyed random-data stream.
    pub random_data_ints_ptr: u64,

    /// Long (>255 bones) index stream, used when inline indices are absent.
    pub long_indices_ptr: u64,
    /// Notetrack stream.
    pub notifications_ptr: u64,

    /// Delta translation stream (`tag_origin`-keyed, stages 8-10).
    pub delta_translation_ptr: u64,
    /// Delta 2D rotation stream.
    pub delta_2d_rotations_ptr: u64,
    /// Delta 3D rotation stream.
    pub delta_3d_rotations_ptr: u64,

    /// Count of bones with no rotation keys.
    pub none_rotated_bone_count: u32,
    /// Count of bones with 2D rotation keys.
    pub two_d_rotated_bone_count: u32,
    /// Count of bones with full 3D rotation keys.
    pub normal_rotated_bone_count: u32,
    /// Count of bones with a single static 2D rotation.
    pub two_d_static_rotated_bone_count: u32,
    /// Count of bones with a single static 3D rotation.
    pub normal_static_rotated_bone_count: u32,
    /// Count of bones with normal-precision translation keys.
    pub normal_translated_bone_count: u32,
    /// Count of bones with precise (higher-precision) translation keys.
    pub precise_translated_bone_count: u32,
    /// Count of bones with a single static translation.
    pub static_translated_bone_count: u32,
    /// Count of bones with no translation keys.
    pub none_translated_bone_count: u32,
    /// Total bone count across all classes above.
    pub total_bone_count: u32,
    /// Notetrack entry count.
    pub notification_count: u32,
}

/// How bone rotations are packed in a model's local-rotation stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneRotationData {
    /// Fixed-point, unpacked by dividing by a per-size scale.
    DivideBySize,
    /// IEEE 754 half-precision components.
    HalfFloat,
}

/// Everything [`crate::model::decode_model`] needs to build bones, LODs,
/// and materials.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    /// Asset name.
    pub name: String,
    /// Local-rotation stream coding.
    pub bone_rotation_data: BoneRotationData,
    /// Whether this model's mesh data is loaded through the streaming LOD
    /// loader rather than inline; streamed meshes are out of scope (§1).
    pub is_streamed: bool,

    /// Total bone count.
    pub bone_count: u32,
    /// Count of bones with no parent (root bones).
    pub root_bone_count: u32,
    /// Count of cosmetic (non-skeletal, e.g. cloth) bones.
    pub cosmetic_bone_count: u32,

    /// Bone name string-table index stream.
    pub bone_ids_ptr: u64,
    /// Width in bytes of each bone-id entry.
    pub bone_index_size: u8,
    /// Bone parent-index stream.
    pub bone_parents_ptr: u64,
    /// Width in bytes of each parent-index entry.
    pub bone_parent_size: u8,

    /// Local rotation stream.
    pub rotations_ptr: u64,
    /// Local translation stream.
    pub translations_ptr: u64,
    /// Base (global) matrix stream, read when local positions must be
    /// regenerated.
    pub base_matrices_ptr: u64,

    /// Ordered LODs, highest detail first.
    pub lods: Vec<LodDescriptor>,
}

/// One level of detail: its own submesh/material set and display distance.
#[derive(Debug, Clone)]
pub struct LodDescriptor {
    /// Submeshes belonging to this LOD.
    pub submeshes: Vec<SubmeshDescriptor>,
    /// Materials in submesh-index order.
    pub materials: Vec<MaterialDescriptor>,
    /// Distance at which this LOD becomes visible.
    pub distance: f32,
    /// Distance at which this LOD stops being visible.
    pub max_distance: f32,
}

/// One submesh's vertex/face/weight layout within a LOD.
#[derive(Debug, Clone)]
pub struct SubmeshDescriptor {
    /// Count of rigid (single-bone) vertex/weight pairs.
    pub vert_list_count: u32,
    /// Rigid weight stream.
    pub rigid_weights_ptr: u64,
    /// Vertex count.
    pub vertex_count: u32,
    /// Face count.
    pub face_count: u32,
    /// Face index stream.
    pub faces_ptr: u64,
    /// Vertex stream.
    pub vertex_ptr: u64,
    /// Per-weight-group vertex counts (4 groups used, 8 slots reserved).
    pub weight_counts: [u16; 8],
    /// Variable-width weight stream.
    pub weights_ptr: u64,
    /// Index into the LOD's material list.
    pub material_index: i32,
}

/// What an image attached to a material is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageUsage {
    /// Usage not classified.
    Unknown,
    /// Base color map.
    Diffuse,
    /// Tangent-space normal map.
    Normal,
    /// Specular/reflectivity map.
    Specular,
    /// Gloss/roughness map.
    Gloss,
}

/// One image slot on a material.
#[derive(Debug, Clone)]
pub struct MaterialImage {
    /// What this image is used for.
    pub usage: ImageUsage,
    /// Pointer to the backing image asset.
    pub pointer: u64,
    /// Image asset name.
    pub name: String,
}

/// A material already resolved to its name and image set.
#[derive(Debug, Clone)]
pub struct MaterialDescriptor {
    /// Material name.
    pub name: String,
    /// Attached images.
    pub images: Vec<MaterialImage>,
}
