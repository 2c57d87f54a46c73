//! Normalised model output.

use std::fmt;

use codol_utils::debug::trimmed_collection_fmt;
use glam::{Quat, Vec3};

/// One skeletal bone.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Resolved (or synthesized) bone name.
    pub name: String,
    /// Index of the parent bone, or `-1` for a root bone.
    pub parent_index: i32,
    /// Global (model-space) position.
    pub global_position: Vec3,
    /// Global (model-space) rotation.
    pub global_rotation: Quat,
    /// Position relative to the parent bone.
    pub local_position: Vec3,
    /// Rotation relative to the parent bone.
    pub local_rotation: Quat,
}

/// A material resolved to a name and its classified image slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Material name.
    pub name: String,
    /// Base color map, if any.
    pub diffuse_map: Option<String>,
    /// Tangent-space normal map, if any.
    pub normal_map: Option<String>,
    /// Specular/reflectivity map, if any.
    pub specular_map: Option<String>,
}

/// One vertex's position, UV, normal, and bone weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Model-space position.
    pub position: Vec3,
    /// Texture coordinates.
    pub uv: (f32, f32),
    /// Unpacked vertex normal.
    pub normal: Vec3,
    /// `(bone_index, weight)` pairs; always sums to 1.0 across entries.
    pub weights: Vec<(u32, f32)>,
}

/// One indexed triangle.
pub type Face = (u16, u16, u16);

/// One submesh: its material and its vertex/face buffers.
#[derive(Clone, PartialEq)]
pub struct Submesh {
    /// Index into [`Model::materials`].
    pub material_index: u32,
    /// Vertex buffer.
    pub vertices: Vec<Vertex>,
    /// Face index buffer.
    pub faces: Vec<Face>,
}

impl fmt::Debug for Submesh {
    /// Trims `vertices`/`faces` to their first three elements; a dense mesh's
    /// full buffers are unreadable in a debug dump and rarely what's needed.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Submesh")
            .field("material_index", &self.material_index)
            .field("vertices", &DebugTrimmed(&self.vertices))
            .field("faces", &DebugTrimmed(&self.faces))
            .finish()
    }
}

struct DebugTrimmed<'a, T>(&'a Vec<T>);

impl<T: fmt::Debug> fmt::Debug for DebugTrimmed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        trimmed_collection_fmt(self.0, f)
    }
}

/// A fully decoded model at one LOD.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Asset name.
    pub name: String,
    /// Distance this LOD becomes visible at.
    pub lod_distance: f32,
    /// Distance this LOD stops being visible at.
    pub lod_max_distance: f32,
    /// Skeleton, parent-before-child ordered.
    pub bones: Vec<Bone>,
    /// Unique materials in first-seen order.
    pub materials: Vec<Material>,
    /// Submeshes, each referencing one entry in `materials`.
    pub submeshes: Vec<Submesh>,
}
