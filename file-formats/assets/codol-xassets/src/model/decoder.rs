//! C4: the model decoder.

use codol_mem::{Spawn, StreamReader, half_to_f32};
use glam::{Quat, Vec3};

use crate::descriptor::{BoneRotationData, ImageUsage, ModelDescriptor};
use crate::error::{Error, Result};
use crate::strings::StringResolver;

use super::output::{Bone, Face, Material, Model, Submesh, Vertex};

/// Picks the LOD index the original exporter calls "biggest": among more
/// than one LOD, the closest-distance entry that doesn't also have fewer
/// submeshes than the current pick. A single LOD is always index 0; zero
/// LODs has no valid index.
#[must_use]
pub fn biggest_lod_index(lod_distances: &[(f32, usize)]) -> Option<usize> {
    match lod_distances.len() {
        0 => None,
        1 => Some(0),
        _ => {
            let mut result = 0;
            for i in 0..lod_distances.len() {
                if lod_distances[i].0 < lod_distances[result].0 && lod_distances[i].1 >= lod_distances[result].1 {
                    result = i;
                }
            }
            Some(result)
        }
    }
}

fn read_vec3<R: StreamReader>(cursor: &mut R) -> Vec3 {
    Vec3::new(
        cursor.read_value::<f32>(),
        cursor.read_value::<f32>(),
        cursor.read_value::<f32>(),
    )
}

fn read_quat_raw<R: StreamReader>(cursor: &mut R) -> (f32, f32, f32, f32) {
    (
        cursor.read_value::<f32>(),
        cursor.read_value::<f32>(),
        cursor.read_value::<f32>(),
        cursor.read_value::<f32>(),
    )
}

fn read_local_quat<R: StreamReader>(cursor: &mut R, coding: BoneRotationData) -> Quat {
    let x = cursor.read_value::<u16>();
    let y = cursor.read_value::<u16>();
    let z = cursor.read_value::<u16>();
    let w = cursor.read_value::<u16>();
    match coding {
        BoneRotationData::DivideBySize => Quat::from_xyzw(
            f32::from(x as i16) / 32768.0,
            f32::from(y as i16) / 32768.0,
            f32::from(z as i16) / 32768.0,
            f32::from(w as i16) / 32768.0,
        ),
        BoneRotationData::HalfFloat => Quat::from_xyzw(half_to_f32(x), half_to_f32(y), half_to_f32(z), half_to_f32(w)),
    }
}

fn read_index<R: StreamReader>(cursor: &mut R, size: u8) -> u64 {
    match size {
        1 => u64::from(cursor.read_value::<u8>()),
        2 => u64::from(cursor.read_value::<u16>()),
        4 => u64::from(cursor.read_value::<u32>()),
        _ => 0,
    }
}

/// Unpacks a tangent-frame-encoded normal: three signed components scaled
/// by a per-vector scale derived from the fourth byte.
#[must_use]
pub fn unpack_normal(packed: u32) -> Vec3 {
    let bytes = packed.to_le_bytes();
    let scale = (f32::from(bytes[3]) - -192.0) / 32385.0;
    Vec3::new(
        (f32::from(bytes[0]) - 127.0) * scale,
        (f32::from(bytes[1]) - 127.0) * scale,
        (f32::from(bytes[2]) - 127.0) * scale,
    )
}

#[derive(Debug, Clone, Copy)]
struct VertexWeight {
    count: u8,
    bones: [u32; 4],
    weights: [f32; 4],
}

impl Default for VertexWeight {
    fn default() -> Self {
        Self {
            count: 1,
            bones: [0; 4],
            weights: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

fn decode_vertex_weights<R: StreamReader + Spawn>(
    anchor: &R,
    vert_list_count: u32,
    rigid_weights_ptr: u64,
    weight_counts: [u16; 8],
    weights_ptr: u64,
    vertex_count: u32,
) -> Vec<VertexWeight> {
    let mut weights = vec![VertexWeight::default(); vertex_count as usize];
    let mut index = 0usize;

    let mut rigid = anchor.spawn(rigid_weights_ptr);
    for _ in 0..vert_list_count {
        let bone_index = rigid.read_value::<u16>();
        let rigid_vertex_count = rigid.read_value::<u16>();
        rigid.read_value::<u16>(); // faces count, unused
        rigid.read_value::<u16>(); // faces index, unused
        rigid.read_value::<u32>(); // surface collision pointer, unused
        for _ in 0..rigid_vertex_count {
            if let Some(w) = weights.get_mut(index) {
                w.bones[0] = u32::from(bone_index) / 64;
            }
            index += 1;
        }
    }

    let mut data = anchor.spawn(weights_ptr);

    for _ in 0..weight_counts[0] {
        if let Some(w) = weights.get_mut(index) {
            w.bones[0] = u32::from(data.read_value::<u16>()) / 64;
        } else {
            data.read_value::<u16>();
        }
        index += 1;
    }

    for _ in 0..weight_counts[1] {
        let b0 = u32::from(data.read_value::<u16>()) / 64;
        let b1 = u32::from(data.read_value::<u16>()) / 64;
        let w1 = f32::from(data.read_value::<u16>()) / 65536.0;
        if let Some(w) = weights.get_mut(index) {
            w.count = 2;
            w.bones[0] = b0;
            w.bones[1] = b1;
            w.weights[1] = w1;
            w.weights[0] = 1.0 - w1;
        }
        index += 1;
    }

    for _ in 0..weight_counts[2] {
        let b0 = u32::from(data.read_value::<u16>()) / 64;
        let b1 = u32::from(data.read_value::<u16>()) / 64;
        let w1 = f32::from(data.read_value::<u16>()) / 65536.0;
        let b2 = u32::from(data.read_value::<u16>()) / 64;
        let w2 = f32::from(data.read_value::<u16>()) / 65536.0;
        if let Some(w) = weights.get_mut(index) {
            w.count = 3;
            w.bones[0] = b0;
            w.bones[1] = b1;
            w.bones[2] = b2;
            w.weights[1] = w1;
            w.weights[2] = w2;
            w.weights[0] = 1.0 - (w1 + w2);
        }
        index += 1;
    }

    for _ in 0..weight_counts[3] {
        let b0 = u32::from(data.read_value::<u16>()) / 64;
        let b1 = u32::from(data.read_value::<u16>()) / 64;
        let w1 = f32::from(data.read_value::<u16>()) / 65536.0;
        let b2 = u32::from(data.read_value::<u16>()) / 64;
        let w2 = f32::from(data.read_value::<u16>()) / 65536.0;
        let b3 = u32::from(data.read_value::<u16>()) / 64;
        let w3 = f32::from(data.read_value::<u16>()) / 65536.0;
        if let Some(w) = weights.get_mut(index) {
            w.count = 4;
            w.bones[0] = b0;
            w.bones[1] = b1;
            w.bones[2] = b2;
            w.bones[3] = b3;
            w.weights[1] = w1;
            w.weights[2] = w2;
            w.weights[3] = w3;
            w.weights[0] = 1.0 - (w1 + w2 + w3);
        }
        index += 1;
    }

    weights
}

/// Decodes `desc`'s LOD at `lod_index` into a normalised [`Model`].
///
/// `anchor` is any cursor already open over the same address space the
/// descriptor's pointer fields refer to; this function spawns the cursors
/// it actually needs from it (see [`codol_mem::Spawn`]).
pub fn decode_model<R: StreamReader + Spawn>(
    desc: &ModelDescriptor,
    lod_index: usize,
    anchor: &R,
    resolver: &impl StringResolver,
) -> Result<Model> {
    let lod = desc.lods.get(lod_index).ok_or(Error::NoLods)?;

    let total_bones = desc.bone_count + desc.cosmetic_bone_count;
    let mut base_matrices = anchor.spawn(desc.base_matrices_ptr);
    let mut local_translations = anchor.spawn(desc.translations_ptr);
    let mut local_rotations = anchor.spawn(desc.rotations_ptr);
    let mut bone_ids = anchor.spawn(desc.bone_ids_ptr);
    let mut bone_parents = anchor.spawn(desc.bone_parents_ptr);

    let mut bones = Vec::with_capacity(total_bones as usize);
    let mut needs_local_positions = true;

    for i in 0..total_bones {
        let bone_id = read_index(&mut bone_ids, desc.bone_index_size);
        let resolved = resolver.resolve(bone_id);
        let name = if resolved.is_empty() {
            if i == 0 {
                "tag_origin".to_string()
            } else {
                format!("no_tag_{i}")
            }
        } else {
            resolved
        };

        let is_non_root = i >= desc.root_bone_count;
        let parent_index = if is_non_root {
            let raw_parent = read_index(&mut bone_parents, desc.bone_parent_size) as i32;
            if i < desc.bone_count {
                i as i32 - raw_parent
            } else {
                raw_parent
            }
        } else {
            i as i32 - 1
        };

        let (rx, ry, rz, rw) = read_quat_raw(&mut base_matrices);
        let global_rotation = Quat::from_xyzw(rx, ry, rz, rw);
        let global_position = read_vec3(&mut base_matrices);
        base_matrices.read_value::<f32>(); // translation weight, unused

        let mut local_position = Vec3::ZERO;
        let mut local_rotation = Quat::IDENTITY;
        if is_non_root {
            local_position = read_vec3(&mut local_translations);
            if local_position != Vec3::ZERO {
                needs_local_positions = false;
            }
            local_rotation = read_local_quat(&mut local_rotations, desc.bone_rotation_data);
        }

        bones.push(Bone {
            name,
            parent_index,
            global_position,
            global_rotation,
            local_position,
            local_rotation,
        });
    }

    if needs_local_positions && desc.bone_count > 1 {
        regenerate_local_positions(&mut bones);
    }

    let mut materials: Vec<Material> = Vec::new();
    let mut material_names: Vec<String> = Vec::new();

    let mut submeshes = Vec::with_capacity(lod.submeshes.len());
    for submesh in &lod.submeshes {
        let source_material = lod
            .materials
            .get(submesh.material_index.max(0) as usize)
            .ok_or(Error::InvalidMaterialIndex(submesh.material_index))?;
        let material_index = match material_names.iter().position(|n| n == &source_material.name) {
            Some(idx) => idx,
            None => {
                let mut new_material = Material {
                    name: source_material.name.clone(),
                    ..Default::default()
                };
                for image in &source_material.images {
                    match image.usage {
                        ImageUsage::Diffuse => new_material.diffuse_map = Some(image.name.clone()),
                        ImageUsage::Normal => new_material.normal_map = Some(image.name.clone()),
                        ImageUsage::Specular => new_material.specular_map = Some(image.name.clone()),
                        ImageUsage::Unknown | ImageUsage::Gloss => {}
                    }
                }
                materials.push(new_material);
                material_names.push(source_material.name.clone());
                materials.len() - 1
            }
        } as u32;

        let vertex_weights = decode_vertex_weights(
            anchor,
            submesh.vert_list_count,
            submesh.rigid_weights_ptr,
            submesh.weight_counts,
            submesh.weights_ptr,
            submesh.vertex_count,
        );

        let mut vertex_cursor = anchor.spawn(submesh.vertex_ptr);
        let mut vertices = Vec::with_capacity(submesh.vertex_count as usize);
        for i in 0..submesh.vertex_count as usize {
            let position = read_vec3(&mut vertex_cursor);
            vertex_cursor.read_value::<u32>(); // binormal, unused
            vertex_cursor.read_value::<u32>(); // color, unused
            let uv_u = vertex_cursor.read_value::<u16>();
            let uv_v = vertex_cursor.read_value::<u16>();
            let normal_raw = vertex_cursor.read_value::<u32>();
            vertex_cursor.read_value::<u32>(); // tangent, unused

            let weight = vertex_weights.get(i).copied().unwrap_or_default();
            let weights = weight.weights[..weight.count as usize]
                .iter()
                .zip(&weight.bones[..weight.count as usize])
                .map(|(w, b)| (*b, *w))
                .collect();

            vertices.push(Vertex {
                position,
                // These games store UVV before UVU; the layer is built in
                // that (V, U) order.
                uv: (half_to_f32(uv_v), half_to_f32(uv_u)),
                normal: unpack_normal(normal_raw),
                weights,
            });
        }

        let mut face_cursor = anchor.spawn(submesh.faces_ptr);
        let mut faces: Vec<Face> = Vec::with_capacity(submesh.face_count as usize);
        for _ in 0..submesh.face_count {
            let a = face_cursor.read_value::<u16>();
            let b = face_cursor.read_value::<u16>();
            let c = face_cursor.read_value::<u16>();
            faces.push((a, b, c));
        }

        submeshes.push(Submesh {
            material_index,
            vertices,
            faces,
        });
    }

    Ok(Model {
        name: desc.name.clone(),
        lod_distance: lod.distance,
        lod_max_distance: lod.max_distance,
        bones,
        materials,
        submeshes,
    })
}

/// Derives local bone transforms from global transforms when the stream
/// read all zeros for every non-root bone (seen on viewmodel-only
/// skeletons that never populate local data).
fn regenerate_local_positions(bones: &mut [Bone]) {
    for i in 0..bones.len() {
        let parent_index = bones[i].parent_index;
        if parent_index < 0 {
            continue;
        }
        let parent_rotation = bones[parent_index as usize].global_rotation;
        let parent_position = bones[parent_index as usize].global_position;
        let inverse_parent_rotation = parent_rotation.inverse();
        let bone = &mut bones[i];
        bone.local_rotation = inverse_parent_rotation * bone.global_rotation;
        bone.local_position = inverse_parent_rotation * (bone.global_position - parent_position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_normal_matches_known_sample() {
        // b0=127 (0 after offset), b1=127, b2=127, b3 chosen for scale 1.0
        // scale = (b3 + 192) / 32385; solve b3 so scale ~ 1/32385*... use b3=223 -> scale = 415/32385
        let packed = u32::from_le_bytes([127, 127, 127, 223]);
        let n = unpack_normal(packed);
        assert!(n.x.abs() < 1e-6);
        assert!(n.y.abs() < 1e-6);
        assert!(n.z.abs() < 1e-6);
    }

    #[test]
    fn biggest_lod_index_picks_closest_with_equal_or_more_submeshes() {
        let lods = vec![(50.0, 2usize), (10.0, 2usize), (5.0, 1usize)];
        // lod 1 (dist 10, 2 submeshes) beats lod 0; lod 2 has fewer submeshes so loses.
        assert_eq!(biggest_lod_index(&lods), Some(1));
    }

    #[test]
    fn biggest_lod_index_empty_is_none() {
        assert_eq!(biggest_lod_index(&[]), None);
    }

    #[test]
    fn biggest_lod_index_single_is_zero() {
        assert_eq!(biggest_lod_index(&[(10.0, 4)]), Some(0));
    }
}
