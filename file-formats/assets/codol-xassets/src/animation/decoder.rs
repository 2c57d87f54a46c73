//! The 11-stage animation decode pipeline.

use codol_mem::{Spawn, StreamReader, half_to_f32};

use crate::descriptor::{AnimDescriptor, AnimFlags, RotationCoding, TranslationCoding};
use crate::strings::StringResolver;

use super::delta;
use super::output::{Animation, AnimationType};

/// Per-field stream cursors an [`AnimDescriptor`]'s pointers have already
/// been turned into, one per pointer field the decoder advances
/// independently. `random_data_ints` has no cursor here: the field only
/// ever participates in placeholder-asset fingerprinting ([`crate::pool`]),
/// never in decoding.
#[derive(Debug)]
pub struct AnimStreams<R> {
    /// Bone name string-table index stream.
    pub bone_ids: R,
    /// Byte-keyed frame-index stream.
    pub data_bytes: R,
    /// Short-keyed frame-index stream.
    pub data_shorts: R,
    /// Int-keyed min/size table stream.
    pub data_ints: R,
    /// Byte-keyed random-data stream.
    pub random_data_bytes: R,
    /// Short-keyed random-data stream.
    pub random_data_shorts: R,
    /// Long bone-index stream.
    pub long_indices: R,
    /// Notetrack stream.
    pub notifications: R,
    /// Delta translation stream.
    pub delta_translation: R,
    /// Delta 2D rotation stream.
    pub delta_2d_rotations: R,
    /// Delta 3D rotation stream.
    pub delta_3d_rotations: R,
}

fn decode_rotation_component(raw: u16, coding: RotationCoding) -> f32 {
    match coding {
        RotationCoding::DivideBySize => f32::from(raw as i16) / 32768.0,
        RotationCoding::HalfFloat => half_to_f32(raw),
    }
}

fn read_u16_le(buf: &[u8], index: usize) -> u16 {
    let offset = index * 2;
    buf.get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .unwrap_or(0)
}

fn read_bone_id<R: StreamReader>(cursor: &mut R, size: u8) -> u64 {
    match size {
        2 => u64::from(cursor.read_value::<u16>()),
        4 => u64::from(cursor.read_value::<u32>()),
        _ => 0,
    }
}

/// Skips a run of inline bone indices embedded in the short-keyed data
/// stream, terminated by a sentinel equal to the animation's total frame
/// count.
fn skip_inline_animation_indices<R: StreamReader>(data_shorts: &mut R, total_frame_count: u32) {
    loop {
        let index = u32::from(data_shorts.read_value::<u16>());
        if index == total_frame_count {
            break;
        }
    }
}

fn read_frame_index<R: StreamReader>(
    frame_size: u32,
    frame_count: u32,
    has_long_indices: bool,
    data_bytes: &mut R,
    data_shorts: &mut R,
    long_indices: &mut R,
) -> u32 {
    if frame_size == 1 {
        u32::from(data_bytes.read_value::<u8>())
    } else if frame_count < 0x40 || !has_long_indices {
        u32::from(data_shorts.read_value::<u16>())
    } else {
        u32::from(long_indices.read_value::<u16>())
    }
}

fn read_vec3<R: StreamReader>(cursor: &mut R) -> (f32, f32, f32) {
    (
        cursor.read_value::<f32>(),
        cursor.read_value::<f32>(),
        cursor.read_value::<f32>(),
    )
}

/// Runs the full pipeline over `desc`/`streams`, resolving bone names
/// through `resolver`.
pub fn decode_animation<R: StreamReader + Spawn>(
    desc: &AnimDescriptor,
    streams: &mut AnimStreams<R>,
    resolver: &impl StringResolver,
) -> Animation {
    let mut anim = Animation {
        name: desc.name.clone(),
        frame_rate: desc.frame_rate,
        looping: desc.flags.contains(AnimFlags::LOOPING),
        anim_type: AnimationType::Relative,
        delta_tag_name: None,
        bone_type_overrides: std::collections::HashMap::new(),
        tracks: std::collections::HashMap::new(),
        notetracks: Vec::new(),
    };

    if desc.flags.contains(AnimFlags::VIEWMODEL) {
        anim.bone_type_overrides.insert("j_gun".to_string(), AnimationType::Relative);
        anim.bone_type_overrides
            .insert("j_gun1".to_string(), AnimationType::Relative);
        anim.anim_type = AnimationType::Absolute;
    }
    if desc.delta_translation_ptr != 0 || desc.delta_2d_rotations_ptr != 0 || desc.delta_3d_rotations_ptr != 0 {
        anim.anim_type = AnimationType::Delta;
        anim.delta_tag_name = Some("tag_origin".to_string());
    }
    if desc.flags.contains(AnimFlags::ADDITIVE) {
        anim.anim_type = AnimationType::Additive;
    }

    let frame_size: u32 = if desc.frame_count > 255 { 2 } else { 1 };
    let has_long_indices = desc.long_indices_ptr != 0;
    let mut bone_type_size = if desc.total_bone_count > 255 { 2 } else { 1 };
    if desc.bone_type_size > 0 {
        bone_type_size = desc.bone_type_size;
    }

    let mut tag_names = Vec::with_capacity(desc.total_bone_count as usize);
    for _ in 0..desc.total_bone_count {
        let bone_id = read_bone_id(&mut streams.bone_ids, desc.bone_index_size);
        tag_names.push(resolver.resolve(bone_id));
    }

    // Stage 0: none-rotated bones reset to identity.
    for name in &tag_names[..desc.none_rotated_bone_count as usize] {
        anim.add_rotation_key(name.clone(), 0, 0.0, 0.0, 0.0, 1.0);
    }

    // Stage 1: 2D rotations.
    let stage1_start = desc.none_rotated_bone_count as usize;
    let stage1_end = stage1_start + desc.two_d_rotated_bone_count as usize;
    for name in &tag_names[stage1_start..stage1_end] {
        let frame_count = u32::from(streams.data_shorts.read_value::<u16>());
        if frame_size == 2 && desc.flags.contains(AnimFlags::SUPPORTS_INLINE_INDICES) && frame_count >= 0x40 {
            skip_inline_animation_indices(&mut streams.data_shorts, desc.frame_count);
        }
        let data_size = ((frame_count + 1) * 4) as usize;
        let key_data = streams.random_data_shorts.read_bytes(data_size);
        if key_data.len() != data_size {
            continue;
        }
        for f in 0..=frame_count {
            let frame_index = read_frame_index(
                frame_size,
                frame_count,
                has_long_indices,
                &mut streams.data_bytes,
                &mut streams.data_shorts,
                &mut streams.long_indices,
            );
            let z = decode_rotation_component(read_u16_le(&key_data, (f * 2) as usize), desc.rotation_coding);
            let w = decode_rotation_component(read_u16_le(&key_data, (f * 2 + 1) as usize), desc.rotation_coding);
            anim.add_rotation_key(name.clone(), frame_index, 0.0, 0.0, z, w);
        }
    }

    // Stage 2: 3D rotations.
    let stage2_start = stage1_end;
    let stage2_end = stage2_start + desc.normal_rotated_bone_count as usize;
    for name in &tag_names[stage2_start..stage2_end] {
        let frame_count = u32::from(streams.data_shorts.read_value::<u16>());
        if frame_size == 2 && desc.flags.contains(AnimFlags::SUPPORTS_INLINE_INDICES) && frame_count >= 0x40 {
            skip_inline_animation_indices(&mut streams.data_shorts, desc.frame_count);
        }
        let data_size = ((frame_count + 1) * 8) as usize;
        let key_data = streams.random_data_shorts.read_bytes(data_size);
        if key_data.len() != data_size {
            continue;
        }
        for f in 0..=frame_count {
            let frame_index = read_frame_index(
                frame_size,
                frame_count,
                has_long_indices,
                &mut streams.data_bytes,
                &mut streams.data_shorts,
                &mut streams.long_indices,
            );
            let x = decode_rotation_component(read_u16_le(&key_data, (f * 4) as usize), desc.rotation_coding);
            let y = decode_rotation_component(read_u16_le(&key_data, (f * 4 + 1) as usize), desc.rotation_coding);
            let z = decode_rotation_component(read_u16_le(&key_data, (f * 4 + 2) as usize), desc.rotation_coding);
            let w = decode_rotation_component(read_u16_le(&key_data, (f * 4 + 3) as usize), desc.rotation_coding);
            anim.add_rotation_key(name.clone(), frame_index, x, y, z, w);
        }
    }

    // Stage 3: 2D static rotations.
    let stage3_start = stage2_end;
    let stage3_end = stage3_start + desc.two_d_static_rotated_bone_count as usize;
    for name in &tag_names[stage3_start..stage3_end] {
        let z = streams.data_shorts.read_value::<u16>();
        let w = streams.data_shorts.read_value::<u16>();
        let z = decode_rotation_component(z, desc.rotation_coding);
        let w = decode_rotation_component(w, desc.rotation_coding);
        anim.add_rotation_key(name.clone(), 0, 0.0, 0.0, z, w);
    }

    // Stage 4: 3D static rotations.
    let stage4_start = stage3_end;
    let stage4_end = stage4_start + desc.normal_static_rotated_bone_count as usize;
    for name in &tag_names[stage4_start..stage4_end] {
        let x = streams.data_shorts.read_value::<u16>();
        let y = streams.data_shorts.read_value::<u16>();
        let z = streams.data_shorts.read_value::<u16>();
        let w = streams.data_shorts.read_value::<u16>();
        let x = decode_rotation_component(x, desc.rotation_coding);
        let y = decode_rotation_component(y, desc.rotation_coding);
        let z = decode_rotation_component(z, desc.rotation_coding);
        let w = decode_rotation_component(w, desc.rotation_coding);
        anim.add_rotation_key(name.clone(), 0, x, y, z, w);
    }

    // Stage 5: normal (byte-precision) translations.
    for _ in 0..desc.normal_translated_bone_count {
        let bone_id = match bone_type_size {
            1 => u64::from(streams.data_bytes.read_value::<u8>()),
            _ => u64::from(streams.data_shorts.read_value::<u16>()),
        };
        let frame_count = u32::from(streams.data_shorts.read_value::<u16>());
        if frame_size == 2 && desc.flags.contains(AnimFlags::SUPPORTS_INLINE_INDICES) && frame_count >= 0x40 {
            skip_inline_animation_indices(&mut streams.data_shorts, desc.frame_count);
        }
        let min = read_vec3(&mut streams.data_ints);
        let size = read_vec3(&mut streams.data_ints);
        let data_size = ((frame_count + 1) * 3) as usize;
        let key_data = streams.random_data_bytes.read_bytes(data_size);
        if key_data.len() != data_size {
            continue;
        }
        let Some(name) = tag_names.get(bone_id as usize) else {
            continue;
        };
        let name = name.clone();
        for f in 0..=frame_count {
            let frame_index = read_frame_index(
                frame_size,
                frame_count,
                has_long_indices,
                &mut streams.data_bytes,
                &mut streams.data_shorts,
                &mut streams.long_indices,
            );
            if desc.translation_coding == TranslationCoding::MinSizeTable {
                let base = (f * 3) as usize;
                let tx = size.0 * f32::from(key_data[base]) + min.0;
                let ty = size.1 * f32::from(key_data[base + 1]) + min.1;
                let tz = size.2 * f32::from(key_data[base + 2]) + min.2;
                anim.add_translation_key(name.clone(), frame_index, tx, ty, tz);
            }
        }
    }

    // Stage 6: precise (short-precision) translations.
    for _ in 0..desc.precise_translated_bone_count {
        let bone_id = match bone_type_size {
            1 => u64::from(streams.data_bytes.read_value::<u8>()),
            _ => u64::from(streams.data_shorts.read_value::<u16>()),
        };
        let frame_count = u32::from(streams.data_shorts.read_value::<u16>());
        if frame_size == 2 && desc.flags.contains(AnimFlags::SUPPORTS_INLINE_INDICES) && frame_count >= 0x40 {
            skip_inline_animation_indices(&mut streams.data_shorts, desc.frame_count);
        }
        let min = read_vec3(&mut streams.data_ints);
        let size = read_vec3(&mut streams.data_ints);
        let data_size = ((frame_count + 1) * 6) as usize;
        let key_data = streams.random_data_shorts.read_bytes(data_size);
        if key_data.len() != data_size {
            continue;
        }
        let Some(name) = tag_names.get(bone_id as usize) else {
            continue;
        };
        let name = name.clone();
        for f in 0..=frame_count {
            let frame_index = read_frame_index(
                frame_size,
                frame_count,
                has_long_indices,
                &mut streams.data_bytes,
                &mut streams.data_shorts,
                &mut streams.long_indices,
            );
            if desc.translation_coding == TranslationCoding::MinSizeTable {
                let base = f as usize * 3;
                let tx = size.0 * f32::from(read_u16_le(&key_data, base)) + min.0;
                let ty = size.1 * f32::from(read_u16_le(&key_data, base + 1)) + min.1;
                let tz = size.2 * f32::from(read_u16_le(&key_data, base + 2)) + min.2;
                anim.add_translation_key(name.clone(), frame_index, tx, ty, tz);
            }
        }
    }

    // Stage 7: static translations.
    for _ in 0..desc.static_translated_bone_count {
        let coords = read_vec3(&mut streams.data_ints);
        let bone_id = match bone_type_size {
            1 => u64::from(streams.data_bytes.read_value::<u8>()),
            _ => u64::from(streams.data_shorts.read_value::<u16>()),
        };
        if let Some(name) = tag_names.get(bone_id as usize) {
            anim.add_translation_key(name.clone(), 0, coords.0, coords.1, coords.2);
        }
    }

    // Stages 8-10: delta data, keyed to "tag_origin".
    if desc.delta_translation_ptr != 0 {
        delta::delta_translations(&mut anim, frame_size, &mut streams.delta_translation);
    }
    if desc.delta_2d_rotations_ptr != 0 {
        delta::delta_2d_rotations(&mut anim, frame_size, &mut streams.delta_2d_rotations);
    }
    if desc.delta_3d_rotations_ptr != 0 {
        delta::delta_3d_rotations(&mut anim, frame_size, &mut streams.delta_3d_rotations);
    }

    // Stage 11: notetracks.
    for _ in 0..desc.notification_count {
        let tag_index = u64::from(streams.notifications.read_value::<u32>());
        let progress = streams.notifications.read_value::<f32>();
        let tag = resolver.resolve(tag_index);
        let frame = (desc.frame_count as f32 * progress) as u32;
        anim.add_notetrack(tag, frame);
    }

    anim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::StringResolver;
    use codol_mem::BufferReader;

    struct NamedResolver(Vec<String>);

    impl StringResolver for NamedResolver {
        fn resolve(&self, index: u64) -> String {
            self.0.get(index as usize).cloned().unwrap_or_default()
        }
    }

    fn empty_streams() -> AnimStreams<BufferReader> {
        AnimStreams {
            bone_ids: BufferReader::new(vec![]),
            data_bytes: BufferReader::new(vec![]),
            data_shorts: BufferReader::new(vec![]),
            data_ints: BufferReader::new(vec![]),
            random_data_bytes: BufferReader::new(vec![]),
            random_data_shorts: BufferReader::new(vec![]),
            long_indices: BufferReader::new(vec![]),
            notifications: BufferReader::new(vec![]),
            delta_translation: BufferReader::new(vec![]),
            delta_2d_rotations: BufferReader::new(vec![]),
            delta_3d_rotations: BufferReader::new(vec![]),
        }
    }

    fn base_descriptor() -> AnimDescriptor {
        AnimDescriptor {
            name: "test_anim".into(),
            frame_rate: 30.0,
            frame_count: 10,
            flags: AnimFlags::empty(),
            bone_ids_ptr: 0,
            bone_index_size: 2,
            bone_type_size: 0,
            rotation_coding: RotationCoding::DivideBySize,
            translation_coding: TranslationCoding::MinSizeTable,
            data_bytes_ptr: 0,
            data_shorts_ptr: 0,
            data_ints_ptr: 0,
            random_data_bytes_ptr: 0,
            random_data_shorts_ptr: 0,
            random_data_ints_ptr: 0,
            long_indices_ptr: 0,
            notifications_ptr: 0,
            delta_translation_ptr: 0,
            delta_2d_rotations_ptr: 0,
            delta_3d_rotations_ptr: 0,
            none_rotated_bone_count: 1,
            two_d_rotated_bone_count: 0,
            normal_rotated_bone_count: 0,
            two_d_static_rotated_bone_count: 0,
            normal_static_rotated_bone_count: 0,
            normal_translated_bone_count: 0,
            precise_translated_bone_count: 0,
            static_translated_bone_count: 0,
            none_translated_bone_count: 0,
            total_bone_count: 1,
            notification_count: 0,
        }
    }

    #[test]
    fn none_rotated_bone_gets_identity_key() {
        let desc = base_descriptor();
        let mut streams = empty_streams();
        streams.bone_ids = BufferReader::new(0u16.to_le_bytes().to_vec());
        let resolver = NamedResolver(vec!["tag_origin".into()]);
        let anim = decode_animation(&desc, &mut streams, &resolver);
        let track = &anim.tracks["tag_origin"];
        assert_eq!(track.rotations.len(), 1);
        assert_eq!(
            track.rotations[0],
            super::output::RotationKey {
                frame: 0,
                x: 0.0,
                y: 0.0,
                z: 0.0,
                w: 1.0,
            }
        );
    }

    #[test]
    fn viewmodel_flag_sets_absolute_type_and_bone_overrides() {
        let mut desc = base_descriptor();
        desc.flags = AnimFlags::VIEWMODEL;
        let mut streams = empty_streams();
        streams.bone_ids = BufferReader::new(0u16.to_le_bytes().to_vec());
        let resolver = NamedResolver(vec!["tag_origin".into()]);
        let anim = decode_animation(&desc, &mut streams, &resolver);
        assert_eq!(anim.anim_type, AnimationType::Absolute);
        assert_eq!(anim.bone_type_overrides["j_gun"], AnimationType::Relative);
        assert_eq!(anim.bone_type_overrides["j_gun1"], AnimationType::Relative);
    }

    #[test]
    fn delta_pointers_set_delta_type_with_tag_origin() {
        let mut desc = base_descriptor();
        desc.delta_translation_ptr = 0x1000;
        // Frame count 0: just reads MinVec as the single key.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u16.to_le_bytes()); // frame count
        bytes.extend_from_slice(&0u8.to_le_bytes()); // data size
        bytes.extend_from_slice(&0u8.to_le_bytes()); // padding
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&2.0f32.to_le_bytes());
        bytes.extend_from_slice(&3.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.0f32.to_le_bytes());

        let mut streams = empty_streams();
        streams.bone_ids = BufferReader::new(0u16.to_le_bytes().to_vec());
        streams.delta_translation = BufferReader::new(bytes);
        let resolver = NamedResolver(vec!["tag_origin".into()]);
        let anim = decode_animation(&desc, &mut streams, &resolver);

        assert_eq!(anim.anim_type, AnimationType::Delta);
        assert_eq!(anim.delta_tag_name.as_deref(), Some("tag_origin"));
        let track = &anim.tracks["tag_origin"];
        assert_eq!(track.translations[0].x, 1.0);
        assert_eq!(track.translations[0].y, 2.0);
        assert_eq!(track.translations[0].z, 3.0);
    }
}
