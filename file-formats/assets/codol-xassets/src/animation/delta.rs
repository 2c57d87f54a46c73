//! Stages 8-10: delta translation/rotation streams, all keyed to
//! `"tag_origin"`. These dispatch on a per-title subformat in the
//! original; only the 32-bit pointer variant this decoder targets is
//! implemented (§ supplemented features).

use codol_mem::{Spawn, StreamReader, widen_pointer};

use super::output::Animation;

fn read_delta_frame_index<R: StreamReader>(frame_size: u32, cursor: &mut R) -> u32 {
    if frame_size == 1 {
        u32::from(cursor.read_value::<u8>())
    } else {
        u32::from(cursor.read_value::<u16>())
    }
}

pub(super) fn delta_translations<R: StreamReader + Spawn>(anim: &mut Animation, frame_size: u32, stream: &mut R) {
    let frame_count = u32::from(stream.read_value::<u16>());
    // One byte of data-element size, one byte of padding; read as a u16
    // and keep only the low byte to advance by the same two bytes.
    let data_size = (stream.read_value::<u16>() & 0xFF) as u8;

    let min = (
        stream.read_value::<f32>(),
        stream.read_value::<f32>(),
        stream.read_value::<f32>(),
    );
    let size = (
        stream.read_value::<f32>(),
        stream.read_value::<f32>(),
        stream.read_value::<f32>(),
    );

    if frame_count == 0 {
        anim.add_translation_key("tag_origin", 0, min.0, min.1, min.2);
        return;
    }

    let delta_data_ptr = widen_pointer(stream.read_value::<u32>());
    let mut data = stream.spawn(delta_data_ptr);

    for _ in 0..=frame_count {
        let frame_index = read_delta_frame_index(frame_size, stream);
        let (x, y, z) = if data_size == 1 {
            (
                f32::from(data.read_value::<u8>()),
                f32::from(data.read_value::<u8>()),
                f32::from(data.read_value::<u8>()),
            )
        } else {
            (
                f32::from(data.read_value::<u16>()),
                f32::from(data.read_value::<u16>()),
                f32::from(data.read_value::<u16>()),
            )
        };
        let tx = size.0 * x + min.0;
        let ty = size.1 * y + min.1;
        let tz = size.2 * z + min.2;
        anim.add_translation_key("tag_origin", frame_index, tx, ty, tz);
    }
}

pub(super) fn delta_2d_rotations<R: StreamReader + Spawn>(anim: &mut Animation, frame_size: u32, stream: &mut R) {
    let frame_count = u32::from(stream.read_value::<u16>());
    stream.read_bytes(2); // padding

    if frame_count == 0 {
        let z = stream.read_value::<u16>();
        let w = stream.read_value::<u16>();
        anim.add_rotation_key("tag_origin", 0, 0.0, 0.0, f32::from(z as i16) / 32768.0, f32::from(w as i16) / 32768.0);
        return;
    }

    let delta_data_ptr = widen_pointer(stream.read_value::<u32>());
    let mut data = stream.spawn(delta_data_ptr);

    for _ in 0..=frame_count {
        let frame_index = read_delta_frame_index(frame_size, stream);
        let z = data.read_value::<u16>();
        let w = data.read_value::<u16>();
        anim.add_rotation_key(
            "tag_origin",
            frame_index,
            0.0,
            0.0,
            f32::from(z as i16) / 32768.0,
            f32::from(w as i16) / 32768.0,
        );
    }
}

pub(super) fn delta_3d_rotations<R: StreamReader + Spawn>(anim: &mut Animation, frame_size: u32, stream: &mut R) {
    let frame_count = u32::from(stream.read_value::<u16>());
    stream.read_bytes(2); // padding

    if frame_count == 0 {
        let x = stream.read_value::<u16>();
        let y = stream.read_value::<u16>();
        let z = stream.read_value::<u16>();
        let w = stream.read_value::<u16>();
        anim.add_rotation_key(
            "tag_origin",
            0,
            f32::from(x as i16) / 32768.0,
            f32::from(y as i16) / 32768.0,
            f32::from(z as i16) / 32768.0,
            f32::from(w as i16) / 32768.0,
        );
        return;
    }

    let delta_data_ptr = widen_pointer(stream.read_value::<u32>());
    let mut data = stream.spawn(delta_data_ptr);

    for _ in 0..=frame_count {
        let frame_index = read_delta_frame_index(frame_size, stream);
        let x = data.read_value::<u16>();
        let y = data.read_value::<u16>();
        let z = data.read_value::<u16>();
        let w = data.read_value::<u16>();
        anim.add_rotation_key(
            "tag_origin",
            frame_index,
            f32::from(x as i16) / 32768.0,
            f32::from(y as i16) / 32768.0,
            f32::from(z as i16) / 32768.0,
            f32::from(w as i16) / 32768.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codol_mem::BufferReader;

    #[test]
    fn zero_frame_count_emits_a_single_key_from_min_vec() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes()); // size + padding
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&2.0f32.to_le_bytes());
        bytes.extend_from_slice(&3.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        let mut stream = BufferReader::new(bytes);
        let mut anim = Animation {
            name: "t".into(),
            frame_rate: 30.0,
            looping: false,
            anim_type: crate::animation::output::AnimationType::Delta,
            delta_tag_name: Some("tag_origin".into()),
            bone_type_overrides: Default::default(),
            tracks: Default::default(),
            notetracks: Vec::new(),
        };
        delta_translations(&mut anim, 1, &mut stream);
        let track = &anim.tracks["tag_origin"];
        assert_eq!(track.translations.len(), 1);
        assert_eq!(track.translations[0].x, 1.0);
        assert_eq!(track.translations[0].z, 3.0);
    }
}
