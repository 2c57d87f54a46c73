//! C4: the model decoder.

mod decoder;
mod output;

pub use decoder::{biggest_lod_index, decode_model, unpack_normal};
pub use output::{Bone, Face, Material, Model, Submesh, Vertex};
