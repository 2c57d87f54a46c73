//! Animation and model decoders for Call of Duty: Online asset pools.
//!
//! Consumes descriptors already resolved against a process-memory or
//! on-disk asset pool ([`descriptor::AnimDescriptor`],
//! [`descriptor::ModelDescriptor`]) and produces normalised, engine-neutral
//! output ([`animation::Animation`], [`model::Model`]) independent of the
//! stream backend the descriptor's field data came from.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod animation;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod pool;
pub mod strings;

pub use animation::{Animation, decode_animation};
pub use descriptor::{AnimDescriptor, ModelDescriptor};
pub use error::{Error, Result};
pub use model::{Model, decode_model};
pub use pool::{is_placeholder_animation, is_placeholder_model, is_pool_internal_pointer};
pub use strings::{StringResolver, StringTable};
