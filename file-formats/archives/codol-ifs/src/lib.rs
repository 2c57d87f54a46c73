//! Reader for Call of Duty: Online's `.ifs` asset archives.
//!
//! An IFS package is a hashed, HET/BET-indexed, AES-192-CTR-encrypted,
//! zlib-compressed container holding the textures and audio referenced by
//! in-memory asset pools. This crate opens a package (or a directory of
//! them), resolves names through the package's own embedded listfile, and
//! decrypts/decompresses payloads on demand.
//!
//! ## Example
//!
//! ```no_run
//! use codol_ifs::IfsArchive;
//!
//! # fn main() -> Result<(), codol_ifs::Error> {
//! let mut archive = IfsArchive::new(false);
//! archive.mount_directory("images")?;
//!
//! let data = archive.read_file("textures/a.iwi")?;
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod archive;
pub mod compression;
pub mod crypto;
pub mod error;
pub mod header;
pub mod io;
pub mod path;
pub mod special_files;
pub mod tables;

pub use archive::IfsArchive;
pub use error::{Error, Result};
pub use header::{IFS_HEADER_SIGNATURE, IfsHeader};

pub use crypto::{decrypt_block, hash_type, keyed_hash, lookup_hash, mask_hash};
pub use compression::decompress;
pub use tables::{BetFileInfo, BetHeader, BetTable, HetHeader, HetTable};
