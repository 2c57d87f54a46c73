//! IFS archive handling: opening a package, resolving entries through its
//! listfile, and decrypting/decompressing payloads on demand.

use crate::compression;
use crate::crypto::{hash_type, keyed_hash, lookup_hash};
use crate::header::IfsHeader;
use crate::special_files::{basename, is_valid_listfile, parse_listfile};
use crate::tables::{BetFileInfo, BetTable, HetTable};
use crate::{Error, Result};

use aes::Aes192;
use cipher::{KeyIvInit, StreamCipher};
use crc32fast::Hasher as Crc32;
use ctr::Ctr128BE;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// AES-192 in CTR mode, with the full 16-byte IV treated as a big-endian
/// counter that increments once per AES block processed - matching the
/// source's `CTR_COUNTER_BIG_ENDIAN` LibTomCrypt mode.
type IfsCtr = Ctr128BE<Aes192>;

/// Fixed 24-byte AES-192 key embedded in the game client.
const AES_KEY: [u8; 24] = [
    0x15, 0x9a, 0x03, 0x25, 0xe0, 0x75, 0x2e, 0x80, 0xc6, 0xc0, 0x94, 0x2a, 0x50, 0x5c, 0x1c, 0x68,
    0x8c, 0x17, 0xef, 0x53, 0x99, 0xf8, 0x68, 0x3c,
];

/// Block size used for the per-entry CTR decryption pass.
const DECRYPT_BLOCK_SIZE: usize = 0x8000;

/// A single resolved archive entry plus the package it lives in.
#[derive(Debug, Clone)]
struct FileLocation {
    package_index: usize,
    entry: BetFileInfo,
}

/// A mounted collection of IFS packages, indexed by basename.
///
/// Mirrors `IFSLib`: each package's listfile is parsed once at load time and
/// merged into a single basename-keyed table, preferring `hires/` entries
/// when both a standard and a hi-res variant resolve to the same name.
#[derive(Debug)]
pub struct IfsArchive {
    packages: Vec<PathBuf>,
    files: HashMap<String, FileLocation>,
    include_audio: bool,
}

impl IfsArchive {
    /// Create an empty archive set. Use [`Self::mount_package`] or
    /// [`Self::mount_directory`] to add packages.
    pub fn new(include_audio: bool) -> Self {
        Self {
            packages: Vec::new(),
            files: HashMap::new(),
            include_audio,
        }
    }

    /// Load every `*.ifs` file directly inside `dir` (non-recursive).
    pub fn mount_directory(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("ifs"))
            .collect();
        paths.sort();

        for path in paths {
            self.mount_package(&path)?;
        }
        Ok(())
    }

    /// Open and index a single package file, discarding the resolved
    /// listfile paths once they've been merged into this archive's table.
    /// Mirrors `IFSLib::AddPackage`.
    pub fn mount_package(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.mount_package_listing(path).map(|_| ())
    }

    /// Open and index a single package file, same as [`Self::mount_package`],
    /// but additionally return every resolved listfile path for bulk
    /// extraction workflows. Mirrors `IFSLib::ParsePackage`.
    pub fn mount_package_listing(&mut self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let path = path.as_ref();
        log::info!("mounting IFS package {}", path.display());

        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let header = IfsHeader::read(&mut reader)?;

        let het_key = keyed_hash("(hash table)", hash_type::FILE_KEY);
        let bet_key = keyed_hash("(block table)", hash_type::FILE_KEY);

        let het = HetTable::read(&mut reader, header.het_table_pos, het_key)?;
        let bet = BetTable::read(&mut reader, header.bet_table_pos, bet_key)?;

        let (and_mask, or_mask) = het.masks();

        let package_index = self.packages.len();
        self.packages.push(path.to_path_buf());

        let listfile_entry = bet
            .entries
            .iter()
            .find(|e| e.file_pos == header.header_size as u64 && e.flags == 0x8000_0000)
            .ok_or_else(|| Error::listfile("package has no listfile entry"))?;

        reader.seek(SeekFrom::Start(listfile_entry.file_pos))?;
        let mut listfile_data = vec![0u8; listfile_entry.file_size as usize];
        reader.read_exact(&mut listfile_data)?;

        if !is_valid_listfile(&listfile_data) {
            return Err(Error::listfile("listfile payload missing .lst sentinel"));
        }

        let mut resolved_paths = Vec::new();

        for entry_path in parse_listfile(&listfile_data, self.include_audio) {
            let full_hash = lookup_hash(&entry_path);
            let bet_hash = (full_hash & and_mask | or_mask) & (and_mask >> 8);

            let Some(entry) = bet.find_by_hash(bet_hash) else {
                continue;
            };

            let name = basename(&entry_path).to_string();
            let is_hires = entry_path.starts_with("hires/");

            match self.files.get(&name) {
                Some(_) if !is_hires => {}
                _ => {
                    self.files.insert(
                        name,
                        FileLocation {
                            package_index,
                            entry: *entry,
                        },
                    );
                }
            }

            resolved_paths.push(entry_path);
        }

        Ok(resolved_paths)
    }

    /// Number of distinct entries resolved across all mounted packages.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no entries have been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether `name` (matched by basename) resolves to a mounted entry.
    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(basename(name))
    }

    /// Read and fully decode the payload for `name`.
    ///
    /// `name` is matched by its basename, same as [`Self::contains`].
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let key = basename(name);
        let location = self
            .files
            .get(key)
            .ok_or_else(|| Error::FileNotFound(name.to_string()))?;

        let package_path = &self.packages[location.package_index];
        let file = File::open(package_path)?;
        let mut reader = BufReader::new(file);

        read_entry(&mut reader, key, &location.entry)
    }
}

/// Decrypt and decompress a single BET-resolved entry.
///
/// The last 4 bytes of the `compressed_size` blob are the little-endian
/// unpacked size; everything before that is AES-192-CTR ciphertext over a
/// single zlib stream, decrypted in `DECRYPT_BLOCK_SIZE` chunks with a
/// per-chunk big-endian counter appended to a name/size-derived IV.
fn read_entry<R: Read + Seek>(reader: &mut R, name: &str, entry: &BetFileInfo) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(entry.file_pos))?;

    let mut blob = vec![0u8; entry.compressed_size as usize];
    reader.read_exact(&mut blob)?;

    if blob.len() < 4 {
        return Err(Error::invalid_format("entry blob too small for trailing size"));
    }

    let (ciphertext, size_bytes) = blob.split_at(blob.len() - 4);
    let unpacked_size = u32::from_le_bytes([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]]);

    let mut nonce_hasher = Crc32::new();
    nonce_hasher.update(name.as_bytes());
    let nonce = nonce_hasher.finalize();

    let mut decrypted = ciphertext.to_vec();
    let mut offset = 0usize;
    while offset < decrypted.len() {
        let block_size = (decrypted.len() - offset).min(DECRYPT_BLOCK_SIZE);

        let mut iv = [0u8; 16];
        iv[0..4].copy_from_slice(&nonce.to_le_bytes());
        iv[4..8].copy_from_slice(&unpacked_size.to_le_bytes());
        iv[8..12].copy_from_slice(&(offset as u32).to_le_bytes());
        iv[12..16].copy_from_slice(&(block_size as u32).to_le_bytes());

        let mut cipher = IfsCtr::new(&AES_KEY.into(), &iv.into());
        cipher.apply_keystream(&mut decrypted[offset..offset + block_size]);

        offset += block_size;
    }

    compression::decompress(&decrypted, unpacked_size as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_archive_resolves_nothing() {
        let archive = IfsArchive::new(false);
        assert!(archive.is_empty());
        assert!(!archive.contains("textures/a.iwi"));
        assert!(matches!(
            archive.read_file("textures/a.iwi"),
            Err(Error::FileNotFound(_))
        ));
    }
}
