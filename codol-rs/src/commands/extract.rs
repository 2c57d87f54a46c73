//! Bulk archive extraction
//!
//! Mounts one `.ifs` file (or every `.ifs` file directly inside a
//! directory) and writes every resolved entry's decrypted, decompressed
//! payload to disk. This is the only rip path that needs no live game
//! process: the archive's own listfile names every entry it holds.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codol_ifs::IfsArchive;

use crate::cli::ImageFormat;
use crate::utils::{add_table_row, create_progress_bar, create_table, format_bytes};

/// Root persisted output directory. Category subdirectories (e.g.
/// `textures`, `sound`) are taken from each entry's own leading path
/// component.
const OUTPUT_ROOT: &str = "exported_files/codol";

/// Run the bulk extraction command against `path`.
///
/// `format` names the container the caller would like images written as; it
/// is accepted for command-line parity only. No pixel transcoding is
/// implemented here, payloads are written exactly as the archive decodes
/// them (translating to `format` is an output-format concern out of scope
/// for this decoder).
pub fn run(path: &Path, format: ImageFormat) -> Result<()> {
    let mut archive = IfsArchive::new(true);

    let listing = if path.is_dir() {
        mount_directory_listing(&mut archive, path)?
    } else {
        archive
            .mount_package_listing(path)
            .with_context(|| format!("failed to mount {}", path.display()))?
    };

    log::info!("resolved {} entries ({:?} requested)", listing.len(), format);

    let output_root = PathBuf::from(OUTPUT_ROOT);
    let progress = create_progress_bar(listing.len() as u64, "extracting");

    let mut per_category: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    for entry_path in &listing {
        progress.inc(1);

        let data = match archive.read_file(entry_path) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("skipping {entry_path}: {err}");
                continue;
            }
        };

        let category = entry_path
            .split(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("misc");
        let file_name = entry_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(entry_path.as_str());

        let out_dir = output_root.join(category);
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;

        let out_path = out_dir.join(file_name);
        fs::write(&out_path, &data)
            .with_context(|| format!("failed to write {}", out_path.display()))?;

        let entry = per_category.entry(category.to_string()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += data.len() as u64;
    }

    progress.finish_with_message("done");

    let mut table = create_table(vec!["Category", "Files", "Bytes"]);
    for (category, (count, bytes)) in &per_category {
        add_table_row(
            &mut table,
            vec![category.clone(), count.to_string(), format_bytes(*bytes)],
        );
    }
    table.printstd();

    Ok(())
}

fn mount_directory_listing(archive: &mut IfsArchive, dir: &Path) -> Result<Vec<String>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("ifs"))
        .collect();
    paths.sort();

    let mut listing = Vec::new();
    for path in &paths {
        listing.extend(
            archive
                .mount_package_listing(path)
                .with_context(|| format!("failed to mount {}", path.display()))?,
        );
    }
    Ok(listing)
}
