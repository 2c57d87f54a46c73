//! Path utilities for IFS archives
//!
//! IFS listfile entries use forward slashes (`hires/weapon_ak47.iwi`), but the
//! keyed hash and Jenkins lookup functions normalize either separator before
//! hashing, so archive lookups accept both.

/// Normalize a path for storage/lookup in an IFS archive.
///
/// Converts backslashes to forward slashes to match the convention used by
/// IFS listfiles.
///
/// ```
/// use codol_ifs::path::normalize_ifs_path;
///
/// assert_eq!(normalize_ifs_path("dir\\file.iwi"), "dir/file.iwi");
/// assert_eq!(normalize_ifs_path("dir/file.iwi"), "dir/file.iwi");
/// ```
pub fn normalize_ifs_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert an IFS path to a system path (no-op on Unix, since IFS already uses `/`).
pub fn ifs_path_to_system(path: &str) -> String {
    #[cfg(unix)]
    {
        path.to_string()
    }

    #[cfg(windows)]
    {
        path.replace('/', "\\")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes() {
        assert_eq!(normalize_ifs_path("hires\\weapon.iwi"), "hires/weapon.iwi");
        assert_eq!(normalize_ifs_path("hires/weapon.iwi"), "hires/weapon.iwi");
        assert_eq!(normalize_ifs_path(""), "");
    }
}
