//! Parsing of the package's embedded listfile: the plaintext, newline
//! delimited catalog of every asset path the BET table actually indexes.

/// Marker the source checks for before trusting a listfile payload.
const LISTFILE_SENTINEL: &str = ".lst\r\n";

/// Whether `data` looks like a genuine listfile payload rather than garbage
/// at the expected position.
pub fn is_valid_listfile(data: &[u8]) -> bool {
    let text = String::from_utf8_lossy(data);
    text.contains(LISTFILE_SENTINEL)
}

/// Split a listfile payload into trimmed, non-empty path entries, keeping
/// only `.iwi` (and, when `include_audio`, `.mp3`) lines.
pub fn parse_listfile(data: &[u8], include_audio: bool) -> Vec<String> {
    let text = String::from_utf8_lossy(data);

    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| line.ends_with(".iwi") || (include_audio && line.ends_with(".mp3")))
        .map(str::to_string)
        .collect()
}

/// The filename component of a `/`- or `\`-separated listfile path.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_sentinel() {
        let data = b"package.lst\r\ntextures/a.iwi\n";
        assert!(is_valid_listfile(data));
    }

    #[test]
    fn rejects_missing_sentinel() {
        let data = b"textures/a.iwi\n";
        assert!(!is_valid_listfile(data));
    }

    #[test]
    fn filters_by_extension() {
        let data = b"textures/a.iwi\r\nsounds/b.mp3\r\nreadme.txt\r\n";
        let iwi_only = parse_listfile(data, false);
        assert_eq!(iwi_only, vec!["textures/a.iwi"]);

        let with_audio = parse_listfile(data, true);
        assert_eq!(with_audio, vec!["textures/a.iwi", "sounds/b.mp3"]);
    }

    #[test]
    fn extracts_basename() {
        assert_eq!(basename("hires/textures/a.iwi"), "a.iwi");
        assert_eq!(basename("a.iwi"), "a.iwi");
        assert_eq!(basename("dir\\sub\\b.mp3"), "b.mp3");
    }
}
