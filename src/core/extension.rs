//! Purpose: Choose the file extension for a decoded payload.
//! Exports: `guess_extension`, `FALLBACK_EXTENSION`.
//! Role: Naming rule used by output path construction.
//! Invariants: Total function; the result always starts with `.` and is never just `.`.
use std::path::Path;

pub const FALLBACK_EXTENSION: &str = ".bin";

const MIME_EXTENSIONS: [(&str, &str); 4] = [
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/png", ".png"),
    ("image/webp", ".webp"),
];

/// Pick an output extension (with leading dot) for a payload.
///
/// Known MIME types win (case-insensitive), then the filename's own suffix,
/// then `.bin`. Always returns a non-empty string.
pub fn guess_extension(mime: &str, filename: &str) -> String {
    let mime = mime.to_ascii_lowercase();
    if let Some((_, ext)) = MIME_EXTENSIONS.iter().find(|(known, _)| *known == mime) {
        return (*ext).to_string();
    }

    match filename_suffix(filename) {
        Some(suffix) => format!(".{suffix}"),
        None => FALLBACK_EXTENSION.to_string(),
    }
}

fn filename_suffix(filename: &str) -> Option<&str> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::guess_extension;

    #[test]
    fn known_mime_types_map_to_fixed_extensions() {
        assert_eq!(guess_extension("image/jpeg", "x.tiff"), ".jpg");
        assert_eq!(guess_extension("image/jpg", ""), ".jpg");
        assert_eq!(guess_extension("image/png", "x"), ".png");
        assert_eq!(guess_extension("image/webp", "x.gif"), ".webp");
    }

    #[test]
    fn mime_lookup_ignores_case() {
        assert_eq!(guess_extension("IMAGE/PNG", "x"), ".png");
        assert_eq!(guess_extension("Image/Jpeg", "x"), ".jpg");
    }

    #[test]
    fn unknown_mime_falls_back_to_filename_suffix() {
        assert_eq!(guess_extension("image/gif", "anim.gif"), ".gif");
        assert_eq!(guess_extension("application/octet-stream", "scan.TIFF"), ".TIFF");
        assert_eq!(guess_extension("", "archive.tar.gz"), ".gz");
    }

    #[test]
    fn no_mime_match_and_no_suffix_gives_bin() {
        assert_eq!(guess_extension("application/octet-stream", "image"), ".bin");
        assert_eq!(guess_extension("", ""), ".bin");
        assert_eq!(guess_extension("text/plain", ".hidden"), ".bin");
        assert_eq!(guess_extension("text/plain", "trailing."), ".bin");
    }

    #[test]
    fn result_is_never_empty() {
        let mimes = ["", "IMAGE/WEBP", "weird", "image/png "];
        let names = ["", ".", "..", "a.b", "dir/name", "dir.d/name"];
        for mime in mimes {
            for name in names {
                let ext = guess_extension(mime, name);
                assert!(ext.len() > 1, "{mime:?} {name:?} -> {ext:?}");
                assert!(ext.starts_with('.'));
            }
        }
    }
}
