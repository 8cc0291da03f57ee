//! Purpose: Resolve directories and compute where a decoded record lands on disk.
//! Exports: `resolve_dir`, `output_stem`, `build_output_path`.
//! Role: Pure path arithmetic shared by decoding and the batch driver.
//! Invariants: No filesystem access; results depend only on inputs, `HOME` and the cwd.
//! Invariants: Output names are `<stem><ext>`; the stem falls back to the job id when empty.
//! Notes: Two records that resolve to the same path overwrite each other; this is not guarded.

use std::path::{Component, Path, PathBuf};

use crate::core::extension::guess_extension;
use crate::core::record::ImageRecord;

/// Expand a leading `~`, anchor relative paths at the cwd and fold `.`/`..` lexically.
pub fn resolve_dir(dir: &Path) -> PathBuf {
    let expanded = expand_home(dir);
    let absolute = std::path::absolute(&expanded).unwrap_or(expanded);
    normalize(&absolute)
}

pub fn output_stem(record: &ImageRecord) -> String {
    Path::new(&record.filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| record.job_id.clone())
}

pub fn build_output_path(record: &ImageRecord, output_dir: &Path) -> PathBuf {
    let ext = guess_extension(&record.mime, &record.filename);
    resolve_dir(output_dir).join(format!("{}{ext}", output_stem(record)))
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(out.components().next_back(), Some(Component::RootDir) | None) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
