//! Purpose: Drive JSON-to-image conversion for single files and whole directories.
//! Exports: `Conversion`, `convert_single_json`, `collect_json_files`, `convert_folder`.
//! Role: Orchestration layer between the CLI and the pure `core` pipeline.
//! Invariants: Per-file failures never escape `convert_single_json`; they become `Conversion::Skipped`.
//! Invariants: Files are processed sequentially in lexicographic file-name order.
//! Invariants: An empty batch creates no output directory.
//! Notes: Records resolving to the same output path overwrite each other, last write wins.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{Error, ErrorKind};
use crate::core::output_path::resolve_dir;
use crate::core::record::ImageRecord;
use crate::json::parse::read_document;
use crate::notice::{Notice, NoticeLevel, Reporter};

pub const JSON_SUFFIX: &str = ".json";

/// Result of converting one JSON file.
#[derive(Debug)]
pub enum Conversion {
    Written(PathBuf),
    Skipped(Error),
}

impl Conversion {
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            Conversion::Written(path) => Some(path),
            Conversion::Skipped(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Conversion::Written(_) => None,
            Conversion::Skipped(err) => Some(err),
        }
    }
}

/// Convert one JSON document into an image file and report the outcome.
pub fn convert_single_json(
    json_path: &Path,
    output_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Conversion {
    let name = display_name(json_path);
    let conversion = match run_pipeline(json_path, output_dir) {
        Ok(out_path) => {
            let out_name = display_name(&out_path);
            reporter.notice(
                Notice::new(NoticeLevel::Ok, format!("{name}  ->  {out_name}"))
                    .with_file(name.as_str())
                    .with_detail("output", out_path.display().to_string()),
            );
            Conversion::Written(out_path)
        }
        Err(err) => {
            reporter.notice(failure_notice(&name, &err));
            Conversion::Skipped(err)
        }
    };
    tracing::debug!(file = %json_path.display(), ?conversion, "converted");
    conversion
}

fn run_pipeline(json_path: &Path, output_dir: &Path) -> Result<PathBuf, Error> {
    let payload = read_document(json_path)?;
    let record = ImageRecord::from_json(&payload)?;
    record.decode_to_file(output_dir)
}

fn failure_notice(name: &str, err: &Error) -> Notice {
    let notice = match (err.kind(), err.field()) {
        (ErrorKind::MissingField, Some(field)) => Notice::new(
            NoticeLevel::Warn,
            format!("{name}: missing key '{field}', skipping."),
        )
        .with_detail("field", field),
        (ErrorKind::Parse, _) => Notice::new(
            NoticeLevel::Error,
            format!("Failed to read/parse {name}: {}", err.cause_text()),
        ),
        _ => Notice::new(
            NoticeLevel::Error,
            format!("Failed to decode image from {name}: {}", err.cause_text()),
        ),
    };
    let notice = notice
        .with_file(name)
        .with_detail("kind", format!("{:?}", err.kind()));
    match err.hint() {
        Some(hint) => notice.with_detail("hint", hint),
        None => notice,
    }
}

/// Regular files directly inside `input_dir` whose names end in `.json`, sorted by name.
pub fn collect_json_files(input_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let entries = fs::read_dir(input_dir).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read input directory")
            .with_path(input_dir)
            .with_source(err)
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read input directory entry")
                .with_path(input_dir)
                .with_source(err)
        })?;
        let path = entry.path();
        let is_json = entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(JSON_SUFFIX.as_bytes());
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Convert every `*.json` file in `input_dir`, writing images into `output_dir`.
pub fn convert_folder(input_dir: &Path, output_dir: &Path, reporter: &mut dyn Reporter) {
    let input_dir = resolve_dir(input_dir);
    let output_dir = resolve_dir(output_dir);

    let json_files = collect_json_files(&input_dir).unwrap_or_else(|err| {
        tracing::warn!(error = %err, cause = %err.cause_text(), "input directory unreadable");
        Vec::new()
    });

    if json_files.is_empty() {
        reporter.notice(Notice::new(
            NoticeLevel::Info,
            format!("No .json files found in {}", input_dir.display()),
        ));
        return;
    }

    reporter.notice(
        Notice::new(
            NoticeLevel::Info,
            format!(
                "Found {} JSON file(s) in {}",
                json_files.len(),
                input_dir.display()
            ),
        )
        .with_detail("count", json_files.len()),
    );
    reporter.notice(Notice::new(
        NoticeLevel::Info,
        format!("Output images will be written to {}", output_dir.display()),
    ));
    reporter.divider();

    for json_path in &json_files {
        convert_single_json(json_path, &output_dir, reporter);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::{Conversion, collect_json_files, convert_single_json};
    use crate::core::error::ErrorKind;
    use crate::notice::{Notice, NoticeLevel};
    use std::fs;

    #[test]
    fn collect_filters_and_sorts() {
        let temp = tempfile::tempdir().expect("tempdir");
        for name in ["b.json", "a.json", "c.txt", "d.JSON"] {
            fs::write(temp.path().join(name), b"{}").expect("seed");
        }
        fs::create_dir(temp.path().join("dir.json")).expect("dir");

        let files = collect_json_files(temp.path()).expect("collect");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn collect_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let name = OsStr::from_bytes(b"scan-\xff.json");
        fs::write(temp.path().join(name), b"{}").expect("seed");

        let files = collect_json_files(temp.path()).expect("collect");
        assert_eq!(files, [temp.path().join(name)]);
    }

    #[test]
    fn missing_input_dir_is_io_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = collect_json_files(&temp.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn success_reports_ok_line() {
        let temp = tempfile::tempdir().expect("tempdir");
        let json_path = temp.path().join("a.json");
        fs::write(
            &json_path,
            br#"{"job_id":"j1","annotated_image":{"filename":"pic.png","mime":"image/png","base64":"aGVsbG8="}}"#,
        )
        .expect("seed");
        let out_dir = temp.path().join("out");

        let mut notices: Vec<Notice> = Vec::new();
        let conversion = convert_single_json(&json_path, &out_dir, &mut notices);

        assert_eq!(conversion.output_path(), Some(out_dir.join("pic.png").as_path()));
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].line(), "[OK] a.json  ->  pic.png");
    }

    #[test]
    fn missing_field_reports_warning_and_skips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let json_path = temp.path().join("nobase.json");
        fs::write(&json_path, br#"{"annotated_image":{"filename":"x.png"}}"#).expect("seed");
        let out_dir = temp.path().join("out");

        let mut notices: Vec<Notice> = Vec::new();
        let conversion = convert_single_json(&json_path, &out_dir, &mut notices);

        let err = conversion.error().expect("skipped");
        assert_eq!(err.field(), Some("base64"));
        assert_eq!(notices[0].level, NoticeLevel::Warn);
        assert_eq!(
            notices[0].line(),
            "[WARN] nobase.json: missing key 'base64', skipping."
        );
        assert!(!out_dir.exists());
    }

    #[test]
    fn parse_and_decode_failures_report_errors() {
        let temp = tempfile::tempdir().expect("tempdir");
        let broken = temp.path().join("broken.json");
        fs::write(&broken, b"{").expect("seed");
        let bad_payload = temp.path().join("bad.json");
        fs::write(
            &bad_payload,
            br#"{"annotated_image":{"base64":"not-valid-base64!!"}}"#,
        )
        .expect("seed");
        let out_dir = temp.path().join("out");

        let mut notices: Vec<Notice> = Vec::new();
        let parse = convert_single_json(&broken, &out_dir, &mut notices);
        let decode = convert_single_json(&bad_payload, &out_dir, &mut notices);

        assert!(matches!(parse, Conversion::Skipped(ref e) if e.kind() == ErrorKind::Parse));
        assert!(matches!(decode, Conversion::Skipped(ref e) if e.kind() == ErrorKind::Decode));
        assert!(notices[0].line().starts_with("[ERROR] Failed to read/parse broken.json: "));
        let hint = notices[0].details["hint"].as_str().expect("hint detail");
        assert!(hint.contains("parse category: eof"), "{hint}");
        assert!(notices[1].line().starts_with("[ERROR] Failed to decode image from bad.json: "));
    }
}
