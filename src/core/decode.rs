//! Purpose: Decode base64 payloads and write them as image files.
//! Exports: `decode_payload`, `ImageRecord::decode_to_file`.
//! Role: Only module with filesystem side effects on the output side.
//! Invariants: Padding must be canonical; non-zero trailing bits in the last symbol are accepted.
//! Invariants: The output directory exists before decoding; one file is created or replaced on success.
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};

use crate::core::error::{Error, ErrorKind};
use crate::core::output_path::{build_output_path, resolve_dir};
use crate::core::record::ImageRecord;

const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode a payload, tolerating ASCII whitespace from line-wrapped encoders.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, Error> {
    let compact: Vec<u8> = payload
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    PAYLOAD_ENGINE.decode(&compact).map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message("invalid base64 payload")
            .with_source(err)
    })
}

impl ImageRecord {
    /// Write the decoded payload under `output_dir`, creating the directory first.
    ///
    /// Any existing file at the target path is truncated and replaced.
    pub fn decode_to_file(&self, output_dir: &Path) -> Result<PathBuf, Error> {
        let dir = resolve_dir(output_dir);
        fs::create_dir_all(&dir).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to create output directory")
                .with_path(&dir)
                .with_source(err)
        })?;

        let out_path = build_output_path(self, &dir);
        let bytes = decode_payload(&self.base64_data)?;
        fs::write(&out_path, &bytes).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write image")
                .with_path(&out_path)
                .with_source(err)
        })?;

        tracing::debug!(path = %out_path.display(), bytes = bytes.len(), "wrote decoded image");
        Ok(out_path)
    }
}
