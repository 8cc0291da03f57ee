//! Purpose: Library crate behind the `b64img` CLI and its tests.
//! Exports: `core` (record model, extension and path rules, decoding, errors), `convert`, `notice`, `json`.
//! Role: Holds every conversion rule; the binary only parses arguments and wires reporters.
//! Invariants: Directories are passed explicitly through every call; there is no global state.
pub mod convert;
pub mod core;
pub mod json;
pub mod notice;
