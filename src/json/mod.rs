//! Purpose: JSON read boundary for input documents.
//! Exports: `parse` module with file decode helpers and failure categories.
//! Role: Single seam so conversion code never calls serde_json ad hoc.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub mod parse;
