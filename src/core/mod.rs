// Core modules implementing the record model, naming rules, decoding, and error modeling.
pub mod decode;
pub mod error;
pub mod extension;
pub mod output_path;
pub mod record;
