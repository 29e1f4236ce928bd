//! # psd2json
//!
//! A library for extracting parsed PSD documents into a directory tree of
//! image files plus a JSON sidecar describing the structure.
//!
//! PSD binary decoding is delegated to the `psd` crate. This crate walks the
//! decoded tree, writes every binary blob (canvases, masks, thumbnail, XMP
//! metadata, engine data, linked files) to disk, swaps each in-memory blob
//! for the path of the file that replaced it, and serializes what remains.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let bytes = std::fs::read("example.psd").unwrap();
//! let json = psd2json::extract(&bytes, Path::new("out")).unwrap();
//!
//! // "out/" now holds canvas.png, layer/... and so on;
//! // `json` holds the structure with file paths where the blobs were.
//! println!("{}", serde_json::to_string_pretty(&json).unwrap());
//! ```

pub mod decoder;
pub mod document;
pub mod error;
pub mod extract;

// Re-export commonly used items
pub use document::{ImageData, ImageResources, LayerMask, LayerNode, LinkedFile, PsdDocument};
pub use error::{PsdJsonError, Result};

use serde_json::Value as JsonValue;
use std::path::Path;

/// Decode a PSD and externalize all of its blobs under `target_dir`
///
/// Returns the extracted document as a JSON value; callers typically write
/// it to `target_dir/data.json` as the sidecar.
pub fn extract(bytes: &[u8], target_dir: &Path) -> Result<JsonValue> {
    let mut doc = decoder::decode_psd(bytes)?;
    extract::extract_document(&mut doc, target_dir)?;
    Ok(serde_json::to_value(&doc)?)
}
