use crate::error::Result;
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

/// ZIP magic signature (first two bytes)
const ZIP_MAGIC: &[u8; 2] = b"PK";

/// PSD/PSB magic signature
const PSD_MAGIC: &[u8; 4] = b"8BPS";

/// Check if the input is a ZIP container
///
/// Batch inputs arrive as ZIP archives holding one or more `.psd` files.
/// This checks for the ZIP magic signature "PK" (0x50 0x4B).
pub fn is_zip_container(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && &bytes[0..2] == ZIP_MAGIC
}

/// Check if the input starts with the PSD file signature "8BPS"
pub fn is_psd_file(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && &bytes[0..4] == PSD_MAGIC
}

/// Extract an entire ZIP archive to a directory
///
/// Used by the batch mode: the archive is unpacked as-is and every `.psd`
/// file found inside is then extracted individually.
pub fn extract_zip_to_directory(bytes: &[u8], directory: &Path) -> Result<()> {
    let cursor = Cursor::new(bytes);
    let mut archive = ZipArchive::new(cursor)?;
    archive.extract(directory)?;
    Ok(())
}
