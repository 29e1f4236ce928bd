pub mod image;
pub mod layers;

// Re-export commonly used items
pub use image::write_png;
pub use layers::extract_layer_tree;

use crate::document::PsdDocument;
use crate::error::Result;
use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::path::Path;

/// Externalize every binary blob of a decoded document to `target_dir`
///
/// Runs the blob-to-file substitution over the five top-level blob fields
/// and then the depth-first layer walk:
/// - composite canvas → `canvas.png`
/// - thumbnail → `thumbnail.png`
/// - XMP metadata → `xmpMetadata.xml`
/// - engine data (base64) → decoded bytes at `engineData`
/// - linked file payloads → `linkedFiles/<id>.<type>`
/// - layer and mask canvases → under `layer/`
///
/// Each written blob's in-memory field is cleared and the file path recorded
/// in the matching `*_url` field, so serializing the document afterwards
/// yields a sidecar of path references only.
pub fn extract_document(doc: &mut PsdDocument, target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    if let Some(canvas) = doc.canvas.take() {
        let path = target_dir.join("canvas.png");
        write_png(&canvas, &path)?;
        doc.canvas_url = Some(path_url(&path));
    }

    if let Some(resources) = doc.image_resources.as_mut() {
        if let Some(thumbnail) = resources.thumbnail.take() {
            let path = target_dir.join("thumbnail.png");
            write_png(&thumbnail, &path)?;
            resources.thumbnail_url = Some(path_url(&path));
        }

        if let Some(xmp) = resources.xmp_metadata.take() {
            let path = target_dir.join("xmpMetadata.xml");
            fs::write(&path, xmp)?;
            resources.xmp_metadata_url = Some(path_url(&path));
        }
    }

    if let Some(engine_data) = doc.engine_data.take() {
        let path = target_dir.join("engineData");
        let bytes = general_purpose::STANDARD.decode(engine_data.as_bytes())?;
        fs::write(&path, bytes)?;
        doc.engine_data_url = Some(path_url(&path));
    }

    if !doc.linked_files.is_empty() {
        let linked_dir = target_dir.join("linkedFiles");
        fs::create_dir_all(&linked_dir)?;

        for file in doc.linked_files.iter_mut() {
            if let Some(data) = file.data.take() {
                let path = linked_dir.join(format!("{}.{}", file.id, file.file_type));
                fs::write(&path, data)?;
                file.data_url = Some(path_url(&path));
            }
        }
    }

    extract_layer_tree(&mut doc.children, target_dir)?;

    Ok(())
}

/// Render a written file's path for the JSON sidecar
pub fn path_url(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
