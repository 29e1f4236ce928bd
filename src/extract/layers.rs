use super::image::write_png;
use super::path_url;
use crate::document::LayerNode;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Externalize every pixel buffer in a layer tree
///
/// Walks the tree depth-first under `target_dir/layer`. For each node the
/// canvas goes to `<parent_dir>/<id>.png` and the mask canvas to
/// `<parent_dir>/<id>-mask.png`; children are placed under
/// `<parent_dir>/<id>/`. Directories are only created once a node actually
/// writes a file, so a subtree without pixel data leaves no trace on disk.
pub fn extract_layer_tree(roots: &mut [LayerNode], target_dir: &Path) -> Result<()> {
    let layer_dir = target_dir.join("layer");

    for root in roots.iter_mut() {
        extract_layer(root, &layer_dir)?;
    }

    Ok(())
}

fn extract_layer(node: &mut LayerNode, parent_dir: &Path) -> Result<()> {
    extract_node_blobs(node, parent_dir)?;

    if !node.children.is_empty() {
        let current_dir = parent_dir.join(node.id.to_string());

        for child in node.children.iter_mut() {
            extract_layer(child, &current_dir)?;
        }
    }

    Ok(())
}

/// Write the canvas and mask canvas of a single node, if present
fn extract_node_blobs(node: &mut LayerNode, parent_dir: &Path) -> Result<()> {
    let has_mask_canvas = node.mask.as_ref().is_some_and(|m| m.canvas.is_some());
    if node.canvas.is_none() && !has_mask_canvas {
        return Ok(());
    }

    // Lazy directory creation: only nodes with pixel data touch the disk
    fs::create_dir_all(parent_dir)?;

    if let Some(canvas) = node.canvas.take() {
        let path = parent_dir.join(format!("{}.png", node.id));
        write_png(&canvas, &path)?;
        node.canvas_url = Some(path_url(&path));
    }

    if let Some(mask) = node.mask.as_mut() {
        if let Some(canvas) = mask.canvas.take() {
            let path = parent_dir.join(format!("{}-mask.png", node.id));
            write_png(&canvas, &path)?;
            mask.canvas_url = Some(path_url(&path));
        }
    }

    Ok(())
}
