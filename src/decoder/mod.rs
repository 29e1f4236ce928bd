pub mod container;
pub mod tree;

// Re-export commonly used items
pub use container::{extract_zip_to_directory, is_psd_file, is_zip_container};
pub use tree::{build_layer_tree, GroupRecord, LayerRecord};

use crate::document::{ImageData, LayerNode, PsdDocument};
use crate::error::{PsdJsonError, Result};
use psd::Psd;

/// Decode PSD bytes into a [`PsdDocument`] graph
///
/// All byte-level decoding is delegated to the `psd` crate; this only maps
/// its flat layer/group view into the nested document model. The decoder
/// hands every layer back as a document-sized RGBA buffer with the layer
/// composited at its bounds, so each layer canvas carries the document
/// dimensions.
pub fn decode_psd(bytes: &[u8]) -> Result<PsdDocument> {
    let psd = Psd::from_bytes(bytes).map_err(|e| PsdJsonError::Decode(e.to_string()))?;

    let width = psd.width();
    let height = psd.height();

    // Flattened composite becomes the document canvas
    let canvas = ImageData::new(width, height, psd.rgba());

    let mut groups: Vec<GroupRecord> = psd
        .groups()
        .iter()
        .map(|(&id, group)| GroupRecord {
            id,
            name: group.name().to_string(),
            parent_id: group.parent_id(),
        })
        .collect();
    groups.sort_by_key(|g| g.id);

    let layers: Vec<LayerRecord> = psd
        .layers()
        .iter()
        .map(|layer| {
            // Ids are placeholders here, the tree builder renumbers in pre-order
            let mut node = LayerNode::new(0, layer.name());
            node.visible = layer.visible();
            node.opacity = layer.opacity();
            node.top = layer.layer_top();
            node.left = layer.layer_left();
            node.bottom = layer.layer_bottom();
            node.right = layer.layer_right();
            node.canvas = Some(ImageData::new(width, height, layer.rgba()));
            LayerRecord {
                node,
                parent_id: layer.parent_id(),
            }
        })
        .collect();

    let children = build_layer_tree(groups, layers);

    Ok(PsdDocument {
        width,
        height,
        canvas: Some(canvas),
        children,
        ..Default::default()
    })
}
