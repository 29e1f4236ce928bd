use crate::document::LayerNode;
use std::collections::HashMap;

/// Flat group record as reported by the decoder
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: u32,
    pub name: String,
    /// Enclosing group id, `None` for top-level groups
    pub parent_id: Option<u32>,
}

/// Flat pixel-layer record as reported by the decoder
#[derive(Debug, Clone)]
pub struct LayerRecord {
    pub node: LayerNode,
    /// Enclosing group id, `None` for top-level layers
    pub parent_id: Option<u32>,
}

/// Build a nested layer tree from flat group and layer records
///
/// The decoder exposes layers as a flat list where each layer and each group
/// points at its enclosing group by id. This rebuilds the hierarchy: groups
/// become `LayerNode`s holding their child groups (ascending id, the order
/// the decoder discovered them) followed by their child layers (decoder
/// order). Finally every node gets a fresh pre-order id starting at 1, which
/// names its output files and directories.
pub fn build_layer_tree(groups: Vec<GroupRecord>, layers: Vec<LayerRecord>) -> Vec<LayerNode> {
    // 1. Index child groups and child layers by their parent group id
    let mut groups_by_parent: HashMap<Option<u32>, Vec<GroupRecord>> = HashMap::new();
    for group in groups {
        groups_by_parent.entry(group.parent_id).or_default().push(group);
    }
    for children in groups_by_parent.values_mut() {
        children.sort_by_key(|g| g.id);
    }

    let mut layers_by_parent: HashMap<Option<u32>, Vec<LayerNode>> = HashMap::new();
    for layer in layers {
        layers_by_parent
            .entry(layer.parent_id)
            .or_default()
            .push(layer.node);
    }

    // 2. Assemble recursively from the root level
    let mut roots = build_children(None, &mut groups_by_parent, &mut layers_by_parent);

    // 3. Renumber in pre-order so ids are unique and deterministic
    let mut next_id = 1;
    for root in roots.iter_mut() {
        assign_ids(root, &mut next_id);
    }

    roots
}

fn build_children(
    parent: Option<u32>,
    groups_by_parent: &mut HashMap<Option<u32>, Vec<GroupRecord>>,
    layers_by_parent: &mut HashMap<Option<u32>, Vec<LayerNode>>,
) -> Vec<LayerNode> {
    let mut children = Vec::new();

    for group in groups_by_parent.remove(&parent).unwrap_or_default() {
        let mut node = LayerNode::new(group.id, group.name);
        node.children = build_children(Some(group.id), groups_by_parent, layers_by_parent);
        children.push(node);
    }

    children.extend(layers_by_parent.remove(&parent).unwrap_or_default());

    children
}

fn assign_ids(node: &mut LayerNode, next_id: &mut u32) {
    node.id = *next_id;
    *next_id += 1;
    for child in node.children.iter_mut() {
        assign_ids(child, next_id);
    }
}
