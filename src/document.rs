use serde::Serialize;

/// Raw RGBA pixel buffer with its dimensions
///
/// Deliberately does not implement `Serialize`: pixel data can never leak
/// into the JSON sidecar, only the file-path fields that replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Byte length the RGBA buffer must have for the declared dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Decoded PSD document graph
///
/// Field names mirror the document schema the external decoder exposes, so
/// the sidecar JSON reads like the decoded tree with blobs swapped for paths.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PsdDocument {
    pub width: u32,
    pub height: u32,

    /// Flattened composite pixel buffer, externalized to `canvas.png`
    #[serde(skip)]
    pub canvas: Option<ImageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_resources: Option<ImageResources>,

    /// Base64-encoded text engine payload, externalized to `engineData`
    #[serde(skip)]
    pub engine_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_data_url: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linked_files: Vec<LinkedFile>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayerNode>,
}

/// Image resource section of a PSD document
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageResources {
    #[serde(skip)]
    pub thumbnail: Option<ImageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(skip)]
    pub xmp_metadata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xmp_metadata_url: Option<String>,
}

/// External file embedded in the PSD (smart object payload)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedFile {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// File extension used when externalizing, e.g. "png" or "psb"
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(skip)]
    pub data: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
}

/// One node of the layer tree: either a pixel layer or a group
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerNode {
    /// Unique id, assigned in pre-order; names this node's output files
    pub id: u32,
    pub name: String,
    pub visible: bool,
    pub opacity: u8,
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,

    #[serde(skip)]
    pub canvas: Option<ImageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<LayerMask>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayerNode>,
}

impl LayerNode {
    /// Create an empty group or layer shell with default properties
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            opacity: 255,
            top: 0,
            left: 0,
            bottom: 0,
            right: 0,
            canvas: None,
            canvas_url: None,
            mask: None,
            children: Vec::new(),
        }
    }
}

/// Raster mask attached to a layer
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LayerMask {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,

    #[serde(skip)]
    pub canvas: Option<ImageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_fields_never_serialize() {
        let mut doc = PsdDocument {
            width: 2,
            height: 2,
            ..Default::default()
        };
        doc.canvas = Some(ImageData::new(2, 2, vec![0; 16]));
        doc.engine_data = Some("AAAA".to_string());

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("canvas").is_none());
        assert!(json.get("engineData").is_none());
        assert_eq!(json.get("width").unwrap(), 2);
    }

    #[test]
    fn test_camel_case_url_fields() {
        let mut doc = PsdDocument {
            width: 1,
            height: 1,
            ..Default::default()
        };
        doc.canvas_url = Some("out/canvas.png".to_string());
        doc.engine_data_url = Some("out/engineData".to_string());

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json.get("canvasUrl").unwrap(), "out/canvas.png");
        assert_eq!(json.get("engineDataUrl").unwrap(), "out/engineData");
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let doc = PsdDocument {
            width: 1,
            height: 1,
            ..Default::default()
        };

        let json = serde_json::to_value(&doc).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("canvasUrl"));
        assert!(!obj.contains_key("imageResources"));
        assert!(!obj.contains_key("linkedFiles"));
        assert!(!obj.contains_key("children"));
    }

    #[test]
    fn test_linked_file_type_key() {
        let file = LinkedFile {
            id: "abc123".to_string(),
            name: Some("photo".to_string()),
            file_type: "png".to_string(),
            data: Some(vec![1, 2, 3]),
            data_url: None,
        };

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json.get("type").unwrap(), "png");
        assert!(json.get("data").is_none());
        assert!(json.get("fileType").is_none());
    }

    #[test]
    fn test_layer_node_serialization_shape() {
        let mut node = LayerNode::new(3, "background");
        node.canvas_url = Some("out/layer/3.png".to_string());
        node.mask = Some(LayerMask {
            canvas_url: Some("out/layer/3-mask.png".to_string()),
            ..Default::default()
        });

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json.get("id").unwrap(), 3);
        assert_eq!(json.get("canvasUrl").unwrap(), "out/layer/3.png");
        assert_eq!(
            json.get("mask").unwrap().get("canvasUrl").unwrap(),
            "out/layer/3-mask.png"
        );
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_image_data_expected_len() {
        let image = ImageData::new(4, 3, vec![0; 48]);
        assert_eq!(image.expected_len(), 48);
        assert_eq!(image.rgba.len(), image.expected_len());
    }
}
