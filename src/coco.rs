//! COCO format data structures
//!
//! This module models the parts of a COCO object-detection document the
//! converter consumes: `images`, `annotations`, and `categories`.

use serde::Deserialize;
use std::collections::HashMap;

/// COCO category information
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// COCO image information
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub id: u64,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// COCO annotation information
#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    pub image_id: u64,
    pub category_id: u32,
    pub bbox: [f64; 4], // [x, y, width, height]
}

/// The COCO document structure. The three keys are required; a document
/// missing any of them fails parsing outright.
#[derive(Debug, Clone, Deserialize)]
pub struct CocoFile {
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
    pub categories: Vec<Category>,
}

impl CocoFile {
    /// Build the category id to name lookup
    pub fn category_names(&self) -> HashMap<u32, &str> {
        self.categories
            .iter()
            .map(|cat| (cat.id, cat.name.as_str()))
            .collect()
    }
}

/// COCO bbox `[x, y, w, h]` to VOC corner pair `(xmin, ymin, xmax, ymax)`.
///
/// Coordinates are floored, not rounded. The truncation is lossy but
/// deterministic and must stay that way for reproducible output.
pub fn coco_to_voc_bbox(bbox: [f64; 4]) -> (i64, i64, i64, i64) {
    let [x, y, w, h] = bbox;
    (
        x.floor() as i64,
        y.floor() as i64,
        (x + w).floor() as i64,
        (y + h).floor() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coco_to_voc_bbox_integer_input() {
        assert_eq!(coco_to_voc_bbox([5.0, 5.0, 10.0, 10.0]), (5, 5, 15, 15));
        assert_eq!(coco_to_voc_bbox([0.0, 0.0, 1.0, 1.0]), (0, 0, 1, 1));
    }

    #[test]
    fn test_coco_to_voc_bbox_floors_fractional_input() {
        // 5.7 + 10.1 = 15.8 floors to 15, 5.2 + 10.9 = 16.1 floors to 16
        assert_eq!(coco_to_voc_bbox([5.7, 5.2, 10.1, 10.9]), (5, 5, 15, 16));
    }

    #[test]
    fn test_coco_to_voc_bbox_recovers_width_and_height() {
        for (w, h) in [(3u32, 4u32), (17, 1), (640, 480)] {
            let (xmin, ymin, xmax, ymax) = coco_to_voc_bbox([12.0, 8.0, w as f64, h as f64]);
            assert_eq!((xmax - xmin) as u32, w);
            assert_eq!((ymax - ymin) as u32, h);
        }
    }
}
