//! Object-detection dataset wrangling utilities
//!
//! This library backs four standalone command-line tools: converting COCO
//! JSON annotations to PASCAL-VOC XML, splitting an image corpus into
//! train/val/test lists, and overlaying polygon or bounding-box ground
//! truth on images for visual inspection.

pub mod coco;
pub mod config;
pub mod conversion;
pub mod dataset;
pub mod labels;
pub mod overlay;
pub mod types;
pub mod utils;
pub mod voc;

// Re-export commonly used types and functions
pub use coco::{coco_to_voc_bbox, CocoFile};
pub use config::{ConvertArgs, PolygonArgs, RectangleArgs, SplitArgs};
pub use conversion::convert_coco_to_voc;
pub use dataset::{partition_ids, split_dataset, SplitRatios};
pub use labels::{default_class_names, load_class_names, parse_polygon_labels};
pub use overlay::{overlay_polygons, overlay_voc_boxes};
pub use types::SplitLists;
pub use voc::{read_voc_xml, VocAnnotation};
