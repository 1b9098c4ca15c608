//! Normalized polygon labels and class-name tables
//!
//! One object per line: `class_id x1 y1 x2 y2 ... xn yn`, coordinates
//! normalized to [0, 1]. Lines are parsed individually; a bad line is
//! skipped with a warning instead of failing the file.

use log::warn;
use std::collections::HashMap;
use std::path::Path;

/// COCO class names, indexed by class id
pub const COCO_CLASSES: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

/// Class-id to name table, passed into the rendering routines so the
/// mapping is swappable per dataset.
pub type ClassNames = HashMap<i64, String>;

/// Table built from the COCO class list
pub fn default_class_names() -> ClassNames {
    COCO_CLASSES
        .iter()
        .enumerate()
        .map(|(id, name)| (id as i64, name.to_string()))
        .collect()
}

/// Load a class-name file, one name per line; the line index is the id.
/// Blank lines keep their index but produce no entry.
pub fn load_class_names(path: &Path) -> std::io::Result<ClassNames> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(id, line)| (id as i64, line.trim().to_string()))
        .collect())
}

/// Resolve a class id, falling back to a synthetic name for unmapped ids
pub fn class_label(names: &ClassNames, class_id: i64) -> String {
    names
        .get(&class_id)
        .cloned()
        .unwrap_or_else(|| format!("Class {}", class_id))
}

/// One parsed polygon annotation with normalized vertices
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonLabel {
    pub class_id: i64,
    pub points: Vec<(f64, f64)>,
}

/// Strip escape artifacts and control characters that upstream export
/// tools leave in label files: backslashes plus all ASCII control
/// characters except line breaks and tabs. Anything removed points at an
/// upstream data-quality problem, so the cleanup is logged.
pub fn sanitize_label_text(content: &str) -> String {
    let cleaned: String = content
        .chars()
        .filter(|c| *c != '\\' && (!c.is_control() || matches!(c, '\n' | '\r' | '\t')))
        .collect();
    if cleaned.len() != content.len() {
        warn!(
            "stripped {} stray escape/control characters from label data; \
             the upstream exporter likely produced noisy output",
            content.len() - cleaned.len()
        );
    }
    cleaned
}

/// Parse label content into polygon records. Blank lines are skipped
/// silently; lines with non-numeric tokens, an odd coordinate count, or
/// fewer than one coordinate pair are skipped with a warning.
pub fn parse_polygon_labels(content: &str) -> Vec<PolygonLabel> {
    let cleaned = sanitize_label_text(content);
    let mut labels = Vec::new();

    for line in cleaned.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Result<Vec<f64>, _> = line.split_whitespace().map(str::parse::<f64>).collect();
        let parts = match parts {
            Ok(parts) if !parts.is_empty() => parts,
            _ => {
                warn!("skipping malformed label line: {}", line);
                continue;
            }
        };

        let class_id = parts[0] as i64;
        let coords = &parts[1..];
        if coords.len() % 2 != 0 || coords.len() < 2 {
            warn!("skipping label line with unpaired coordinates: {}", line);
            continue;
        }

        let points = coords.chunks_exact(2).map(|xy| (xy[0], xy[1])).collect();
        labels.push(PolygonLabel { class_id, points });
    }

    labels
}

/// Normalized vertices to integer pixel coordinates. Values are floored,
/// matching the converter's truncation policy.
pub fn denormalize(points: &[(f64, f64)], width: u32, height: u32) -> Vec<(i64, i64)> {
    points
        .iter()
        .map(|&(x, y)| {
            (
                (x * width as f64).floor() as i64,
                (y * height as f64).floor() as i64,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square_polygon() {
        let labels = parse_polygon_labels("0 0.1 0.1 0.9 0.1 0.9 0.9 0.1 0.9");
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].class_id, 0);
        assert_eq!(labels[0].points.len(), 4);
    }

    #[test]
    fn test_denormalize_square_on_100x100() {
        let labels = parse_polygon_labels("0 0.1 0.1 0.9 0.1 0.9 0.9 0.1 0.9");
        let pixels = denormalize(&labels[0].points, 100, 100);
        assert_eq!(pixels, vec![(10, 10), (90, 10), (90, 90), (10, 90)]);
    }

    #[test]
    fn test_odd_coordinate_count_skips_line_only() {
        let content = "0 0.1 0.1 0.9\n1 0.2 0.2 0.4 0.2 0.3 0.4";
        let labels = parse_polygon_labels(content);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].class_id, 1);
    }

    #[test]
    fn test_non_numeric_line_is_skipped() {
        let content = "garbage here\n2 0.5 0.5 0.6 0.6";
        let labels = parse_polygon_labels(content);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].class_id, 2);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let labels = parse_polygon_labels("\n\n0 0.1 0.1 0.2 0.2\n\n");
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn test_sanitize_strips_escape_artifacts() {
        let noisy = "0 0.1 0.1 0.2 0.2\\\u{7}\n";
        let labels = parse_polygon_labels(noisy);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].points, vec![(0.1, 0.1), (0.2, 0.2)]);
    }

    #[test]
    fn test_sanitize_keeps_line_structure() {
        let cleaned = sanitize_label_text("a\\b\nc\td");
        assert_eq!(cleaned, "ab\nc\td");
    }

    #[test]
    fn test_class_label_fallback() {
        let names = default_class_names();
        assert_eq!(class_label(&names, 16), "dog");
        assert_eq!(class_label(&names, 500), "Class 500");
    }
}
