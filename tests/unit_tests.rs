use coco2voc::conversion::convert_coco_to_voc;
use coco2voc::dataset::{split_dataset, SplitRatios};
use coco2voc::voc::read_voc_xml;

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let coco_path = temp_dir.path().join("instances.json");
        let output_dir = temp_dir.path().join("Annotations");

        let coco_json = serde_json::json!({
            "images": [
                {"id": 1, "file_name": "a.jpg", "width": 100, "height": 50},
                {"id": 2, "file_name": "b.jpg", "width": 20, "height": 20}
            ],
            "annotations": [
                {"image_id": 1, "category_id": 1, "bbox": [5.0, 5.0, 10.0, 10.0]}
            ],
            "categories": [
                {"id": 1, "name": "dog"}
            ]
        });
        let mut file = File::create(&coco_path).unwrap();
        file.write_all(coco_json.to_string().as_bytes()).unwrap();

        let count = convert_coco_to_voc(&coco_path, &output_dir).unwrap();
        assert_eq!(count, 2);

        // one annotated image
        let xml = fs::read_to_string(output_dir.join("a.xml")).unwrap();
        assert!(!xml.starts_with("<?xml"));
        assert!(xml.contains("<filename>a.jpg</filename>"));
        assert!(xml.contains("<width>100</width>"));
        assert!(xml.contains("<height>50</height>"));
        assert_eq!(xml.matches("<object>").count(), 1);
        assert!(xml.contains("<name>dog</name>"));
        assert!(xml.contains("<xmin>5</xmin>"));
        assert!(xml.contains("<ymin>5</ymin>"));
        assert!(xml.contains("<xmax>15</xmax>"));
        assert!(xml.contains("<ymax>15</ymax>"));

        // the zero-annotation image still produces an XML with no objects
        let empty_xml = fs::read_to_string(output_dir.join("b.xml")).unwrap();
        assert!(!empty_xml.contains("<object>"));

        // the produced file parses back through the VOC reader
        let parsed = read_voc_xml(&output_dir.join("a.xml")).unwrap();
        assert_eq!(parsed.objects.len(), 1);
        assert_eq!(parsed.objects[0].bndbox.xmax, 15);
    }

    #[test]
    fn test_convert_rejects_unknown_category() {
        let temp_dir = tempfile::tempdir().unwrap();
        let coco_path = temp_dir.path().join("bad.json");

        let coco_json = serde_json::json!({
            "images": [{"id": 1, "file_name": "a.jpg", "width": 10, "height": 10}],
            "annotations": [{"image_id": 1, "category_id": 7, "bbox": [0.0, 0.0, 1.0, 1.0]}],
            "categories": [{"id": 1, "name": "dog"}]
        });
        fs::write(&coco_path, coco_json.to_string()).unwrap();

        let err = convert_coco_to_voc(&coco_path, &temp_dir.path().join("out")).unwrap_err();
        assert!(err.to_string().contains("unknown category id 7"));
    }

    #[test]
    fn test_convert_rejects_malformed_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let coco_path = temp_dir.path().join("broken.json");
        fs::write(&coco_path, "{\"images\": [").unwrap();

        assert!(convert_coco_to_voc(&coco_path, &temp_dir.path().join("out")).is_err());
    }

    #[test]
    fn test_split_dataset_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let image_dir = temp_dir.path().join("JPEGImages");
        let save_dir = temp_dir.path().join("ImageSets/Main");
        fs::create_dir_all(&image_dir).unwrap();

        // extension match is case-insensitive; non-image files are ignored
        for name in ["a.jpg", "b.PNG", "c.jpeg", "d.jpg", "e.png", "f.JPG", "g.jpg", "h.png"] {
            fs::write(image_dir.join(name), b"").unwrap();
        }
        fs::write(image_dir.join("notes.txt"), b"").unwrap();

        let ratios = SplitRatios::new(0.5, 0.25, 0.25);
        let lists = split_dataset(&image_dir, &save_dir, &ratios, 0).unwrap();

        assert_eq!(lists.train.len(), 4);
        assert_eq!(lists.val.len(), 2);
        assert_eq!(lists.test.len(), 2);

        let read_list = |name: &str| -> Vec<String> {
            let content = fs::read_to_string(save_dir.join(name)).unwrap();
            content
                .split('\n')
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        };

        let train = read_list("train.txt");
        let val = read_list("val.txt");
        let test = read_list("test.txt");
        let trainval = read_list("trainval.txt");

        assert_eq!(train, lists.train);
        assert_eq!(val, lists.val);
        assert_eq!(test, lists.test);

        // trainval is train followed by val, order preserved
        let mut expected_trainval = train.clone();
        expected_trainval.extend(val.clone());
        assert_eq!(trainval, expected_trainval);

        // the three splits partition the full id set
        let all: HashSet<String> = train
            .iter()
            .chain(val.iter())
            .chain(test.iter())
            .cloned()
            .collect();
        let expected: HashSet<String> = ["a", "b", "c", "d", "e", "f", "g", "h"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_split_dataset_is_deterministic() {
        let temp_dir = tempfile::tempdir().unwrap();
        let image_dir = temp_dir.path().join("images");
        fs::create_dir_all(&image_dir).unwrap();
        for i in 0..13 {
            fs::write(image_dir.join(format!("{:06}.jpg", i)), b"").unwrap();
        }

        let ratios = SplitRatios::new(0.7, 0.2, 0.1);
        let first = split_dataset(&image_dir, &temp_dir.path().join("one"), &ratios, 0).unwrap();
        let second = split_dataset(&image_dir, &temp_dir.path().join("two"), &ratios, 0).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_split_dataset_empty_dir_writes_empty_lists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let image_dir = temp_dir.path().join("images");
        let save_dir = temp_dir.path().join("lists");
        fs::create_dir_all(&image_dir).unwrap();

        let ratios = SplitRatios::new(0.7, 0.2, 0.1);
        let lists = split_dataset(&image_dir, &save_dir, &ratios, 0).unwrap();

        assert_eq!(lists.total(), 0);
        for name in ["train.txt", "val.txt", "test.txt", "trainval.txt"] {
            assert_eq!(fs::read_to_string(save_dir.join(name)).unwrap(), "");
        }
    }

    #[test]
    fn test_split_dataset_rejects_bad_ratio_sum() {
        let temp_dir = tempfile::tempdir().unwrap();
        let image_dir = temp_dir.path().join("images");
        fs::create_dir_all(&image_dir).unwrap();

        let ratios = SplitRatios::new(0.5, 0.2, 0.1);
        let err = split_dataset(&image_dir, &temp_dir.path().join("lists"), &ratios, 0)
            .unwrap_err();
        assert!(err.to_string().contains("sum"));
    }
}
