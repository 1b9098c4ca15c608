//! COCO to PASCAL VOC conversion pipeline
//!
//! Emits exactly one VOC XML file per entry in the COCO document's
//! `images` list, including images with no annotations.

use log::{debug, info};
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::coco::{coco_to_voc_bbox, Annotation, CocoFile, Image};
use crate::utils::{create_progress_bar, ensure_output_directory, file_stem, read_coco_json};
use crate::voc::{BndBox, VocAnnotation, VocObject};

/// Convert a COCO JSON document into per-image VOC XML files.
///
/// Pre-existing XML files of the same name are overwritten without
/// confirmation. Returns the number of files written.
pub fn convert_coco_to_voc(coco_json: &Path, output_dir: &Path) -> Result<usize, Box<dyn Error>> {
    let coco = read_coco_json(coco_json)?;
    ensure_output_directory(output_dir)?;

    let categories = coco.category_names();
    let annotations_by_image = group_annotations(&coco, &categories)?;

    let pb = create_progress_bar(coco.images.len() as u64, "Convert");
    for image in &coco.images {
        let record = voc_record_for_image(image, &annotations_by_image[&image.id], &categories);

        let stem = sanitize_filename::sanitize(file_stem(&image.file_name));
        let xml_path = output_dir.join(stem).with_extension("xml");
        fs::write(&xml_path, record.to_xml_string()?)
            .map_err(|e| format!("failed to write {}: {}", xml_path.display(), e))?;

        debug!("converted {}", xml_path.display());
        pb.inc(1);
    }
    pb.finish_with_message("Conversion complete");

    info!(
        "wrote {} VOC XML files to {}",
        coco.images.len(),
        output_dir.display()
    );
    Ok(coco.images.len())
}

/// Build the image id to annotation list lookup, initialized for every
/// image so zero-annotation images still get an entry. An annotation
/// referencing an unknown image or category id fails the run; silently
/// dropping it would corrupt the derived dataset.
pub fn group_annotations<'a>(
    coco: &'a CocoFile,
    categories: &HashMap<u32, &str>,
) -> Result<HashMap<u64, Vec<&'a Annotation>>, Box<dyn Error>> {
    let mut by_image: HashMap<u64, Vec<&Annotation>> = coco
        .images
        .iter()
        .map(|image| (image.id, Vec::new()))
        .collect();

    for annotation in &coco.annotations {
        if !categories.contains_key(&annotation.category_id) {
            return Err(format!(
                "annotation references unknown category id {}",
                annotation.category_id
            )
            .into());
        }
        by_image
            .get_mut(&annotation.image_id)
            .ok_or_else(|| {
                format!(
                    "annotation references unknown image id {}",
                    annotation.image_id
                )
            })?
            .push(annotation);
    }

    Ok(by_image)
}

/// Translate one COCO image and its annotations into a VOC record,
/// preserving the annotation list's original order.
pub fn voc_record_for_image(
    image: &Image,
    annotations: &[&Annotation],
    categories: &HashMap<u32, &str>,
) -> VocAnnotation {
    let mut record = VocAnnotation::new(image.file_name.clone(), image.width, image.height);

    for annotation in annotations {
        let (xmin, ymin, xmax, ymax) = coco_to_voc_bbox(annotation.bbox);
        let name = categories
            .get(&annotation.category_id)
            .copied()
            .unwrap_or_default();
        record.objects.push(VocObject::new(
            name,
            BndBox {
                xmin,
                ymin,
                xmax,
                ymax,
            },
        ));
    }

    record
}
