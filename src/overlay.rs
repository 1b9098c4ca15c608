//! Ground-truth overlays
//!
//! Draws polygon outlines or VOC bounding boxes plus class labels onto a
//! copy of the source image. Both entry points write a new JPEG into the
//! current working directory and leave the inputs untouched.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect;
use log::info;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::labels::{class_label, parse_polygon_labels, ClassNames};
use crate::voc::{read_voc_xml, BndBox};

pub const POLYGON_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const BOX_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

const LABEL_SCALE: f32 = 20.0;
const LABEL_MARGIN: i64 = 5;
const BOX_THICKNESS: i64 = 2;

// Probed when no --font is given
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn load_font(path: &Path) -> Result<FontVec, Box<dyn Error>> {
    let bytes = fs::read(path)
        .map_err(|e| format!("failed to read font file {}: {}", path.display(), e))?;
    FontVec::try_from_vec(bytes)
        .map_err(|_| format!("invalid font file: {}", path.display()).into())
}

/// Load the given font, or probe well-known system locations
pub fn load_font_or_default(path: Option<&Path>) -> Result<FontVec, Box<dyn Error>> {
    if let Some(path) = path {
        return load_font(path);
    }
    for candidate in FONT_CANDIDATES {
        let candidate = Path::new(candidate);
        if candidate.exists() {
            if let Ok(font) = load_font(candidate) {
                return Ok(font);
            }
        }
    }
    Err("no usable font found in the standard locations; pass one with --font".into())
}

/// Draw a closed polygon outline. A single vertex degenerates to a dot.
pub fn draw_closed_polygon(image: &mut RgbImage, points: &[(i64, i64)], color: Rgb<u8>) {
    for (i, &(x1, y1)) in points.iter().enumerate() {
        let (x2, y2) = points[(i + 1) % points.len()];
        draw_line_segment_mut(
            image,
            (x1 as f32, y1 as f32),
            (x2 as f32, y2 as f32),
            color,
        );
    }
}

/// Rectangle outline with pixel thickness, drawn as nested 1-px rects.
/// Both corners are inclusive, so a (10,20,110,220) bndbox puts pixels
/// at exactly those coordinates.
pub fn draw_thick_hollow_rect(image: &mut RgbImage, bbox: &BndBox, color: Rgb<u8>) {
    for t in 0..BOX_THICKNESS {
        let width = (bbox.xmax - bbox.xmin + 1 - 2 * t).max(1) as u32;
        let height = (bbox.ymax - bbox.ymin + 1 - 2 * t).max(1) as u32;
        draw_hollow_rect_mut(
            image,
            Rect::at((bbox.xmin + t) as i32, (bbox.ymin + t) as i32).of_size(width, height),
            color,
        );
    }
}

// Label text above an anchor point, clamped to the top image edge
fn draw_label_text(
    image: &mut RgbImage,
    font: &FontVec,
    text: &str,
    anchor_x: i64,
    anchor_y: i64,
    color: Rgb<u8>,
) {
    let scale = PxScale::from(LABEL_SCALE);
    let (_, text_height) = text_size(scale, font, text);
    let x = anchor_x.max(0);
    let y = (anchor_y - text_height as i64 - LABEL_MARGIN).max(0);
    draw_text_mut(image, color, x as i32, y as i32, scale, font, text);
}

/// Draw every polygon in the label file as a closed outline with its
/// class name above the minimum-x/minimum-y corner.
///
/// Output: `<image_stem>_with_polygons.jpg` in the working directory.
pub fn overlay_polygons(
    image_path: &Path,
    label_path: &Path,
    names: &ClassNames,
    font: &FontVec,
) -> Result<PathBuf, Box<dyn Error>> {
    if !image_path.exists() {
        return Err(format!("image file not found: {}", image_path.display()).into());
    }
    if !label_path.exists() {
        return Err(format!("label file not found: {}", label_path.display()).into());
    }

    let content = fs::read_to_string(label_path)
        .map_err(|e| format!("failed to read label file {}: {}", label_path.display(), e))?;
    let labels = parse_polygon_labels(&content);

    let mut image = image::open(image_path)
        .map_err(|e| format!("failed to decode image {}: {}", image_path.display(), e))?
        .to_rgb8();
    let (width, height) = image.dimensions();
    info!("image size: {}x{}", width, height);

    for label in &labels {
        let pixels = crate::labels::denormalize(&label.points, width, height);
        draw_closed_polygon(&mut image, &pixels, POLYGON_COLOR);

        let anchor_x = pixels.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let anchor_y = pixels.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let text = class_label(names, label.class_id);
        draw_label_text(&mut image, font, &text, anchor_x, anchor_y, POLYGON_COLOR);
    }

    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let output = PathBuf::from(format!("{}_with_polygons.jpg", stem));
    image
        .save(&output)
        .map_err(|e| format!("failed to write {}: {}", output.display(), e))?;
    Ok(output)
}

/// Draw every bounding box of the matching VOC annotation, each with a
/// filled label chip sized to the measured text extent above its top
/// edge. Chips for boxes near the top edge are clamped onto the canvas.
///
/// Output: `<base_name>_voc_boxes.jpg` in the working directory.
pub fn overlay_voc_boxes(
    image_dir: &Path,
    annotation_dir: &Path,
    base_name: &str,
    font: &FontVec,
) -> Result<PathBuf, Box<dyn Error>> {
    let image_path = image_dir.join(format!("{}.jpg", base_name));
    let annotation_path = annotation_dir.join(format!("{}.xml", base_name));

    if !image_path.exists() {
        return Err(format!("image file not found: {}", image_path.display()).into());
    }
    if !annotation_path.exists() {
        return Err(format!("annotation file not found: {}", annotation_path.display()).into());
    }

    let annotation = read_voc_xml(&annotation_path)?;

    let mut image = image::open(&image_path)
        .map_err(|e| format!("failed to decode image {}: {}", image_path.display(), e))?
        .to_rgb8();

    let scale = PxScale::from(LABEL_SCALE);
    for object in &annotation.objects {
        draw_thick_hollow_rect(&mut image, &object.bndbox, BOX_COLOR);

        let (text_width, text_height) = text_size(scale, font, &object.name);
        let chip_x = object.bndbox.xmin.max(0);
        let chip_y = (object.bndbox.ymin - text_height as i64 - LABEL_MARGIN).max(0);
        draw_filled_rect_mut(
            &mut image,
            Rect::at(chip_x as i32, chip_y as i32)
                .of_size(text_width.max(1), text_height + LABEL_MARGIN as u32),
            BOX_COLOR,
        );
        draw_text_mut(
            &mut image,
            LABEL_TEXT_COLOR,
            chip_x as i32,
            chip_y as i32 + 2,
            scale,
            font,
            &object.name,
        );
    }

    let output = PathBuf::from(format!("{}_voc_boxes.jpg", base_name));
    image
        .save(&output)
        .map_err(|e| format!("failed to write {}: {}", output.display(), e))?;
    Ok(output)
}
