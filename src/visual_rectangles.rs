use clap::Parser;
use log::{error, info};

use coco2voc::overlay::load_font_or_default;
use coco2voc::{overlay_voc_boxes, RectangleArgs};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = RectangleArgs::parse();

    if !args.image_dir.exists() {
        error!(
            "The specified image_dir does not exist: {}",
            args.image_dir.display()
        );
        return;
    }
    if !args.annotation_dir.exists() {
        error!(
            "The specified annotation_dir does not exist: {}",
            args.annotation_dir.display()
        );
        return;
    }

    let font = match load_font_or_default(args.font.as_deref()) {
        Ok(font) => font,
        Err(e) => {
            error!("Failed to load font: {}", e);
            return;
        }
    };

    match overlay_voc_boxes(&args.image_dir, &args.annotation_dir, &args.name, &font) {
        Ok(output) => info!("Overlay saved to {}", output.display()),
        Err(e) => error!("Failed to draw boxes: {}", e),
    }
}
