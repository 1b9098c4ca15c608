use clap::Parser;
use log::{error, info};

use coco2voc::overlay::load_font_or_default;
use coco2voc::{default_class_names, load_class_names, overlay_polygons, PolygonArgs};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = PolygonArgs::parse();

    let names = match &args.class_names {
        Some(path) => match load_class_names(path) {
            Ok(names) => names,
            Err(e) => {
                error!("Failed to read class names {}: {}", path.display(), e);
                return;
            }
        },
        None => default_class_names(),
    };

    let font = match load_font_or_default(args.font.as_deref()) {
        Ok(font) => font,
        Err(e) => {
            error!("Failed to load font: {}", e);
            return;
        }
    };

    match overlay_polygons(&args.image, &args.labels, &names, &font) {
        Ok(output) => info!("Overlay saved to {}", output.display()),
        Err(e) => error!("Failed to draw polygons: {}", e),
    }
}
