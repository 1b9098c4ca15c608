use clap::Parser;
use log::{error, info};

use coco2voc::{convert_coco_to_voc, ConvertArgs};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = ConvertArgs::parse();

    if !args.coco_json.exists() {
        error!(
            "The specified COCO file does not exist: {}",
            args.coco_json.display()
        );
        return;
    }

    info!("Starting COCO to VOC conversion...");

    match convert_coco_to_voc(&args.coco_json, &args.output_dir) {
        Ok(count) => info!(
            "Done! {} VOC XML files saved to {}",
            count,
            args.output_dir.display()
        ),
        Err(e) => error!("Failed to convert dataset: {}", e),
    }
}
