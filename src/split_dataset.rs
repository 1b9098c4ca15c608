use clap::Parser;
use log::{error, info};

use coco2voc::{split_dataset, SplitArgs, SplitRatios};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = SplitArgs::parse();

    if !args.image_dir.exists() {
        error!(
            "The specified image_dir does not exist: {}",
            args.image_dir.display()
        );
        return;
    }

    let ratios = SplitRatios::new(args.train_ratio, args.val_ratio, args.test_ratio);

    match split_dataset(&args.image_dir, &args.save_dir, &ratios, args.seed) {
        Ok(_) => info!("Split lists saved to {}", args.save_dir.display()),
        Err(e) => error!("Failed to split dataset: {}", e),
    }
}
