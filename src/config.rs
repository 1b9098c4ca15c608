use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments for converting COCO JSON annotations to VOC XML.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct ConvertArgs {
    /// Path to the COCO annotation JSON file
    #[arg(short = 'c', long = "coco_json")]
    pub coco_json: PathBuf,

    /// Directory to write the per-image VOC XML files into
    #[arg(short = 'o', long = "output_dir")]
    pub output_dir: PathBuf,
}

/// Command-line arguments for splitting an image corpus into
/// train/val/test/trainval lists.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct SplitArgs {
    /// Directory containing the dataset images
    #[arg(short = 'i', long = "image_dir")]
    pub image_dir: PathBuf,

    /// Directory to write train.txt/val.txt/test.txt/trainval.txt into
    #[arg(short = 's', long = "save_dir")]
    pub save_dir: PathBuf,

    /// Proportion of the dataset to use for training
    #[arg(long = "train_ratio", default_value_t = 0.7, value_parser = validate_ratio)]
    pub train_ratio: f64,

    /// Proportion of the dataset to use for validation
    #[arg(long = "val_ratio", default_value_t = 0.2, value_parser = validate_ratio)]
    pub val_ratio: f64,

    /// Proportion of the dataset to use for testing
    #[arg(long = "test_ratio", default_value_t = 0.1, value_parser = validate_ratio)]
    pub test_ratio: f64,

    /// Seed for random shuffling
    #[arg(long = "seed", default_value_t = 0)]
    pub seed: u64,
}

/// Command-line arguments for drawing normalized-polygon ground truth
/// over an image.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct PolygonArgs {
    /// Path to the image file
    #[arg(short = 'i', long = "image")]
    pub image: PathBuf,

    /// Path to the normalized-polygon label file
    #[arg(short = 'l', long = "labels")]
    pub labels: PathBuf,

    /// Class-name file, one name per line (line index = class id).
    /// Falls back to the built-in COCO class list.
    #[arg(long = "class_names")]
    pub class_names: Option<PathBuf>,

    /// TTF/OTF font used for label text. Well-known system font
    /// locations are probed when omitted.
    #[arg(long = "font")]
    pub font: Option<PathBuf>,
}

/// Command-line arguments for drawing VOC bounding boxes over an image.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct RectangleArgs {
    /// Directory containing the dataset images
    #[arg(short = 'i', long = "image_dir")]
    pub image_dir: PathBuf,

    /// Directory containing the VOC XML annotations
    #[arg(short = 'a', long = "annotation_dir")]
    pub annotation_dir: PathBuf,

    /// Base name of the image to visualize, without extension
    #[arg(short = 'n', long = "name")]
    pub name: String,

    /// TTF/OTF font used for label text. Well-known system font
    /// locations are probed when omitted.
    #[arg(long = "font")]
    pub font: Option<PathBuf>,
}

// Validate that a split ratio is between 0.0 and 1.0
fn validate_ratio(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("RATIO must be between 0.0 and 1.0".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ratio() {
        assert!(validate_ratio("0.5").is_ok());
        assert!(validate_ratio("1.0").is_ok());
        assert!(validate_ratio("0.0").is_ok());
        assert!(validate_ratio("-0.1").is_err());
        assert!(validate_ratio("1.1").is_err());
        assert!(validate_ratio("abc").is_err());
    }
}
