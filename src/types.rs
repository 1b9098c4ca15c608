use std::collections::HashSet;
use std::sync::OnceLock;

// Image formats eligible for dataset splitting
pub const IMG_FORMATS: &[&str] = &["jpg", "jpeg", "png"];

// Precomputed HashSet of image extensions for fast lookup
pub static IMAGE_EXTENSIONS_SET: OnceLock<HashSet<String>> = OnceLock::new();

/// Get the image extensions set
pub fn get_image_extensions_set() -> &'static HashSet<String> {
    IMAGE_EXTENSIONS_SET.get_or_init(|| IMG_FORMATS.iter().map(|ext| ext.to_lowercase()).collect())
}

// Struct to hold the id lists for the train/val/test splits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLists {
    pub train: Vec<String>,
    pub val: Vec<String>,
    pub test: Vec<String>,
}

impl SplitLists {
    /// The trainval list is the train list followed by the val list in
    /// their post-shuffle order, never reshuffled.
    pub fn trainval(&self) -> Vec<String> {
        self.train.iter().chain(self.val.iter()).cloned().collect()
    }

    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }
}
