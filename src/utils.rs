use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::coco::CocoFile;

/// Read and parse a COCO JSON document by streaming it from the file
/// instead of loading the whole text into memory first. Malformed JSON
/// fails the run.
pub fn read_coco_json(path: &Path) -> Result<CocoFile, Box<dyn Error>> {
    let file = fs::File::open(path)
        .map_err(|e| format!("failed to open COCO file {}: {}", path.display(), e))?;
    let coco = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("failed to parse COCO file {}: {}", path.display(), e))?;
    Ok(coco)
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Create the output directory if it is absent. Existing directories and
/// their contents are left in place; output files overwrite by name.
pub fn ensure_output_directory(path: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// File stem of an annotation-supplied file name, e.g. "a.jpg" -> "a".
/// Names without an extension pass through unchanged.
pub fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("a.jpg"), "a");
        assert_eq!(file_stem("000000000139.jpg"), "000000000139");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem("noext"), "noext");
    }
}
