//! Dataset splitting into train/val/test/trainval list files

use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::types::{get_image_extensions_set, SplitLists};
use crate::utils::ensure_output_directory;

/// Train/val/test proportions. Expected to sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

impl SplitRatios {
    const SUM_TOLERANCE: f64 = 0.01;

    pub fn new(train: f64, val: f64, test: f64) -> Self {
        Self { train, val, test }
    }

    /// Reject ratio sets whose sum strays from 1.0. The test slice absorbs
    /// rounding loss, so a small deviation is tolerated.
    pub fn validate(&self) -> Result<(), String> {
        for ratio in [self.train, self.val, self.test] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(format!("split ratio {} is outside [0.0, 1.0]", ratio));
            }
        }
        let sum = self.train + self.val + self.test;
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(format!("split ratios sum to {}, expected 1.0", sum));
        }
        Ok(())
    }
}

/// Collect image ids (file stems) from a flat directory listing.
/// Extensions are matched case-insensitively; the result is sorted
/// lexically so shuffling starts from a reproducible order.
pub fn collect_image_ids(image_dir: &Path) -> std::io::Result<Vec<String>> {
    let extensions = get_image_extensions_set();
    let mut ids = Vec::new();

    for entry in fs::read_dir(image_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(extension) = path.extension() else {
            continue;
        };
        if !extensions.contains(&extension.to_string_lossy().to_lowercase()) {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            ids.push(stem.to_string_lossy().into_owned());
        }
    }

    ids.sort();
    Ok(ids)
}

/// Shuffle the ids with a seeded generator and slice them into
/// train/val/test. `train` and `val` counts floor; `test` takes the
/// remainder so the partition is always exhaustive.
pub fn partition_ids(mut ids: Vec<String>, ratios: &SplitRatios, seed: u64) -> SplitLists {
    let mut rng = StdRng::seed_from_u64(seed);
    ids.shuffle(&mut rng);

    let n = ids.len();
    let train_count = ((n as f64 * ratios.train).floor() as usize).min(n);
    let val_count = ((n as f64 * ratios.val).floor() as usize).min(n - train_count);

    let test = ids.split_off(train_count + val_count);
    let val = ids.split_off(train_count);

    SplitLists {
        train: ids,
        val,
        test,
    }
}

/// Write train.txt/val.txt/test.txt/trainval.txt as newline-joined ids,
/// no header and no trailing metadata. Existing files are overwritten.
pub fn write_split_lists(save_dir: &Path, lists: &SplitLists) -> std::io::Result<()> {
    let files = [
        ("train.txt", &lists.train),
        ("val.txt", &lists.val),
        ("test.txt", &lists.test),
    ];
    for (name, ids) in files {
        fs::write(save_dir.join(name), ids.join("\n"))?;
    }
    fs::write(save_dir.join("trainval.txt"), lists.trainval().join("\n"))
}

/// Split the images under `image_dir` and write the four list files into
/// `save_dir`. An empty image directory yields all-empty splits.
pub fn split_dataset(
    image_dir: &Path,
    save_dir: &Path,
    ratios: &SplitRatios,
    seed: u64,
) -> Result<SplitLists, Box<dyn Error>> {
    ratios.validate()?;

    let ids = collect_image_ids(image_dir)
        .map_err(|e| format!("failed to list {}: {}", image_dir.display(), e))?;
    let lists = partition_ids(ids, ratios, seed);

    ensure_output_directory(save_dir)?;
    write_split_lists(save_dir, &lists)?;

    info!(
        "total: {}, train: {}, val: {}, test: {}",
        lists.total(),
        lists.train.len(),
        lists.val.len(),
        lists.test.len()
    );
    Ok(lists)
}
