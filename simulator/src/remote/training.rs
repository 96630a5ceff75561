//! Labelled training sets laid out as `<dir>/<label>/<image>`.

use crate::remote::client::TrainingSample;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "bmp"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn sorted_entries(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("listing {}", dir.display()))?;
    paths.sort();
    Ok(paths)
}

/// Reads every image under each label directory of `root`. Files directly in
/// `root` and non-image files are ignored.
pub fn collect_samples(root: &Path) -> anyhow::Result<Vec<TrainingSample>> {
    let mut samples = Vec::new();
    for label_dir in sorted_entries(root)? {
        if !label_dir.is_dir() {
            continue;
        }
        let Some(label) = label_dir.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        for path in sorted_entries(&label_dir)? {
            if !path.is_file() || !is_image(&path) {
                continue;
            }
            let image =
                fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            samples.push(TrainingSample {
                label: label.to_string(),
                image,
            });
        }
    }
    Ok(samples)
}
