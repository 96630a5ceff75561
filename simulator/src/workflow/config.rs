use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use wastecore::StoreOptions;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub snapshot_dir: PathBuf,
    pub export_dir: PathBuf,
    pub batch_size: usize,
    pub seed: u64,
    pub feed_capacity: usize,
    pub history_capacity: Option<usize>,
    pub refresh_interval_secs: u64,
    pub bind_address: SocketAddr,
    pub classifier: ClassifierConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from("tools/data/state"),
            export_dir: PathBuf::from("tools/data/exports"),
            batch_size: 20,
            seed: 0,
            feed_capacity: 10,
            history_capacity: None,
            refresh_interval_secs: 30,
            bind_address: SocketAddr::from(([127, 0, 0, 1], 9000)),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(batch_size: usize, seed: u64, classifier_url: Option<String>) -> Self {
        let mut config = Self {
            batch_size,
            seed,
            ..Default::default()
        };
        if let Some(base_url) = classifier_url {
            config.classifier.base_url = base_url;
        }
        config
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            feed_capacity: self.feed_capacity.max(1),
            history_capacity: self.history_capacity,
        }
    }
}
