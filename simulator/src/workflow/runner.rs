use crate::workflow::config::DashboardConfig;
use anyhow::Context;
use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use wastecore::statistics::Stats;
use wastecore::store::FileSlot;
use wastecore::{ClassificationRecord, ClassificationSimulator, ClassificationStore, SharedStore};

pub struct RunSummary {
    pub classified: Vec<ClassificationRecord>,
    pub stats: Stats,
    pub csv_path: PathBuf,
    pub report_path: PathBuf,
}

fn classify_into(store: &mut ClassificationStore, label: &str) -> ClassificationRecord {
    let result = ClassificationSimulator::default().classify(label, store.rng_mut());
    let record = result.into_record(Some(label.to_string()), Utc::now());
    store.add_classification(record.clone());
    record
}

/// Drives the store from the command line and persists it between runs.
#[derive(Clone)]
pub struct Runner {
    config: DashboardConfig,
    write_lock: Arc<Mutex<()>>,
}

impl Runner {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn slot(&self) -> FileSlot {
        FileSlot::new(&self.config.snapshot_dir)
    }

    pub fn open_store(&self, reset: bool) -> anyhow::Result<SharedStore> {
        let rng = StdRng::seed_from_u64(self.config.seed);
        let mut store = ClassificationStore::load(&self.slot(), self.config.store_options(), rng)
            .with_context(|| {
                format!(
                    "loading snapshot from {}",
                    self.config.snapshot_dir.display()
                )
            })?;
        if reset {
            store.clear_data();
        }
        Ok(SharedStore::new(store))
    }

    /// Saves the current snapshot. The store lock is held only while the
    /// snapshot is copied; writers are serialized so the newest copy lands last.
    pub fn persist(&self, store: &SharedStore) -> anyhow::Result<()> {
        let _writing = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = store.with(|store| store.to_snapshot());
        let mut slot = self.slot();
        snapshot
            .save_to(&mut slot)
            .with_context(|| format!("saving snapshot to {}", self.config.snapshot_dir.display()))?;
        log::debug!(
            "saved snapshot with {} records",
            snapshot.recent_classifications.len()
        );
        Ok(())
    }

    /// Runs `label` through the simulator and records the result.
    pub fn classify_label(&self, store: &SharedStore, label: &str) -> ClassificationRecord {
        store.with(|store| classify_into(store, label))
    }

    pub fn classify_labels(&self, store: &SharedStore, labels: &[String]) -> Vec<ClassificationRecord> {
        store.with(|store| {
            labels
                .iter()
                .map(|label| classify_into(store, label))
                .collect()
        })
    }

    /// Classifies `batch_size` generated items.
    pub fn simulate_batch(&self, store: &SharedStore) -> Vec<ClassificationRecord> {
        let simulator = ClassificationSimulator::default();
        store.with(|store| {
            let results = simulator.simulate_batch(self.config.batch_size, store.rng_mut());
            results
                .into_iter()
                .map(|result| {
                    let record = result.into_record(None, Utc::now());
                    store.add_classification(record.clone());
                    record
                })
                .collect()
        })
    }

    pub fn write_exports(&self, store: &SharedStore) -> anyhow::Result<(PathBuf, PathBuf)> {
        let dir = &self.config.export_dir;
        fs::create_dir_all(dir)
            .with_context(|| format!("creating export directory {}", dir.display()))?;
        let (csv, report) =
            store.with(|store| (store.export_csv(), store.report_document(Utc::now())));

        let csv_path = dir.join("waste-classifications.csv");
        fs::write(&csv_path, csv)
            .with_context(|| format!("writing {}", csv_path.display()))?;
        let report_path = dir.join("waste-classifications.html");
        fs::write(&report_path, report)
            .with_context(|| format!("writing {}", report_path.display()))?;
        Ok((csv_path, report_path))
    }

    /// Offline run: classify, persist, export.
    pub fn execute(&self, store: &SharedStore, labels: &[String]) -> anyhow::Result<RunSummary> {
        let classified = if labels.is_empty() {
            self.simulate_batch(store)
        } else {
            self.classify_labels(store, labels)
        };
        self.persist(store)?;
        let (csv_path, report_path) = self.write_exports(store)?;
        let stats = store.with(|store| *store.stats());

        Ok(RunSummary {
            classified,
            stats,
            csv_path,
            report_path,
        })
    }
}
