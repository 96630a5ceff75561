//! Classification simulator, statistics engine and state store behind the
//! waste-sorting dashboard.
//!
//! Records flow in through `ClassificationStore::add_classification`; every
//! dashboard figure is derived from them by the pure functions in
//! `statistics`, and `export` turns the record list into CSV or a printable
//! report.

pub mod catalog;
pub mod classifier;
pub mod export;
pub mod math;
pub mod prelude;
pub mod record;
pub mod statistics;
pub mod store;
pub mod telemetry;

pub use catalog::{WasteTypeCatalog, WasteTypeEntry};
pub use classifier::ClassificationSimulator;
pub use export::ExportEngine;
pub use prelude::{Category, CoreError, CoreResult, RandomSource};
pub use record::{ClassificationRecord, ClassificationResult, ClassifierResponse};
pub use store::{ClassificationStore, DashboardView, SharedStore, StoreOptions};
