//! Single-slot snapshot persistence.
//!
//! The cache holds exactly one record — the last loaded or last saved entry —
//! as a JSON file in the platform data directory. It supplies the initial
//! form state on startup and is overwritten after each confirmed submission.

mod error;
mod snapshot;

pub use error::StorageError;
pub use snapshot::{SnapshotCache, default_data_dir};
