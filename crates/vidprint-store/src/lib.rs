//! Fingerprint persistence for vidprint.
//!
//! Fingerprints live in plain text files under a data root, one directory
//! per video. This crate owns the on-disk layout, the corpus listing, and
//! the CSV result tables written after a matching run.

pub mod error;
pub mod listing;
pub mod results;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use listing::{list_video_files, VIDEO_EXTENSIONS};
pub use results::{table_file_name, write_divergence_series, ResultsWriter};
pub use store::FingerprintStore;
