//! In-memory time-series storage for patient measurements.
//!
//! [`store::RecordStore`] owns every patient's history behind a single
//! reader/writer lock: appends are exclusive, range queries run concurrently.
//! The [`ingest`] module is the validation boundary in front of it, and
//! [`reader::FileDataReader`] feeds it from measurement files on disk.

pub mod error;
pub mod ingest;
pub mod reader;
pub mod store;


pub use store::{Patient, RecordStore};
