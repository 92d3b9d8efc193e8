//! Front half of the pipeline: import tables and declaration signals.

pub mod imports;
pub mod signals;

pub use imports::ImportTable;
pub use signals::{declaration_kind, SignalExtractor};
