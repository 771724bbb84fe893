//! `tally-engine` - in-memory state model for the production-count journal.
//!
//! Pure engine crate: owns the table, recomputes sums, keeps undo/redo
//! history. No file or terminal dependencies.

pub mod aggregate;
pub mod editor;
pub mod error;
pub mod history;
pub mod snapshot;
pub mod table;
pub mod workbook;

pub use editor::{Edit, EditOutcome, Editor};
pub use error::EngineError;
pub use history::History;
pub use snapshot::Snapshot;
pub use table::TableModel;
pub use workbook::{Column, ColumnId, Workbook};

/// Number of columns in a fresh workbook
pub const DEFAULT_COLUMNS: usize = 3;

/// Default undo depth
pub const DEFAULT_MAX_UNDO: usize = 50;

/// Prefix for generated column headers ("Column 1", "Column 2", ...)
pub const DEFAULT_HEADER_PREFIX: &str = "Column";
