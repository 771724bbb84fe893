// Immutable captures of the table for undo/redo

use std::sync::Arc;

use crate::workbook::{ColumnId, Workbook};

#[derive(Debug, Clone)]
pub struct ColumnSnapshot {
    pub id: ColumnId,
    pub header: String,
    pub cells: Arc<Vec<String>>,
}

/// Table contents at one point in time. Sums are not captured; they are
/// always recomputed on restore.
///
/// Cell vectors are shared with the live workbook until the workbook
/// writes to them, so taking a snapshot doesn't copy cell text.
#[derive(Debug, Clone)]
pub struct Snapshot {
    row_count: usize,
    columns: Arc<[ColumnSnapshot]>,
    next_column_id: u64,
}

impl Snapshot {
    pub fn capture(workbook: &Workbook) -> Self {
        let columns: Vec<ColumnSnapshot> = workbook
            .columns()
            .iter()
            .map(|c| ColumnSnapshot {
                id: c.id(),
                header: c.header().to_string(),
                cells: c.shared_cells(),
            })
            .collect();
        Self {
            row_count: workbook.row_count(),
            columns: columns.into(),
            next_column_id: workbook.next_column_id(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[ColumnSnapshot] {
        &self.columns
    }

    /// Rebuild a live workbook. Sums are recomputed; ragged columns are padded.
    pub fn to_workbook(&self) -> Workbook {
        let columns = self
            .columns
            .iter()
            .map(|c| (c.id, c.header.clone(), Arc::clone(&c.cells)))
            .collect();
        Workbook::from_shared(self.row_count, columns, self.next_column_id)
    }
}

/// Structural equality: row count, and per column the header and every cell.
impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.row_count == other.row_count
            && self.columns.len() == other.columns.len()
            && self.columns.iter().zip(other.columns.iter()).all(|(a, b)| {
                a.header == b.header && (Arc::ptr_eq(&a.cells, &b.cells) || a.cells == b.cells)
            })
    }
}

impl Eq for Snapshot {}
