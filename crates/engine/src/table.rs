// Structural edits on the workbook
//
// TableModel is the only writer of the live Workbook. Every operation is
// all-or-nothing: a rejected edit leaves the table exactly as it was.
// History recording is the caller's job (see `Editor`).

use crate::error::EngineError;
use crate::snapshot::Snapshot;
use crate::workbook::{default_header, Column, ColumnId, Workbook};

#[derive(Debug, Clone)]
pub struct TableModel {
    workbook: Workbook,
    header_prefix: String,
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new(Workbook::default())
    }
}

impl TableModel {
    pub fn new(workbook: Workbook) -> Self {
        Self {
            workbook,
            header_prefix: crate::DEFAULT_HEADER_PREFIX.to_string(),
        }
    }

    /// Use a different prefix for generated headers ("Line" -> "Line 4")
    pub fn with_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn row_count(&self) -> usize {
        self.workbook.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.workbook.column_count()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.workbook.column(index)
    }

    pub fn column_id(&self, index: usize) -> Option<ColumnId> {
        self.workbook.column_id(index)
    }

    pub fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.workbook.column_index(id)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&str> {
        self.workbook.cell(col, row)
    }

    pub fn sum(&self, col: usize) -> Option<f64> {
        self.workbook.column(col).map(|c| c.sum())
    }

    pub fn formatted_sum(&self, col: usize) -> Option<String> {
        self.workbook.column(col).map(|c| c.formatted_sum())
    }

    // ========================================================================
    // Columns
    // ========================================================================

    /// Append a column with empty cells. Returns its position.
    ///
    /// Without a header, the column is named after its 1-based position at
    /// creation time. Existing headers are never renumbered.
    pub fn add_column(&mut self, header: Option<&str>) -> usize {
        let header = match header {
            Some(h) => h.to_string(),
            None => default_header(&self.header_prefix, self.workbook.column_count()),
        };
        let index = self.workbook.push_column(header);
        log::debug!("added column {} at position {}", self.workbook.columns()[index].id().0, index);
        index
    }

    /// Append several named columns at once. Returns the position of the first.
    pub fn add_columns<S: AsRef<str>>(&mut self, headers: &[S]) -> usize {
        let first = self.workbook.column_count();
        for header in headers {
            self.workbook.push_column(header.as_ref().to_string());
        }
        first
    }

    /// Remove the column at `index`. The last remaining column can't be removed.
    pub fn delete_column(&mut self, index: usize) -> Result<ColumnId, EngineError> {
        let count = self.workbook.column_count();
        if index >= count {
            return Err(EngineError::ColumnOutOfRange { index, count });
        }
        if count <= 1 {
            return Err(EngineError::LastColumn);
        }
        let removed = self.workbook.remove_column(index);
        log::debug!("deleted column {} from position {}", removed.id().0, index);
        Ok(removed.id())
    }

    /// Remove a column by its stable id
    pub fn delete_column_by_id(&mut self, id: ColumnId) -> Result<usize, EngineError> {
        let index = self
            .workbook
            .column_index(id)
            .ok_or(EngineError::UnknownColumn(id))?;
        self.delete_column(index)?;
        Ok(index)
    }

    pub fn set_header(&mut self, col: usize, header: &str) -> Result<(), EngineError> {
        let count = self.workbook.column_count();
        let column = self
            .workbook
            .column_mut(col)
            .ok_or(EngineError::ColumnOutOfRange { index: col, count })?;
        column.set_header(header.to_string());
        Ok(())
    }

    // ========================================================================
    // Rows
    // ========================================================================

    /// Append an empty row to every column. Returns the new row's index.
    pub fn add_row(&mut self) -> usize {
        let rows = self.workbook.row_count() + 1;
        for column in self.workbook.columns_mut() {
            column.cells_mut().push(String::new());
        }
        self.workbook.set_row_count(rows);
        rows - 1
    }

    /// Remove row `index` from every column. The last remaining row can't be removed.
    pub fn delete_row(&mut self, index: usize) -> Result<(), EngineError> {
        let count = self.workbook.row_count();
        if index >= count {
            return Err(EngineError::RowOutOfRange { index, count });
        }
        if count <= 1 {
            return Err(EngineError::LastRow);
        }
        for column in self.workbook.columns_mut() {
            column.cells_mut().remove(index);
            column.recompute_sum();
        }
        self.workbook.set_row_count(count - 1);
        Ok(())
    }

    // ========================================================================
    // Cells
    // ========================================================================

    /// Replace one cell's text. Only that column's sum is recomputed.
    ///
    /// Returns false if the cell already held `value` (nothing changed).
    pub fn set_cell(&mut self, col: usize, row: usize, value: &str) -> Result<bool, EngineError> {
        let count = self.workbook.column_count();
        let rows = self.workbook.row_count();
        if row >= rows {
            return Err(EngineError::RowOutOfRange { index: row, count: rows });
        }
        let column = self
            .workbook
            .column_mut(col)
            .ok_or(EngineError::ColumnOutOfRange { index: col, count })?;
        if column.cell(row) == Some(value) {
            return Ok(false);
        }
        column.cells_mut()[row] = value.to_string();
        column.recompute_sum();
        Ok(true)
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.workbook)
    }

    /// Replace the whole table with a snapshot's contents.
    ///
    /// Ids handed out after the snapshot was taken stay retired, so a
    /// column added after an undo never reuses the id of an undone one.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        let next_id = self.workbook.next_column_id();
        self.workbook = snapshot.to_workbook();
        self.workbook.reserve_column_ids(next_id);
    }

    /// Replace the whole table with a workbook built elsewhere (file load)
    pub fn replace(&mut self, workbook: Workbook) {
        self.workbook = workbook;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> TableModel {
        TableModel::new(Workbook::new(3))
    }

    #[test]
    fn test_add_column_default_header() {
        let mut t = fresh();
        let idx = t.add_column(None);
        assert_eq!(idx, 3);
        assert_eq!(t.column(3).unwrap().header(), "Column 4");
        assert_eq!(t.column(3).unwrap().cells().len(), t.row_count());
    }

    #[test]
    fn test_headers_not_renumbered_after_delete() {
        let mut t = fresh();
        t.delete_column(0).unwrap();
        let idx = t.add_column(None);
        // Position at creation time is 3, so "Column 3" appears twice
        assert_eq!(t.column(idx).unwrap().header(), "Column 3");
        assert_eq!(t.column(0).unwrap().header(), "Column 2");
    }

    #[test]
    fn test_add_column_named() {
        let mut t = fresh();
        t.add_row();
        let idx = t.add_column(Some("Line 7"));
        assert_eq!(t.column(idx).unwrap().header(), "Line 7");
        assert_eq!(t.column(idx).unwrap().cells(), &["".to_string(), "".to_string()][..]);
    }

    #[test]
    fn test_delete_column_keeps_others_untouched() {
        let mut t = fresh();
        t.set_cell(2, 0, "9").unwrap();
        let id2 = t.column_id(2).unwrap();

        t.delete_column(1).unwrap();

        assert_eq!(t.column_count(), 2);
        assert_eq!(t.column_index(id2), Some(1));
        assert_eq!(t.column(1).unwrap().header(), "Column 3");
        assert_eq!(t.cell(1, 0), Some("9"));
    }

    #[test]
    fn test_delete_last_column_rejected() {
        let mut t = TableModel::new(Workbook::new(1));
        let before = t.workbook().clone();
        assert_eq!(t.delete_column(0), Err(EngineError::LastColumn));
        assert_eq!(t.workbook(), &before);
    }

    #[test]
    fn test_delete_column_out_of_range() {
        let mut t = fresh();
        assert_eq!(
            t.delete_column(5),
            Err(EngineError::ColumnOutOfRange { index: 5, count: 3 })
        );
        assert_eq!(t.column_count(), 3);
    }

    #[test]
    fn test_delete_column_by_id() {
        let mut t = fresh();
        let id = t.column_id(1).unwrap();
        assert_eq!(t.delete_column_by_id(id), Ok(1));
        assert_eq!(t.delete_column_by_id(id), Err(EngineError::UnknownColumn(id)));
    }

    #[test]
    fn test_add_row_extends_every_column() {
        let mut t = fresh();
        assert_eq!(t.add_row(), 1);
        assert_eq!(t.add_row(), 2);
        assert_eq!(t.row_count(), 3);
        assert!(t.workbook().is_consistent());
    }

    #[test]
    fn test_delete_row_shifts_cells_up() {
        let mut t = fresh();
        t.add_row();
        t.add_row();
        t.set_cell(0, 0, "1").unwrap();
        t.set_cell(0, 1, "2").unwrap();
        t.set_cell(0, 2, "3").unwrap();

        t.delete_row(1).unwrap();

        assert_eq!(t.row_count(), 2);
        assert_eq!(t.cell(0, 0), Some("1"));
        assert_eq!(t.cell(0, 1), Some("3"));
        assert_eq!(t.formatted_sum(0).unwrap(), "4.00");
        assert!(t.workbook().is_consistent());
    }

    #[test]
    fn test_delete_last_row_rejected() {
        let mut t = fresh();
        t.set_cell(0, 0, "5").unwrap();
        let before = t.workbook().clone();
        assert_eq!(t.delete_row(0), Err(EngineError::LastRow));
        assert_eq!(t.workbook(), &before);
    }

    #[test]
    fn test_set_cell_updates_sum() {
        let mut t = fresh();
        t.add_row();
        t.add_row();
        t.set_cell(0, 1, "10").unwrap();
        t.set_cell(0, 2, "5").unwrap();
        assert_eq!(t.formatted_sum(0).unwrap(), "15.00");
        assert_eq!(t.formatted_sum(1).unwrap(), "0.00");
    }

    #[test]
    fn test_set_cell_same_value_is_noop() {
        let mut t = fresh();
        assert_eq!(t.set_cell(0, 0, "4"), Ok(true));
        assert_eq!(t.set_cell(0, 0, "4"), Ok(false));
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut t = fresh();
        assert_eq!(
            t.set_cell(0, 1, "x"),
            Err(EngineError::RowOutOfRange { index: 1, count: 1 })
        );
        assert_eq!(
            t.set_cell(3, 0, "x"),
            Err(EngineError::ColumnOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_restore_recomputes_sums() {
        let mut t = fresh();
        t.set_cell(1, 0, "2.25").unwrap();
        let snap = t.snapshot();
        t.set_cell(1, 0, "").unwrap();
        assert_eq!(t.formatted_sum(1).unwrap(), "0.00");

        t.restore(&snap);
        assert_eq!(t.formatted_sum(1).unwrap(), "2.25");
    }

    #[test]
    fn test_restore_does_not_reuse_ids() {
        let mut t = fresh();
        let before = t.snapshot();
        let idx = t.add_column(Some("X"));
        let x = t.column_id(idx).unwrap();

        t.restore(&before);
        let idx = t.add_column(Some("Y"));
        let y = t.column_id(idx).unwrap();

        assert_ne!(x, y);
        assert!(y > x);
        assert_eq!(t.delete_column_by_id(x), Err(EngineError::UnknownColumn(x)));
        assert_eq!(t.column(3).unwrap().header(), "Y");
    }

    #[test]
    fn test_header_prefix() {
        let mut t = TableModel::new(Workbook::new(1)).with_header_prefix("Line");
        let idx = t.add_column(None);
        assert_eq!(t.column(idx).unwrap().header(), "Line 2");
    }
}
