use std::sync::Arc;

use crate::aggregate;

/// Stable column identity. Assigned at creation, never reused within a workbook.
///
/// Positions shift when columns are deleted; ids don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub u64);

/// A named column of text cells plus its derived sum
#[derive(Debug, Clone)]
pub struct Column {
    id: ColumnId,
    header: String,
    /// Shared with history snapshots; copied on first write.
    cells: Arc<Vec<String>>,
    sum: f64,
}

impl Column {
    pub(crate) fn new(id: ColumnId, header: String, cells: Arc<Vec<String>>) -> Self {
        let sum = aggregate::compute_sum(cells.as_slice());
        Self { id, header, cells, sum }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, row: usize) -> Option<&str> {
        self.cells.get(row).map(|s| s.as_str())
    }

    /// Numeric sum of the column (recomputed on every change)
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Sum as shown in the sum row ("15.00")
    pub fn formatted_sum(&self) -> String {
        aggregate::format_sum(self.sum)
    }

    pub(crate) fn shared_cells(&self) -> Arc<Vec<String>> {
        Arc::clone(&self.cells)
    }

    pub(crate) fn set_header(&mut self, header: String) {
        self.header = header;
    }

    /// Mutable access to the cells. Caller must call `recompute_sum` afterwards.
    pub(crate) fn cells_mut(&mut self) -> &mut Vec<String> {
        Arc::make_mut(&mut self.cells)
    }

    pub(crate) fn recompute_sum(&mut self) {
        self.sum = aggregate::compute_sum(self.cells.as_slice());
    }
}

/// Default header for the column created at 0-based `position`
pub fn default_header(prefix: &str, position: usize) -> String {
    format!("{} {}", prefix, position + 1)
}

/// The whole table: a shared row count and an ordered list of columns.
///
/// Invariants (held by every constructor and every mutation in `TableModel`):
/// - `row_count >= 1`
/// - at least one column
/// - every column has exactly `row_count` cells
#[derive(Debug, Clone)]
pub struct Workbook {
    row_count: usize,
    columns: Vec<Column>,
    /// Next id to hand out. Monotonically increasing, never reused.
    next_column_id: u64,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new(crate::DEFAULT_COLUMNS)
    }
}

impl Workbook {
    /// Fresh workbook: `columns` empty columns (at least one) and one row
    pub fn new(columns: usize) -> Self {
        Self::with_prefix(columns, crate::DEFAULT_HEADER_PREFIX)
    }

    pub fn with_prefix(columns: usize, prefix: &str) -> Self {
        let headers = (0..columns.max(1))
            .map(|i| (default_header(prefix, i), Vec::new()))
            .collect();
        Self::reconciled(1, headers, prefix)
    }

    /// Build a workbook from raw column data, equalizing column lengths.
    ///
    /// The row count becomes the larger of `row_count` and the longest
    /// column; shorter columns are padded with empty cells. Data is never
    /// truncated. A zero row count is lifted to 1 and an empty column list
    /// gets one default column.
    pub fn reconciled(row_count: usize, columns: Vec<(String, Vec<String>)>, prefix: &str) -> Self {
        let mut columns = columns;
        if columns.is_empty() {
            columns.push((default_header(prefix, 0), Vec::new()));
        }

        let longest = columns.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
        let row_count = row_count.max(longest).max(1);

        let mut next_column_id = 1;
        let columns = columns
            .into_iter()
            .map(|(header, mut cells)| {
                cells.resize(row_count, String::new());
                let id = ColumnId(next_column_id);
                next_column_id += 1;
                Column::new(id, header, Arc::new(cells))
            })
            .collect();

        Self { row_count, columns, next_column_id }
    }

    /// Rebuild from parts that already carry ids (snapshot restore).
    ///
    /// Ragged columns are padded the same way `reconciled` does.
    pub(crate) fn from_shared(
        row_count: usize,
        columns: Vec<(ColumnId, String, Arc<Vec<String>>)>,
        next_column_id: u64,
    ) -> Self {
        let longest = columns.iter().map(|(_, _, cells)| cells.len()).max().unwrap_or(0);
        let row_count = row_count.max(longest).max(1);

        let mut max_id = 0;
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(id, header, mut cells)| {
                if cells.len() != row_count {
                    log::warn!(
                        "restoring ragged column {} ({} cells, expected {})",
                        id.0,
                        cells.len(),
                        row_count
                    );
                    Arc::make_mut(&mut cells).resize(row_count, String::new());
                }
                max_id = max_id.max(id.0);
                Column::new(id, header, cells)
            })
            .collect();

        let mut workbook = Self {
            row_count,
            columns,
            next_column_id: next_column_id.max(max_id + 1),
        };
        if workbook.columns.is_empty() {
            workbook.push_column(default_header(crate::DEFAULT_HEADER_PREFIX, 0));
        }
        workbook
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Current display position of a column
    pub fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn column_id(&self, index: usize) -> Option<ColumnId> {
        self.columns.get(index).map(|c| c.id)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&str> {
        self.columns.get(col).and_then(|c| c.cell(row))
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    pub fn next_column_id(&self) -> u64 {
        self.next_column_id
    }

    /// True when every structural invariant holds
    pub fn is_consistent(&self) -> bool {
        self.row_count >= 1
            && !self.columns.is_empty()
            && self.columns.iter().all(|c| c.cells.len() == self.row_count)
    }

    fn generate_column_id(&mut self) -> ColumnId {
        let id = ColumnId(self.next_column_id);
        self.next_column_id += 1;
        id
    }

    /// Never hand out an id below `next`. Ids stay unique across undo.
    pub(crate) fn reserve_column_ids(&mut self, next: u64) {
        self.next_column_id = self.next_column_id.max(next);
    }

    pub(crate) fn push_column(&mut self, header: String) -> usize {
        let id = self.generate_column_id();
        let cells = vec![String::new(); self.row_count];
        self.columns.push(Column::new(id, header, Arc::new(cells)));
        self.columns.len() - 1
    }

    pub(crate) fn remove_column(&mut self, index: usize) -> Column {
        self.columns.remove(index)
    }

    pub(crate) fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub(crate) fn set_row_count(&mut self, rows: usize) {
        self.row_count = rows;
    }
}

/// Structural equality: row count, headers and cells. Ids and sums are ignored.
impl PartialEq for Workbook {
    fn eq(&self, other: &Self) -> bool {
        self.row_count == other.row_count
            && self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(a, b)| a.header == b.header && a.cells == b.cells)
    }
}
