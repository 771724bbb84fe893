//! Edit orchestration.
//!
//! The presenter never touches `TableModel` or `History` directly. It sends
//! an [`Edit`] to the [`Editor`], which applies it and then records the new
//! state. Keeping the two steps here means the table knows nothing about
//! history policy.

use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::history::History;
use crate::snapshot::Snapshot;
use crate::table::TableModel;
use crate::workbook::{ColumnId, Workbook};

/// One user-level change to the table
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AddColumn { header: Option<String> },
    /// Several named columns as a single undo step (directory import)
    AddColumns { headers: Vec<String> },
    DeleteColumn { index: usize },
    DeleteColumnById { id: ColumnId },
    AddRow,
    DeleteRow { index: usize },
    SetCell { col: usize, row: usize, value: String },
    SetHeader { col: usize, header: String },
}

/// What an applied edit did
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    ColumnAdded { index: usize },
    ColumnsAdded { first: usize, count: usize },
    ColumnDeleted { index: usize, id: ColumnId },
    RowAdded { index: usize },
    RowDeleted { index: usize },
    CellSet { changed: bool },
    HeaderSet,
}

#[derive(Debug, Clone)]
pub struct Editor {
    table: TableModel,
    history: History,
    /// State last written to (or read from) disk; None for a new, never-saved table
    persisted: Option<Snapshot>,
    /// State the editor started from, used for dirty checks before the first save
    baseline: Snapshot,
    current_file: Option<PathBuf>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(TableModel::default(), crate::DEFAULT_MAX_UNDO)
    }
}

impl Editor {
    /// Start editing `table` with a history of at most `max_undo` states
    pub fn new(table: TableModel, max_undo: usize) -> Self {
        let baseline = table.snapshot();
        let mut history = History::new(max_undo);
        history.reset(baseline.clone());
        Self {
            table,
            history,
            persisted: None,
            baseline,
            current_file: None,
        }
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn workbook(&self) -> &Workbook {
        self.table.workbook()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Apply one edit and record the resulting state.
    ///
    /// A rejected edit changes neither the table nor the history.
    pub fn apply(&mut self, edit: Edit) -> Result<EditOutcome, EngineError> {
        let outcome = match edit {
            Edit::AddColumn { header } => {
                let index = self.table.add_column(header.as_deref());
                EditOutcome::ColumnAdded { index }
            }
            Edit::AddColumns { headers } => {
                let first = self.table.add_columns(&headers);
                EditOutcome::ColumnsAdded { first, count: headers.len() }
            }
            Edit::DeleteColumn { index } => {
                let id = self.table.delete_column(index)?;
                EditOutcome::ColumnDeleted { index, id }
            }
            Edit::DeleteColumnById { id } => {
                let index = self.table.delete_column_by_id(id)?;
                EditOutcome::ColumnDeleted { index, id }
            }
            Edit::AddRow => EditOutcome::RowAdded { index: self.table.add_row() },
            Edit::DeleteRow { index } => {
                self.table.delete_row(index)?;
                EditOutcome::RowDeleted { index }
            }
            Edit::SetCell { col, row, value } => {
                let changed = self.table.set_cell(col, row, &value)?;
                EditOutcome::CellSet { changed }
            }
            Edit::SetHeader { col, header } => {
                self.table.set_header(col, &header)?;
                EditOutcome::HeaderSet
            }
        };

        let recorded = self.history.record(self.table.snapshot());
        log::debug!("applied {:?} (recorded: {})", outcome, recorded);
        Ok(outcome)
    }

    pub fn undo(&mut self) -> Result<(), EngineError> {
        let snapshot = self.history.undo().ok_or(EngineError::NothingToUndo)?;
        self.table.restore(&snapshot);
        log::debug!("undo: {} state(s) left", self.history.undo_depth());
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EngineError> {
        let snapshot = self.history.redo().ok_or(EngineError::NothingToRedo)?;
        self.table.restore(&snapshot);
        log::debug!("redo: {} state(s) left", self.history.redo_depth());
        Ok(())
    }

    /// True when the table differs from what was last saved or opened.
    ///
    /// A new table counts as changed once it differs from its starting state.
    pub fn is_dirty(&self) -> bool {
        let reference = self.persisted.as_ref().unwrap_or(&self.baseline);
        &self.table.snapshot() != reference
    }

    /// Remember that the current state was written to `path`
    pub fn mark_saved(&mut self, path: &Path) {
        self.persisted = Some(self.table.snapshot());
        self.current_file = Some(path.to_path_buf());
    }

    /// Swap in a workbook read from `path`. History starts over.
    pub fn open(&mut self, workbook: Workbook, path: &Path) {
        self.table.replace(workbook);
        let snapshot = self.table.snapshot();
        self.history.reset(snapshot.clone());
        self.baseline = snapshot.clone();
        self.persisted = Some(snapshot);
        self.current_file = Some(path.to_path_buf());
    }
}
