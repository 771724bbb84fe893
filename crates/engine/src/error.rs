use std::fmt;

use crate::workbook::ColumnId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Deleting the only remaining column.
    LastColumn,
    /// Deleting the only remaining row.
    LastRow,
    /// Column position past the end of the table.
    ColumnOutOfRange { index: usize, count: usize },
    /// Row position past the end of the table.
    RowOutOfRange { index: usize, count: usize },
    /// Column id that no longer exists (deleted, or from another workbook).
    UnknownColumn(ColumnId),
    /// Undo requested with no earlier state.
    NothingToUndo,
    /// Redo requested with an empty redo stack.
    NothingToRedo,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastColumn => write!(f, "cannot delete the last column"),
            Self::LastRow => write!(f, "cannot delete the last row"),
            Self::ColumnOutOfRange { index, count } => {
                write!(f, "column {} does not exist (table has {count})", index + 1)
            }
            Self::RowOutOfRange { index, count } => {
                write!(f, "row {} does not exist (table has {count})", index + 1)
            }
            Self::UnknownColumn(id) => write!(f, "unknown column id {}", id.0),
            Self::NothingToUndo => write!(f, "nothing to undo"),
            Self::NothingToRedo => write!(f, "nothing to redo"),
        }
    }
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// True for rejections caused by the table's structural invariants
    /// (as opposed to bad coordinates or empty history).
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::LastColumn | Self::LastRow)
    }
}
