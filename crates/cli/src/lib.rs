//! `tally` console editor: argument handling, command parsing, rendering
//! and the interactive shell.

pub mod command;
pub mod render;
pub mod shell;

use std::path::Path;

use tally_config::Settings;
use tally_engine::{Editor, TableModel, Workbook};
use tally_io::json;

/// Build the editor the session starts with.
///
/// `file` is opened when it exists, has the journal extension and loads
/// cleanly. Otherwise the session starts from a fresh table and the
/// returned notices say why.
pub fn initial_editor(file: Option<&Path>, settings: &Settings) -> (Editor, Vec<String>) {
    let workbook = Workbook::with_prefix(settings.initial_columns, &settings.header_prefix);
    let table = TableModel::new(workbook).with_header_prefix(settings.header_prefix.clone());
    let mut editor = Editor::new(table, settings.max_undo);
    let mut notices = Vec::new();

    let Some(path) = file else {
        return (editor, notices);
    };

    if !path.is_file() {
        notices.push(format!("warning: {} not found; starting with a new table", path.display()));
    } else if !json::is_recognized(path) {
        notices.push(format!(
            "warning: {} is not a .{} journal; starting with a new table",
            path.display(),
            tally_io::DOCUMENT_EXTENSION
        ));
    } else {
        match json::load(path) {
            Ok(workbook) => editor.open(workbook, path),
            Err(e) => notices.push(format!("error: could not open: {e}; starting with a new table")),
        }
    }

    (editor, notices)
}
