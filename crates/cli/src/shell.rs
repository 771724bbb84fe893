//! Interactive console presenter.
//!
//! Reads one command per line, forwards edits to the [`Editor`], prints the
//! table after every change and reports rejections as warnings. Nothing
//! here is fatal: failed loads and saves are reported and the session
//! carries on with the in-memory table untouched.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tally_config::Settings;
use tally_engine::{Edit, Editor, EngineError};
use tally_io::{import, json};

use crate::command::{self, Command, HELP};
use crate::render;

/// Whether the shell keeps reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    editor: Editor,
    settings: Settings,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(editor: Editor, settings: Settings, input: R, output: W) -> Self {
        Self { editor, settings, input, output }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line to the user
    pub fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        self.show()?;
        loop {
            let line = match self.prompt("> ")? {
                Some(line) => line,
                None => {
                    if self.editor.is_dirty() {
                        log::warn!("input closed with unsaved changes");
                        self.notify("warning: input ended; unsaved changes were not saved")?;
                    }
                    return Ok(());
                }
            };

            match command::parse(&line) {
                Ok(None) => {}
                Ok(Some(cmd)) => {
                    if self.execute(cmd)? == Flow::Exit {
                        return Ok(());
                    }
                }
                Err(e) => writeln!(self.output, "error: {e}")?,
            }
        }
    }

    pub fn execute(&mut self, cmd: Command) -> io::Result<Flow> {
        match cmd {
            Command::Edit(edit) => self.apply(edit)?,
            Command::Show => self.show()?,
            Command::Undo => match self.editor.undo() {
                Ok(()) => self.show()?,
                Err(e) => writeln!(self.output, "{e}")?,
            },
            Command::Redo => match self.editor.redo() {
                Ok(()) => self.show()?,
                Err(e) => writeln!(self.output, "{e}")?,
            },
            Command::Save => {
                self.save()?;
            }
            Command::SaveAs(path) => {
                self.save_to(&with_default_extension(path))?;
            }
            Command::Open(path) => self.open(&path)?,
            Command::Import(dir) => self.import(&dir)?,
            Command::About => self.about()?,
            Command::Help => self.notify(HELP)?,
            Command::Quit => {
                if self.confirm_discard()? {
                    return Ok(Flow::Exit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn show(&mut self) -> io::Result<()> {
        let table = render::render(self.editor.workbook());
        writeln!(self.output, "{table}")
    }

    fn apply(&mut self, edit: Edit) -> io::Result<()> {
        match self.editor.apply(edit) {
            Ok(_) => self.show(),
            Err(e) => self.report(&e),
        }
    }

    fn report(&mut self, err: &EngineError) -> io::Result<()> {
        if err.is_structural() {
            log::warn!("rejected: {err}");
            writeln!(self.output, "warning: {err}")
        } else {
            writeln!(self.output, "error: {err}")
        }
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Quick save. Asks for a path when the table was never saved.
    /// Returns true if the table was written.
    fn save(&mut self) -> io::Result<bool> {
        let path = match self.editor.current_file() {
            Some(path) => path.to_path_buf(),
            None => match self.prompt("Save as: ")? {
                Some(answer) if !answer.trim().is_empty() => {
                    with_default_extension(PathBuf::from(answer.trim()))
                }
                _ => {
                    self.notify("save cancelled")?;
                    return Ok(false);
                }
            },
        };
        self.save_to(&path)
    }

    fn save_to(&mut self, path: &Path) -> io::Result<bool> {
        match json::save(self.editor.workbook(), path) {
            Ok(()) => {
                self.editor.mark_saved(path);
                writeln!(self.output, "saved to {}", path.display())?;
                Ok(true)
            }
            Err(e) => {
                log::error!("save failed: {e}");
                writeln!(self.output, "error: could not save: {e}")?;
                Ok(false)
            }
        }
    }

    fn open(&mut self, path: &Path) -> io::Result<()> {
        if !self.confirm_discard()? {
            return Ok(());
        }
        match json::load(path) {
            Ok(workbook) => {
                self.editor.open(workbook, path);
                writeln!(self.output, "opened {}", path.display())?;
                self.show()
            }
            Err(e) => {
                log::error!("load failed: {e}");
                writeln!(self.output, "error: could not open: {e}")
            }
        }
    }

    fn import(&mut self, dir: &Path) -> io::Result<()> {
        let headers = match import::headers_from_directory(dir) {
            Ok(headers) => headers,
            Err(e) => return writeln!(self.output, "error: could not import: {e}"),
        };
        if headers.is_empty() {
            return writeln!(self.output, "no files in {}", dir.display());
        }
        self.apply(Edit::AddColumns { headers })
    }

    /// Ask what to do with unsaved changes. Returns true if it's fine to
    /// drop the current table (saved, discarded, or nothing to lose).
    fn confirm_discard(&mut self) -> io::Result<bool> {
        if !self.editor.is_dirty() || !self.settings.confirm_on_close {
            return Ok(true);
        }
        loop {
            let answer = match self.prompt("Unsaved changes. Save first? [y]es / [n]o / [c]ancel: ")? {
                Some(answer) => answer.trim().to_ascii_lowercase(),
                None => return Ok(false),
            };
            match answer.as_str() {
                "y" | "yes" => return self.save(),
                "n" | "no" => return Ok(true),
                "c" | "cancel" | "" => return Ok(false),
                _ => {}
            }
        }
    }

    fn about(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "tally {} ({}, {})\nProduction-count journal for line output.\nSettings: {}",
            env!("CARGO_PKG_VERSION"),
            env!("TALLY_COMMIT"),
            env!("TALLY_TARGET"),
            Settings::config_path_display()
        )
    }

    /// Print `text` and read one line. None at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// "day" -> "day.json"; paths with any extension are left alone
fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(tally_io::DOCUMENT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tally_engine::{TableModel, Workbook};
    use tempfile::tempdir;

    fn shell(input: &str) -> Shell<Cursor<Vec<u8>>, Vec<u8>> {
        let editor = Editor::new(TableModel::new(Workbook::new(3)), 50);
        Shell::new(editor, Settings::default(), Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(shell: Shell<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn edits_update_sums() {
        let mut sh = shell("add-row\nadd-row\nset 1 2 10\nset 1 3 5\nquit\nn\n");
        sh.run().unwrap();
        assert_eq!(sh.editor().table().formatted_sum(0).unwrap(), "15.00");
        let out = output(sh);
        assert!(out.contains("Sum | 15.00"));
    }

    #[test]
    fn rejection_is_a_warning() {
        let mut sh = shell("del-row 1\nquit\n");
        sh.run().unwrap();
        let out = output(sh);
        assert!(out.contains("warning: cannot delete the last row"));
    }

    #[test]
    fn nothing_to_undo() {
        let mut sh = shell("undo\n");
        sh.run().unwrap();
        assert!(output(sh).contains("nothing to undo"));
    }

    #[test]
    fn quit_cancel_keeps_running() {
        let mut sh = shell("set 1 1 4\nquit\nc\nshow\nquit\nn\n");
        sh.run().unwrap();
        let out = output(sh);
        assert_eq!(out.matches("Unsaved changes").count(), 2);
    }

    #[test]
    fn quit_save_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shift");
        let script = format!("set 2 1 7\nquit\ny\n{}\n", path.display());
        let mut sh = shell(&script);
        sh.run().unwrap();

        let saved = dir.path().join("shift.json");
        let loaded = json::load(&saved).unwrap();
        assert_eq!(loaded.cell(1, 0), Some("7"));
        assert!(!sh.editor().is_dirty());
    }

    #[test]
    fn failed_save_aborts_quit() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("missing/dir/out.json");
        let script = format!("set 1 1 1\nquit\ny\n{}\nquit\nn\n", bad.display());
        let mut sh = shell(&script);
        sh.run().unwrap();
        let out = output(sh);
        assert!(out.contains("error: could not save"));
        assert_eq!(out.matches("Unsaved changes").count(), 2);
    }

    #[test]
    fn open_bad_file_keeps_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let script = format!("add-col Extra\nsave-as {}\nopen {}\n", dir.path().join("ok.json").display(), path.display());
        let mut sh = shell(&script);
        sh.run().unwrap();
        assert_eq!(sh.editor().table().column_count(), 4);
        assert!(output(sh).contains("error: could not open"));
    }

    #[test]
    fn open_oversized_document_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.json");
        fs::write(&path, r#"{ "data_rows": 1000000000000000, "columns": [ { "header": "A" } ] }"#).unwrap();

        let mut sh = shell(&format!("open {}\n", path.display()));
        sh.run().unwrap();
        assert_eq!(sh.editor().table().column_count(), 3);
        assert_eq!(sh.editor().table().row_count(), 1);
        assert!(output(sh).contains("not a valid journal document"));
    }

    #[test]
    fn import_adds_columns_in_one_step() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();

        let script = format!("import {}\n", dir.path().display());
        let mut sh = shell(&script);
        sh.run().unwrap();
        let headers = sh.editor().workbook().headers();
        assert_eq!(headers[3..], ["a.txt", "b.txt"]);
        assert_eq!(sh.editor().history().undo_depth(), 2);
    }

    #[test]
    fn about_shows_version() {
        let mut sh = shell("about\n");
        sh.run().unwrap();
        let out = output(sh);
        assert!(out.contains(&format!("tally {}", env!("CARGO_PKG_VERSION"))));
        assert!(out.contains("settings.json"));
    }

    #[test]
    fn default_extension() {
        assert_eq!(with_default_extension(PathBuf::from("day")), PathBuf::from("day.json"));
        assert_eq!(with_default_extension(PathBuf::from("day.txt")), PathBuf::from("day.txt"));
    }
}
