//! Console command grammar.
//!
//! One command per line. Column and row numbers are 1-based, as shown in
//! the rendered table; they are converted to 0-based positions here.

use std::fmt;
use std::path::PathBuf;

use tally_engine::Edit;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Edit(Edit),
    Show,
    Undo,
    Redo,
    /// Quick save to the current file (asks for a path if there is none)
    Save,
    SaveAs(PathBuf),
    Open(PathBuf),
    /// One new column per file in a directory
    Import(PathBuf),
    About,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

pub const HELP: &str = "\
Commands (columns and rows are numbered from 1):
  show                  print the table
  add-col [HEADER]      append a column
  del-col COL           delete a column
  add-row               append a row
  del-row ROW           delete a row
  set COL ROW [VALUE]   set a cell (no value clears it)
  header COL TEXT       rename a column
  undo / redo           step through history
  save                  save to the current file
  save-as PATH          save to a new file
  open PATH             open a journal
  import DIR            add one column per file in DIR
  about                 program information
  quit                  leave (asks about unsaved changes)";

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = split_word(line);
    let command = match word.to_ascii_lowercase().as_str() {
        "show" | "ls" => Command::Show,
        "add-col" | "addcol" => Command::Edit(Edit::AddColumn {
            header: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "del-col" | "delcol" => Command::Edit(Edit::DeleteColumn {
            index: position(rest, "column", "del-col COL")?,
        }),
        "add-row" | "addrow" => Command::Edit(Edit::AddRow),
        "del-row" | "delrow" => Command::Edit(Edit::DeleteRow {
            index: position(rest, "row", "del-row ROW")?,
        }),
        "set" => {
            let (col, rest) = split_word(rest);
            let (row, value) = split_word(rest);
            Command::Edit(Edit::SetCell {
                col: position(col, "column", "set COL ROW [VALUE]")?,
                row: position(row, "row", "set COL ROW [VALUE]")?,
                value: value.to_string(),
            })
        }
        "header" => {
            let (col, text) = split_word(rest);
            Command::Edit(Edit::SetHeader {
                col: position(col, "column", "header COL TEXT")?,
                header: text.to_string(),
            })
        }
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "save" => Command::Save,
        "save-as" | "saveas" => Command::SaveAs(path(rest, "save-as PATH")?),
        "open" | "load" => Command::Open(path(rest, "open PATH")?),
        "import" => Command::Import(path(rest, "import DIR")?),
        "about" => Command::About,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError(format!("unknown command '{other}' (type 'help')"))),
    };
    Ok(Some(command))
}

/// Split off the first whitespace-delimited word; the remainder is trimmed
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

/// 1-based number from the console to a 0-based position
fn position(arg: &str, what: &str, usage: &str) -> Result<usize, ParseError> {
    if arg.is_empty() {
        return Err(ParseError(format!("usage: {usage}")));
    }
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError(format!("invalid {what} number '{arg}' (numbers start at 1)"))),
    }
}

fn path(arg: &str, usage: &str) -> Result<PathBuf, ParseError> {
    if arg.is_empty() {
        return Err(ParseError(format!("usage: {usage}")));
    }
    Ok(PathBuf::from(arg))
}
