// Journal files on disk (UTF-8 JSON, 4-space indent)

use std::fs;
use std::path::Path;

use serde::Serialize;
use tally_engine::Workbook;

use crate::document::{self, Document};
use crate::error::DocumentError;

/// True for paths with the journal extension (case-insensitive)
pub fn is_recognized(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(crate::DOCUMENT_EXTENSION))
        .unwrap_or(false)
}

/// Read a journal. Nothing is returned unless the whole file is valid.
pub fn load(path: &Path) -> Result<Workbook, DocumentError> {
    let contents = fs::read_to_string(path).map_err(|e| DocumentError::io(path, e))?;
    let doc: Document = serde_json::from_str(&contents).map_err(|e| DocumentError::malformed(path, e))?;
    let workbook = document::deserialize(&doc).map_err(|e| DocumentError::malformed(path, e))?;
    log::info!(
        "loaded {} ({} column(s), {} row(s))",
        path.display(),
        workbook.column_count(),
        workbook.row_count()
    );
    Ok(workbook)
}

/// Render a workbook as document text
pub fn to_string(workbook: &Workbook) -> Result<String, serde_json::Error> {
    let doc = document::serialize(workbook);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a journal. The text is fully rendered before the file is touched.
pub fn save(workbook: &Workbook, path: &Path) -> Result<(), DocumentError> {
    let text = to_string(workbook).map_err(|e| DocumentError::io(path, e))?;
    fs::write(path, text).map_err(|e| DocumentError::io(path, e))?;
    log::info!("saved {}", path.display());
    Ok(())
}
