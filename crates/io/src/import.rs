// Column headers from a directory listing
//
// Each regular file in the directory becomes one column named after the
// file. Subdirectories are skipped. Names are sorted so the column order
// doesn't depend on the filesystem.

use std::fs;
use std::path::Path;

use crate::error::DocumentError;

pub fn headers_from_directory(dir: &Path) -> Result<Vec<String>, DocumentError> {
    let entries = fs::read_dir(dir).map_err(|e| DocumentError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocumentError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| DocumentError::io(&entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    log::debug!("{} file(s) in {}", names.len(), dir.display());
    Ok(names)
}
