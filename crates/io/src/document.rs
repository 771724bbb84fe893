// Journal document model
//
// {
//     "data_rows": 2,
//     "columns": [
//         { "header": "Line 1", "values": ["12", "7"] }
//     ]
// }
//
// Sums are never stored; they are recomputed whenever a workbook is built.
// Unknown fields are ignored so newer files still open.

use serde::{Deserialize, Serialize};

use tally_engine::workbook::default_header;
use tally_engine::{Workbook, DEFAULT_HEADER_PREFIX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_data_rows")]
    pub data_rows: usize,
    #[serde(default)]
    pub columns: Vec<DocumentColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentColumn {
    /// Missing header falls back to "Column N"
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Largest row count a document may declare. Anything above is treated
/// as a malformed document rather than allocated.
pub const MAX_ROWS: usize = 1_000_000;

fn default_data_rows() -> usize {
    1
}

/// Convert a workbook to its persisted form
pub fn serialize(workbook: &Workbook) -> Document {
    Document {
        data_rows: workbook.row_count(),
        columns: workbook
            .columns()
            .iter()
            .map(|c| DocumentColumn {
                header: Some(c.header().to_string()),
                values: c.cells().to_vec(),
            })
            .collect(),
    }
}

/// Build a workbook from a document, reconciling uneven columns.
///
/// The row count is the larger of `data_rows` and the longest `values`
/// list, so no stored value is ever dropped. Shorter columns are padded
/// with empty cells. Fails when the resulting table would exceed
/// [`MAX_ROWS`] rows.
pub fn deserialize(document: &Document) -> Result<Workbook, String> {
    if document.data_rows > MAX_ROWS {
        return Err(format!(
            "data_rows is {} (limit {})",
            document.data_rows, MAX_ROWS
        ));
    }
    let columns: Vec<(String, Vec<String>)> = document
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let header = c
                .header
                .clone()
                .unwrap_or_else(|| default_header(DEFAULT_HEADER_PREFIX, i));
            (header, c.values.clone())
        })
        .collect();

    let longest = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    if longest > MAX_ROWS {
        return Err(format!("a column holds {} values (limit {})", longest, MAX_ROWS));
    }
    if longest > document.data_rows {
        log::warn!(
            "document declares {} row(s) but a column holds {}; growing to fit",
            document.data_rows,
            longest
        );
    }

    Ok(Workbook::reconciled(document.data_rows, columns, DEFAULT_HEADER_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_engine::{Edit, Editor, TableModel};

    fn parse(json: &str) -> Workbook {
        let doc: Document = serde_json::from_str(json).unwrap();
        deserialize(&doc).unwrap()
    }

    #[test]
    fn test_serialize_shape() {
        let mut editor = Editor::new(TableModel::new(Workbook::new(2)), 50);
        editor.apply(Edit::AddRow).unwrap();
        editor.apply(Edit::SetCell { col: 1, row: 1, value: "12".into() }).unwrap();

        let value = serde_json::to_value(serialize(editor.workbook())).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "data_rows": 2,
                "columns": [
                    { "header": "Column 1", "values": ["", ""] },
                    { "header": "Column 2", "values": ["", "12"] }
                ]
            })
        );
    }

    #[test]
    fn test_round_trip() {
        let mut editor = Editor::new(TableModel::new(Workbook::new(3)), 50);
        editor.apply(Edit::AddRow).unwrap();
        editor.apply(Edit::SetCell { col: 0, row: 0, value: "3".into() }).unwrap();
        editor.apply(Edit::SetCell { col: 2, row: 1, value: "партия 7".into() }).unwrap();
        editor.apply(Edit::SetHeader { col: 1, header: "Уголок 50".into() }).unwrap();

        let restored = deserialize(&serialize(editor.workbook())).unwrap();
        assert_eq!(&restored, editor.workbook());
        assert_eq!(restored.column(0).unwrap().formatted_sum(), "3.00");
    }

    #[test]
    fn test_load_reconciliation_grows_rows() {
        let wb = parse(r#"{
            "data_rows": 2,
            "columns": [
                { "header": "A", "values": ["1", "2"] },
                { "header": "B", "values": ["1", "2", "3", "4"] },
                { "header": "C", "values": [] }
            ]
        }"#);
        assert_eq!(wb.row_count(), 4);
        assert!(wb.is_consistent());
        assert_eq!(wb.cell(0, 3), Some(""));
        assert_eq!(wb.cell(2, 3), Some(""));
        assert_eq!(wb.column(1).unwrap().formatted_sum(), "10.00");
    }

    #[test]
    fn test_multiple_oversized_columns_use_longest() {
        let wb = parse(r#"{
            "data_rows": 1,
            "columns": [
                { "header": "A", "values": ["1", "2", "3"] },
                { "header": "B", "values": ["1", "2", "3", "4", "5"] },
                { "header": "C", "values": ["1", "2"] }
            ]
        }"#);
        assert_eq!(wb.row_count(), 5);
        assert!(wb.is_consistent());
    }

    #[test]
    fn test_short_columns_padded() {
        let wb = parse(r#"{ "data_rows": 3, "columns": [ { "header": "A", "values": ["5"] } ] }"#);
        assert_eq!(wb.row_count(), 3);
        assert_eq!(wb.column(0).unwrap().cells(), &["5".to_string(), String::new(), String::new()][..]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let wb = parse(r#"{ "columns": [ { "values": ["1"] }, { "header": "B" } ] }"#);
        assert_eq!(wb.row_count(), 1);
        assert_eq!(wb.headers(), vec!["Column 1", "B"]);
        assert_eq!(wb.cell(1, 0), Some(""));
    }

    #[test]
    fn test_empty_document_gets_one_column() {
        let wb = parse("{}");
        assert_eq!(wb.row_count(), 1);
        assert_eq!(wb.column_count(), 1);
    }

    #[test]
    fn test_zero_rows_lifted_to_one() {
        let wb = parse(r#"{ "data_rows": 0, "columns": [ { "header": "A" } ] }"#);
        assert_eq!(wb.row_count(), 1);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let wb = parse(r#"{
            "data_rows": 1,
            "version": 3,
            "columns": [ { "header": "A", "values": ["2"], "width": 80 } ]
        }"#);
        assert_eq!(wb.headers(), vec!["A"]);
    }

    #[test]
    fn test_wrong_types_rejected() {
        assert!(serde_json::from_str::<Document>(r#"{ "data_rows": "two" }"#).is_err());
        assert!(serde_json::from_str::<Document>(r#"{ "data_rows": -1 }"#).is_err());
        assert!(serde_json::from_str::<Document>(r#"{ "columns": [ { "values": [1, 2] } ] }"#).is_err());
    }

    #[test]
    fn test_oversized_row_count_rejected() {
        let doc: Document = serde_json::from_str(
            r#"{ "data_rows": 1000000000000000, "columns": [ { "header": "A" } ] }"#,
        )
        .unwrap();
        let err = deserialize(&doc).unwrap_err();
        assert!(err.contains("1000000000000000"));
    }

    #[test]
    fn test_row_limit_is_inclusive() {
        let doc = Document {
            data_rows: MAX_ROWS,
            columns: vec![DocumentColumn { header: Some("A".into()), values: Vec::new() }],
        };
        assert_eq!(deserialize(&doc).unwrap().row_count(), MAX_ROWS);

        let doc = Document { data_rows: MAX_ROWS + 1, ..doc };
        assert!(deserialize(&doc).is_err());
    }
}
