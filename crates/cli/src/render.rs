//! Plain-text table rendering.
//!
//! ```text
//!      | Column 1 | Column 2
//!    1 | 10       |
//!    2 | 5        | n/a
//!  Sum | 15.00    | 0.00
//! ```

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use tally_engine::Workbook;

const MIN_WIDTH: usize = 3;
const MAX_WIDTH: usize = 24;
const SUM_LABEL: &str = "Sum";

/// Display width of a string (CJK and Cyrillic aware)
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Fit `s` into exactly `width` columns: pad with spaces, or cut and mark with "~"
pub(crate) fn fit(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w <= width {
        return format!("{}{}", s, " ".repeat(width - w));
    }

    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('~');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn column_widths(workbook: &Workbook) -> Vec<usize> {
    workbook
        .columns()
        .iter()
        .map(|c| {
            let cells = c.cells().iter().map(|s| display_width(s)).max().unwrap_or(0);
            display_width(c.header())
                .max(cells)
                .max(display_width(&c.formatted_sum()))
                .clamp(MIN_WIDTH, MAX_WIDTH)
        })
        .collect()
}

/// Render the whole table, including the sum row, one line per row
pub fn render(workbook: &Workbook) -> String {
    let widths = column_widths(workbook);
    let gutter = workbook.row_count().to_string().len().max(SUM_LABEL.len());

    let mut lines = Vec::with_capacity(workbook.row_count() + 2);

    let header: Vec<String> = workbook
        .columns()
        .iter()
        .zip(&widths)
        .map(|(c, w)| fit(c.header(), *w))
        .collect();
    lines.push(format!("{:>gutter$} | {}", "", header.join(" | ")));

    for row in 0..workbook.row_count() {
        let cells: Vec<String> = workbook
            .columns()
            .iter()
            .zip(&widths)
            .map(|(c, w)| fit(c.cell(row).unwrap_or(""), *w))
            .collect();
        lines.push(format!("{:>gutter$} | {}", row + 1, cells.join(" | ")));
    }

    let sums: Vec<String> = workbook
        .columns()
        .iter()
        .zip(&widths)
        .map(|(c, w)| fit(&c.formatted_sum(), *w))
        .collect();
    lines.push(format!("{:>gutter$} | {}", SUM_LABEL, sums.join(" | ")));

    lines
        .into_iter()
        .map(|l| l.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
