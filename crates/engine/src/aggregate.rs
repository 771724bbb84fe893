// Column sums
//
// Cells are free text. Anything that parses as a finite number counts
// toward the sum; everything else (blank, notes, "abc") is skipped.

/// Parse a cell as a number, or None if it doesn't count toward the sum
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains('_') {
        return strip_digit_separators(trimmed)?
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite());
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// "1_000" -> "1000". An underscore is only allowed between two digits.
fn strip_digit_separators(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    for (i, ch) in s.char_indices() {
        if ch != '_' {
            out.push(ch);
            continue;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(out)
}

/// Sum every numeric cell in a column
pub fn compute_sum<S: AsRef<str>>(cells: &[S]) -> f64 {
    cells
        .iter()
        .filter_map(|c| parse_number(c.as_ref()))
        .sum()
}

/// Display form of a sum: always two decimals
pub fn format_sum(sum: f64) -> String {
    let text = format!("{:.2}", sum);
    // Sums like -0.001 print as "-0.00"
    if text == "-0.00" {
        return "0.00".to_string();
    }
    text
}
