//! # CSV Serialization
//!
//! Minimal RFC-4180-style CSV emission for the breakdown reports: fields
//! containing a comma, quote, or newline are quoted and embedded quotes are
//! doubled. One header row, then one row per record.

/// Escapes a single field for CSV output.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Joins fields into one CSV row (no trailing newline).
pub fn format_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders a complete CSV document: header row plus data rows, each
/// terminated with `\n`.
pub fn to_csv(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&format_row(
        &header.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
    ));
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}
