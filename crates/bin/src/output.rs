//! Output formatting helpers for human-readable and JSON output.

use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    // Column width is the widest of the header and every cell
    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = render_line(headers.to_vec());
    for row in rows {
        out.push_str(&render_line(row.iter().take(col_count).map(String::as_str).collect()));
    }
    out
}

/// Print a value as a single line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
