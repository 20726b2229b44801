/// Renders rows of numbers as an aligned text table.
///
/// Column widths are sized to the longest header or formatted cell, values
/// are printed with a fixed number of decimal places, and a separator line
/// follows every row.
pub fn render_table(headers: &[&str], rows: &[Vec<f64>], decimals: usize) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|v| format!("{v:.decimals$}")).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    let mut separator = String::from("+");
    for width in &widths {
        separator.push_str(&"-".repeat(width + 2));
        separator.push('+');
    }

    let format_line = |values: &[String]| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(widths.iter().copied())
            .map(|(value, width)| format!("{value:<width$}"))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format_line(&header_cells));
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
    for row in &cells {
        out.push_str(&format_line(row));
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
    }
    out
}
