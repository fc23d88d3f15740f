//! Markdown table and list helpers.

/// Render a pipe table. Separator dashes are sized to each header.
pub fn markdown_table<H, R>(headers: &[H], rows: impl IntoIterator<Item = R>) -> String
where
    H: AsRef<str>,
    R: IntoIterator,
    R::Item: AsRef<str>,
{
    let mut lines = Vec::new();
    lines.push(table_row(headers.iter().map(|h| h.as_ref().to_string())));
    lines.push(format!(
        "|{}|",
        headers
            .iter()
            .map(|h| "-".repeat(h.as_ref().chars().count().max(3) + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    lines.extend(
        rows.into_iter()
            .map(|row| table_row(row.into_iter().map(|cell| escape_cell(cell.as_ref())))),
    );
    lines.join("\n")
}

fn table_row(cells: impl Iterator<Item = String>) -> String {
    format!("| {} |", cells.collect::<Vec<_>>().join(" | "))
}

/// Keep free text on one table line.
pub fn escape_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `- **Name**: detail`
pub fn bullet(name: &str, detail: &str) -> String {
    format!("- **{name}**: {detail}")
}
