use crate::models::{Dataset, COLUMNS};
use crate::services::response_parser::{FINAL_ANSWER_MARKER, FOLLOW_UP_MARKER};

/// Inserted by the model when its answer describes a trend or comparison
pub const CHART_MARKER: &str = "[CHART]";

const COLUMN_GAP: &str = "  ";

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

/// Render the whole dataset as a right-aligned plain-text table with a header row.
pub fn render_table(dataset: &Dataset) -> String {
    let rows: Vec<[String; 12]> = dataset.rows().iter().map(|r| r.cells()).collect();

    let mut widths = COLUMNS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = render_line(COLUMNS.iter().copied(), &widths);
    for cells in &rows {
        table.push('\n');
        table.push_str(&render_line(cells.iter().map(String::as_str), &widths));
    }
    table
}

fn describe_period(dataset: &Dataset) -> String {
    match dataset.date_range() {
        Some((start, end)) => format!(
            "from {} to {} ({} daily rows)",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            dataset.len()
        ),
        None => "(no rows available)".to_string(),
    }
}

/// Build the single prompt sent to the LLM for one user question.
pub fn build_prompt(dataset: &Dataset, english_query: &str) -> String {
    format!(
        r#"You are a business intelligence assistant for non-technical small-business owners.
Below is their Google Analytics data {period}. The available columns are exactly: {columns}. Do not refer to any other column.

{table}

Answer the owner's business question using only this data.
- Reply in clear, concise plain text without technical jargon.
- If the answer describes a trend or a comparison, include "{chart}" to indicate a chart is available.
- Suggest exactly one relevant follow-up question.
- Format numbers for readability (show bounce_rate as a percentage).
- Finish with these two lines:
{final_marker} <your answer>{follow_marker} <your follow-up question>

Question: {query}"#,
        period = describe_period(dataset),
        columns = COLUMNS.join(", "),
        table = render_table(dataset),
        chart = CHART_MARKER,
        final_marker = FINAL_ANSWER_MARKER,
        follow_marker = FOLLOW_UP_MARKER,
        query = english_query.trim(),
    )
}
