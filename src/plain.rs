use crate::client::{AnalysisClient, ClientResult};
use crate::domain::{ChangePoint, CHANGE_POINT_HEADER};

/// Fetches the change points once and renders them with [`format_table`].
/// The plot and price history are not requested.
pub async fn fetch_table(client: &dyn AnalysisClient) -> ClientResult<String> {
    let points = client.change_points().await?;
    Ok(format_table(&points))
}

/// Formats change points as an aligned plain-text table, one row per record
/// in the order given.
pub fn format_table(points: &[ChangePoint]) -> String {
    let rows: Vec<[&str; 3]> = points.iter().map(|p| p.cells()).collect();

    let mut widths = CHANGE_POINT_HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &CHANGE_POINT_HEADER, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str; 3], widths: &[usize; 3]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
