//! Plain-text rendering of a [`ListingView`].

use crate::projection::ListingView;

const COLUMN_GAP: &str = "  ";

fn pad_line(cells: &[&str], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let padding = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(padding));
    }
    line.truncate(line.trim_end().len());
    line
}

/// Renders the header, a rule and one line per row, each column padded to its widest cell.
pub fn render_listing_text(view: &ListingView) -> String {
    let mut widths: Vec<usize> = view
        .header
        .iter()
        .map(|cell| cell.caption.chars().count())
        .collect();
    for row in &view.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.text.chars().count());
        }
    }

    let mut out = String::new();
    let captions: Vec<&str> = view.header.iter().map(|cell| cell.caption).collect();
    out.push_str(&pad_line(&captions, &widths));
    out.push('\n');

    let rules: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let rules: Vec<&str> = rules.iter().map(String::as_str).collect();
    out.push_str(&pad_line(&rules, &widths));
    out.push('\n');

    for row in &view.rows {
        let texts: Vec<&str> = row.cells.iter().map(|cell| cell.text.as_str()).collect();
        out.push_str(&pad_line(&texts, &widths));
        out.push('\n');
    }
    out
}
