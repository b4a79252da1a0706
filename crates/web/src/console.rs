//! Plain-text rendering for the console front-end.

use std::fmt::Write;

use purplepaw_table::{TableBody, TableView};

use crate::layout::Layout;

fn pad(out: &mut String, text: &str, width: usize) {
    out.push_str(text);
    let len = text.chars().count();
    for _ in len..width {
        out.push(' ');
    }
}

/// Render a table view as aligned text.
///
/// Sortable headers carry a `^`. The footer shows the summary, page label,
/// and the page buttons with the current one in brackets.
pub fn render_table(view: &TableView) -> String {
    let mut out = String::new();

    if !view.filters.is_empty() {
        let filters: Vec<_> = view.filters.iter().map(|f| format!("[{}]", f.placeholder)).collect();
        let _ = writeln!(out, "{}", filters.join(" "));
    }

    let headers: Vec<String> = view
        .headers
        .iter()
        .map(|h| {
            if h.sortable {
                format!("{}^", h.label)
            } else {
                h.label.clone()
            }
        })
        .collect();

    let rows: Vec<Vec<String>> = match &view.body {
        TableBody::Rows { rows } => rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
        _ => Vec::new(),
    };

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |out: &mut String, cells: &[String]| {
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            pad(out, cells.get(i).map(String::as_str).unwrap_or(""), *width);
        }
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    };

    line(&mut out, &headers);
    let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 3;
    out.push_str(&"-".repeat(total));
    out.push('\n');

    match view.body.placeholder() {
        Some(text) => {
            let _ = writeln!(out, "{text}");
        }
        None => {
            for row in &rows {
                line(&mut out, row);
            }
        }
    }

    let p = &view.pagination;
    let pages: Vec<String> = p
        .pages
        .iter()
        .map(|b| if b.current { format!("[{}]", b.label) } else { b.label.clone() })
        .collect();
    let _ = writeln!(
        out,
        "{}  {}  {} {} {}",
        p.summary,
        p.page_label,
        if p.previous.disabled { "-" } else { "<" },
        pages.join(" "),
        if p.next.disabled { "-" } else { ">" },
    );

    out
}

pub fn render_layout(layout: &Layout) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} | {} ({})",
        layout.brand,
        layout.top_bar.email,
        layout.top_bar.role.as_deref().unwrap_or("no role")
    );
    for item in &layout.sidebar {
        let marker = if item.active { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:<24} {}", item.label, item.path);
    }
    out
}

#[cfg(test)]
mod tests {
    use purplepaw_table::{Column, DataTable, Pagination};
    use serde_json::json;

    use super::*;

    fn columns() -> Vec<Column<serde_json::Value>> {
        vec![
            Column::plain("name", "Name").sortable(),
            Column::plain("email", "Email"),
        ]
    }

    #[test]
    fn renders_rows_and_footer() {
        let rows = vec![json!({"name": "A", "email": "a@purplepaw.test"})];
        let pagination = Pagination {
            page_number: 0,
            page_size: 10,
            total_elements: 1,
            total_pages: 1,
        };
        let text = render_table(&DataTable::render(&columns(), &rows, &pagination, false));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Name^ | Email");
        assert_eq!(lines[2], "A     | a@purplepaw.test");
        assert_eq!(lines[3], "1–1 of 1  Page 1 of 1  - [1] -");
    }

    #[test]
    fn renders_placeholder_rows() {
        let pagination = Pagination::default();
        let loading = render_table(&DataTable::render(&columns(), &[], &pagination, true));
        assert!(loading.contains("Loading..."));

        let empty = render_table(&DataTable::render(&columns(), &[], &pagination, false));
        assert!(empty.contains("No data available"));
        assert!(empty.contains("0–0 of 0"));
    }
}
