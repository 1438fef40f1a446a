//! Plain-text rendering of a table view.

use std::fmt::Write;

use datagrid_lib::TableView;
use datagrid_lib::column::Alignment;
use datagrid_lib::selection::ToggleAllState;
use datagrid_lib::sort::Direction;

const CHECKBOX_WIDTH: usize = 3;

fn checkbox(state: ToggleAllState) -> &'static str {
    match state {
        ToggleAllState::Unchecked => "[ ]",
        ToggleAllState::Indeterminate => "[-]",
        ToggleAllState::Checked => "[x]",
    }
}

fn pad(text: &str, width: usize, align: Alignment) -> String {
    match align {
        Alignment::Left => format!("{text:<width$}"),
        Alignment::Center => format!("{text:^width$}"),
        Alignment::Right => format!("{text:>width$}"),
    }
}

/// Render one page: title, header with sort arrows, rows, padding rows and a
/// navigation footer.
pub fn render<R>(title: &str, view: &TableView<'_, R>, padding_height: u32) -> String {
    let headers: Vec<String> = view
        .columns
        .iter()
        .zip(&view.indicators)
        .map(|(column, indicator)| match (indicator.active, indicator.direction) {
            (true, Direction::Asc) => format!("{} ^", column.header()),
            (true, Direction::Desc) => format!("{} v", column.header()),
            (false, _) => column.header().to_string(),
        })
        .collect();

    let cells: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            view.columns
                .iter()
                .map(|c| c.value(row).map(|v| v.to_text()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain([h.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();
    let line_width = CHECKBOX_WIDTH + widths.iter().map(|w| w + 3).sum::<usize>();

    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(line_width));

    let _ = write!(out, "{}", checkbox(view.toggle_all));
    for ((header, width), column) in headers.iter().zip(&widths).zip(&view.columns) {
        let _ = write!(out, " | {}", pad(header, *width, column.alignment()));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(line_width));

    for (row, selected) in cells.iter().zip(&view.selected) {
        let _ = write!(out, "{}", if *selected { "[x]" } else { "[ ]" });
        for ((cell, width), column) in row.iter().zip(&widths).zip(&view.columns) {
            let _ = write!(out, " | {}", pad(cell, *width, column.alignment()));
        }
        let _ = writeln!(out);
    }

    // Keep a short page at full height
    for _ in 0..view.padding_rows {
        let _ = writeln!(out, "{:width$}", "", width = CHECKBOX_WIDTH);
    }

    let _ = writeln!(out, "{}", "-".repeat(line_width));
    let _ = writeln!(
        out,
        "{}  {}  page {}/{}  {}",
        if view.can_go_previous { "<" } else { " " },
        view.range_label(),
        view.page_index + 1,
        view.page_count.max(1),
        if view.can_go_next { ">" } else { " " },
    );
    let _ = writeln!(
        out,
        "{} selected, {} padding rows ({}px), {} columns",
        view.selected_count,
        view.padding_rows,
        padding_height,
        view.column_span
    );
    out
}
