//! Text rendering of the artworks table and the checkbox gestures on it.

use artic_lib::api::Page;
use artic_lib::error::SelectionError;
use artic_lib::model::ArtworkRecord;
use artic_lib::selection::SelectionSet;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

struct Column {
    header: &'static str,
    width: usize,
    value: fn(&ArtworkRecord) -> Option<&str>,
}

fn title(record: &ArtworkRecord) -> Option<&str> {
    record.title.as_deref()
}

fn place_of_origin(record: &ArtworkRecord) -> Option<&str> {
    record.place_of_origin.as_deref()
}

fn artist_display(record: &ArtworkRecord) -> Option<&str> {
    record.artist_display.as_deref()
}

fn inscriptions(record: &ArtworkRecord) -> Option<&str> {
    record.inscriptions.as_deref()
}

const COLUMNS: [Column; 4] = [
    Column {
        header: "Title",
        width: 30,
        value: title,
    },
    Column {
        header: "Place Of Origin",
        width: 16,
        value: place_of_origin,
    },
    Column {
        header: "Artist Display",
        width: 30,
        value: artist_display,
    },
    Column {
        header: "Inscriptions",
        width: 24,
        value: inscriptions,
    },
];

const GAP: &str = "  ";

/// A rendered page, unstyled.
#[derive(Debug)]
pub struct RenderedTable {
    pub header: String,
    pub rule: String,
    /// Each row and whether it is visibly selected.
    pub rows: Vec<(bool, String)>,
    pub footer: String,
}

/// Renders `page` with checkboxes for the records in `visible`.
pub fn render(page: &Page, visible: &[ArtworkRecord], total_selected: usize) -> RenderedTable {
    let mut header = format!("{:<3}{GAP}{:>3}", "", "#");
    for column in &COLUMNS {
        header.push_str(GAP);
        header.push_str(&pad_to_width(column.header, column.width));
    }
    let header = header.trim_end().to_string();
    let rule = "─".repeat(display_width(&header));

    let rows = page
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let checked = visible.iter().any(|r| r.id == record.id);
            let mut line = format!("{}{GAP}{:>3}", if checked { "[x]" } else { "[ ]" }, i + 1);
            for column in &COLUMNS {
                let text = cell_text((column.value)(record));
                line.push_str(GAP);
                line.push_str(&pad_to_width(&truncate_to_width(&text, column.width), column.width));
            }
            (checked, line.trim_end().to_string())
        })
        .collect();

    let footer = format!(
        "Page {} of {} ({} records) · {} selected here · {} selected in total",
        page.index(),
        page.page_count().max(1),
        page.total(),
        visible.len(),
        total_selected
    );

    RenderedTable {
        header,
        rule,
        rows,
        footer,
    }
}

/// Lists every selected record, ordered by id.
pub fn selection_lines(selection: &SelectionSet) -> Vec<String> {
    selection
        .iter()
        .map(|record| {
            let title = cell_text(record.title.as_deref());
            match record.date_range() {
                Some(dates) => format!("{:>8}  {} ({})", record.id, title, dates),
                None => format!("{:>8}  {}", record.id, title),
            }
        })
        .collect()
}

/// Chosen list after flipping the checkboxes on `rows`.
pub fn toggled(
    page: &Page,
    visible: &[ArtworkRecord],
    rows: &[usize],
) -> Result<Vec<ArtworkRecord>, SelectionError> {
    let mut chosen = visible.to_vec();
    for record in records_at(page, rows)? {
        match chosen.iter().position(|r| r.id == record.id) {
            Some(index) => {
                chosen.remove(index);
            }
            None => chosen.push(record),
        }
    }
    Ok(chosen)
}

/// Records at the given 1-based rows; fails on the first row off the page.
pub fn records_at(page: &Page, rows: &[usize]) -> Result<Vec<ArtworkRecord>, SelectionError> {
    rows.iter()
        .map(|&row| {
            page.row(row).cloned().ok_or(SelectionError::InvalidRow {
                row,
                rows: page.len(),
            })
        })
        .collect()
}

/// Collapses whitespace (artist strings carry newlines) into single spaces.
fn cell_text(value: Option<&str>) -> String {
    value
        .map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn display_width(s: &str) -> usize {
    s.width()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(padding))
}
