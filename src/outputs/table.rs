//! Grid-bordered text table of article records.
//!
//! ```text
//! +----------+---------------------+--------------+
//! | title    | url                 |   word_count | ...
//! +==========+=====================+==============+
//! | Headline | https://example.com |          512 | ...
//! +----------+---------------------+--------------+
//! ```
//!
//! Counts are right-aligned, text is left-aligned, every column is at least
//! two characters wider than its header, and cells containing line breaks
//! span several text lines.

use std::io::{self, Write};

use tracing::instrument;
use unicode_width::UnicodeWidthStr;

use crate::models::ArticleRecord;

/// Column headers, in display order.
pub const HEADERS: [&str; 7] = [
    "title",
    "url",
    "word_count",
    "paragraph_count",
    "image_count",
    "common_word",
    "tags",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Extra width every column reserves beyond its header.
const HEADER_PADDING: usize = 2;

const ALIGNMENT: [Align; 7] = [
    Align::Left,
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Left,
    Align::Left,
];

fn cells(record: &ArticleRecord) -> [String; 7] {
    [
        record.title.clone(),
        record.url.clone(),
        record.word_count.to_string(),
        record.paragraph_count.to_string(),
        record.image_count.to_string(),
        record.common_word.clone(),
        record.tags.clone(),
    ]
}

fn cell_lines(cell: &str) -> Vec<&str> {
    let lines: Vec<&str> = cell.lines().collect();
    if lines.is_empty() { vec![""] } else { lines }
}

fn rule(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn row(cells: &[&str], widths: &[usize]) -> String {
    let split: Vec<Vec<&str>> = cells.iter().map(|c| cell_lines(c)).collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(1);

    let mut out = String::new();
    for line_idx in 0..height {
        out.push('|');
        for (col, lines) in split.iter().enumerate() {
            let text = lines.get(line_idx).copied().unwrap_or("");
            let pad = widths[col].saturating_sub(text.width());
            out.push(' ');
            match ALIGNMENT[col] {
                Align::Left => {
                    out.push_str(text);
                    out.push_str(&" ".repeat(pad));
                }
                Align::Right => {
                    out.push_str(&" ".repeat(pad));
                    out.push_str(text);
                }
            }
            out.push_str(" |");
        }
        out.push('\n');
    }
    out
}

/// Render `records` as a grid table, one row per record.
pub fn render_grid(records: &[ArticleRecord]) -> String {
    let rows: Vec<[String; 7]> = records.iter().map(cells).collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.width() + HEADER_PADDING).collect();
    for cells in &rows {
        for (col, cell) in cells.iter().enumerate() {
            let widest = cell_lines(cell).iter().map(|l| l.width()).max().unwrap_or(0);
            widths[col] = widths[col].max(widest);
        }
    }

    let mut out = rule(&widths, '-');
    out.push_str(&row(&HEADERS, &widths));
    out.push_str(&rule(&widths, '='));
    for cells in &rows {
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        out.push_str(&row(&refs, &widths));
        out.push_str(&rule(&widths, '-'));
    }
    out
}

/// Write the grid table for `records` to standard output.
#[instrument(level = "debug", skip_all, fields(rows = records.len()))]
pub fn print_table(records: &[ArticleRecord]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(render_grid(records).as_bytes())?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, words: usize) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            url: "https://e.x/a".to_string(),
            word_count: words,
            paragraph_count: 2,
            image_count: 0,
            common_word: "sea".to_string(),
            tags: "Travel, Greece".to_string(),
        }
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let out = render_grid(&[]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "| title   | url   |   word_count |   paragraph_count |   image_count | common_word   | tags   |"
        );
        assert!(lines[2].starts_with("+=========+=======+"));
    }

    #[test]
    fn test_grid_layout_and_alignment() {
        let out = render_grid(&[record("Mykonos", 512), record("Cape Cod", 7)]);
        let expected = "\
+----------+---------------+--------------+-------------------+---------------+---------------+----------------+
| title    | url           |   word_count |   paragraph_count |   image_count | common_word   | tags           |
+==========+===============+==============+===================+===============+===============+================+
| Mykonos  | https://e.x/a |          512 |                 2 |             0 | sea           | Travel, Greece |
+----------+---------------+--------------+-------------------+---------------+---------------+----------------+
| Cape Cod | https://e.x/a |            7 |                 2 |             0 | sea           | Travel, Greece |
+----------+---------------+--------------+-------------------+---------------+---------------+----------------+
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_multiline_cell_spans_lines() {
        let out = render_grid(&[record("Line one\nTwo", 1)]);
        let lines: Vec<&str> = out.lines().collect();
        // top rule, header, header rule, two content lines, bottom rule
        assert_eq!(lines.len(), 6);
        assert!(lines[3].starts_with("| Line one |"));
        assert!(lines[4].starts_with("| Two      |"));
        assert!(lines[4].contains("|              |"));
    }

    #[test]
    fn test_wide_characters_use_display_width() {
        let out = render_grid(&[record("迪拜", 1)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].width(), lines[3].width());
    }
}
