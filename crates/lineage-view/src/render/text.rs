//! Plain-text renderer for terminals.

use std::fmt::Write as _;

use super::{Content, EMPTY_MESSAGE, ERROR_MESSAGE, LOADING_MESSAGE, PeopleBody, Screen};
use crate::table::{Cell, HEADERS, PeopleTable, PersonRow};

const RED: &str = "\x1b[31m";
const HIGHLIGHT: &str = "\x1b[30;43m";
const RESET: &str = "\x1b[0m";

/// Options for [`render_text`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Use ANSI colors: female names in red, selected row highlighted.
    pub color: bool,
}

/// Renders a screen as plain text.
///
/// The active navigation entry is bracketed. In the table, the selected row
/// is prefixed with `>`.
pub fn render_text(screen: &Screen, options: TextOptions) -> String {
    let mut out = String::new();

    let nav: Vec<String> = screen
        .nav
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label)
            } else {
                format!(" {} ", item.label)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", nav.join(" ").trim_end());
    out.push('\n');
    let _ = writeln!(out, "{}", screen.content.title());

    match &screen.content {
        Content::Home | Content::NotFound => {}
        Content::People(body) => {
            out.push('\n');
            match body {
                PeopleBody::Loading => {
                    let _ = writeln!(out, "{LOADING_MESSAGE}");
                }
                PeopleBody::Error => {
                    let _ = writeln!(out, "{ERROR_MESSAGE}");
                }
                PeopleBody::Empty => {
                    let _ = writeln!(out, "{EMPTY_MESSAGE}");
                }
                PeopleBody::Table(table) => write_table(&mut out, table, options),
            }
        }
    }

    out
}

fn write_table(out: &mut String, table: &PeopleTable, options: TextOptions) {
    let texts: Vec<[String; 6]> = table.rows.iter().map(PersonRow::texts).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &texts {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, w))
        .collect();
    let _ = writeln!(out, "  {}", header.join("  ").trim_end());

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "  {}", rule.join("  "));

    for (row, cells) in table.rows.iter().zip(&texts) {
        let female = [
            row.person.female,
            false,
            false,
            false,
            is_female_link(&row.mother),
            is_female_link(&row.father),
        ];

        let rendered: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(female)
            .map(|((text, width), female)| {
                let padded = pad(text, width);
                if options.color && female {
                    let trailing = padded.len() - text.len();
                    format!("{RED}{text}{RESET}{}", " ".repeat(trailing))
                } else {
                    padded
                }
            })
            .collect();

        let line = rendered.join("  ");
        let line = line.trim_end();
        match (row.selected, options.color) {
            (true, true) => {
                let _ = writeln!(out, "> {HIGHLIGHT}{line}{RESET}");
            }
            (true, false) => {
                let _ = writeln!(out, "> {line}");
            }
            (false, _) => {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
}

fn is_female_link(cell: &Cell) -> bool {
    matches!(cell, Cell::Link(link) if link.female)
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}
