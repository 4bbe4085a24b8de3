//! HTML renderer.
//!
//! Markup uses Bulma classes. Highlights:
//!
//! - female links: `has-text-danger`
//! - selected row: `has-background-warning`
//! - active navigation entry: `has-background-grey-lighter`
//!
//! `data-cy` attributes are kept for end-to-end selectors.

use std::fmt::Write as _;

use super::{Content, EMPTY_MESSAGE, ERROR_MESSAGE, LOADING_MESSAGE, PeopleBody, Screen};
use crate::table::{Cell, HEADERS, PeopleTable, PersonLink};

/// Renders a screen as an HTML fragment (the app root element).
pub fn render_html(screen: &Screen) -> String {
    let mut out = String::new();

    out.push_str("<div data-cy=\"app\">\n");
    out.push_str(
        "<nav data-cy=\"nav\" class=\"navbar is-fixed-top has-shadow\" role=\"navigation\" \
         aria-label=\"main navigation\">\n<div class=\"container\">\n<div class=\"navbar-brand\">\n",
    );
    for item in &screen.nav {
        let class = if item.active {
            "navbar-item has-background-grey-lighter"
        } else {
            "navbar-item"
        };
        let _ = writeln!(
            out,
            "<a href=\"{}\" class=\"{class}\">{}</a>",
            escape(item.href),
            escape(item.label)
        );
    }
    out.push_str("</div>\n</div>\n</nav>\n");

    out.push_str("<main class=\"section\">\n<div class=\"container\">\n");
    match &screen.content {
        Content::Home => write_titled(&mut out, "homePage", screen.content.title()),
        Content::NotFound => write_titled(&mut out, "notFound", screen.content.title()),
        Content::People(body) => write_people(&mut out, body, screen.content.title()),
    }
    out.push_str("</div>\n</main>\n</div>\n");

    out
}

fn write_titled(out: &mut String, cy: &str, title: &str) {
    let _ = writeln!(
        out,
        "<div data-cy=\"{cy}\">\n<h1 class=\"title\">{}</h1>\n</div>",
        escape(title)
    );
}

fn write_people(out: &mut String, body: &PeopleBody, title: &str) {
    let _ = writeln!(
        out,
        "<div data-cy=\"peoplePage\">\n<h1 class=\"title\">{}</h1>\n\
         <div class=\"block\">\n<div class=\"box table-container\">",
        escape(title)
    );

    match body {
        PeopleBody::Loading => {
            let _ = writeln!(out, "<div class=\"Loader\" data-cy=\"loader\">{LOADING_MESSAGE}</div>");
        }
        PeopleBody::Error => {
            let _ = writeln!(
                out,
                "<p data-cy=\"peopleLoadingError\" class=\"has-text-danger\">{ERROR_MESSAGE}</p>"
            );
        }
        PeopleBody::Empty => {
            let _ = writeln!(out, "<p data-cy=\"noPeopleMessage\">{EMPTY_MESSAGE}</p>");
        }
        PeopleBody::Table(table) => write_table(out, table),
    }

    out.push_str("</div>\n</div>\n</div>\n");
}

fn write_table(out: &mut String, table: &PeopleTable) {
    out.push_str(
        "<table data-cy=\"peopleTable\" class=\"table is-striped is-hoverable is-narrow is-fullwidth\">\n",
    );
    out.push_str("<thead>\n<tr>");
    for header in HEADERS {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.rows {
        let class = if row.selected {
            "has-background-warning"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "<tr data-cy=\"person\" class=\"{class}\">\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            link(&row.person),
            row.sex,
            row.born,
            row.died,
            cell(&row.mother),
            cell(&row.father),
        );
    }

    out.push_str("</tbody>\n</table>\n");
}

fn link(person: &PersonLink) -> String {
    let class = if person.female {
        " class=\"has-text-danger\""
    } else {
        ""
    };
    format!(
        "<a href=\"{}\"{class}>{}</a>",
        escape(&person.href),
        escape(&person.name)
    )
}

fn cell(cell: &Cell) -> String {
    match cell {
        Cell::Link(person) => link(person),
        other => escape(other.text()),
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
