//! HTML page rendering
//!
//! Pages are static templates compiled into the binary with `{{ messages }}`
//! and `{{ rows }}` slots. Every interpolated value is escaped.

use std::fmt::Write as _;

use crate::flash::Flash;
use crate::records::Record;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const VIEW_DATA_TEMPLATE: &str = include_str!("../../templates/view_data.html");

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_messages(flashes: &[Flash]) -> String {
    let mut out = String::new();
    for flash in flashes {
        let _ = write!(
            out,
            r#"<div class="alert alert-{}" role="alert">{}</div>"#,
            flash.level.as_str(),
            escape_html(&flash.message)
        );
    }
    out
}

fn render_rows(records: &[Record]) -> String {
    if records.is_empty() {
        return r#"                <tr><td class="empty" colspan="4">No records yet</td></tr>"#.to_string();
    }

    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "                <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.id,
            escape_html(&record.field1),
            escape_html(&record.field2),
            escape_html(&record.field3)
        );
    }
    out
}

/// Submission form page.
pub fn index_page(flashes: &[Flash]) -> String {
    INDEX_TEMPLATE.replace("{{ messages }}", &render_messages(flashes))
}

/// Record listing page.
pub fn view_data_page(records: &[Record], flashes: &[Flash]) -> String {
    // Rows first, so slot markers inside message text are never expanded
    VIEW_DATA_TEMPLATE
        .replace("{{ rows }}", &render_rows(records))
        .replace("{{ messages }}", &render_messages(flashes))
}
