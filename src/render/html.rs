//! HTML table with absolutely positioned bar overlays.
//!
//! Each barred `<td>` gets its content wrapped in a relatively positioned
//! `<div>` (so the overlay is contained by the cell, whatever the table
//! layout does) and a `<span>` prepended inside it:
//!
//! ```html
//! <td><div style="position: relative; min-height: 1.5em;">
//!   <span style="position: absolute; top: 0; left: 33.3333%; …"></span>10
//! </div></td>
//! ```

use std::fmt::Write;

use crate::{
    core::{config::StyleOverrides, data::Table, geometry::BarSpec},
    render::{OverlayGrid, OverlayRenderer, percent},
};

/// Wrapper style; `min-height` keeps empty-looking cells from collapsing.
const WRAPPER_STYLE: &str = "position: relative; min-height: 1.5em;";

pub struct HtmlRenderer {
    bars: OverlayGrid,
    css: StyleOverrides,
}

impl HtmlRenderer {
    /// `css` is merged over each overlay's base style.
    #[must_use]
    pub fn new(css: StyleOverrides) -> Self {
        Self {
            bars: OverlayGrid::default(),
            css,
        }
    }

    fn bar_style(&self, bar: &BarSpec) -> String {
        let base: StyleOverrides = [
            ("position", "absolute".to_owned()),
            ("top", "0".to_owned()),
            ("left", percent(bar.left_fraction)),
            ("right", "0".to_owned()),
            ("z-index", "0".to_owned()),
            ("display", "block".to_owned()),
            ("height", "100%".to_owned()),
            ("width", percent(bar.width_fraction)),
            ("background-color", bar.color.to_string()),
        ]
        .into_iter()
        .collect();
        self.css.merged_over(&base).to_css()
    }

    /// Emit the whole table; cells without a bar are written verbatim.
    #[must_use]
    pub fn render(&self, table: &Table) -> String {
        let mut out = String::from("<table class=\"databar\">\n");

        if let Some(header) = &table.header {
            out.push_str("  <thead>\n    <tr>");
            for h in header {
                let _ = write!(out, "<th>{}</th>", escape(h));
            }
            out.push_str("</tr>\n  </thead>\n");
        }

        out.push_str("  <tbody>\n");
        for (r, row) in table.rows().iter().enumerate() {
            out.push_str("    <tr>");
            for (c, cell) in row.iter().enumerate() {
                out.push_str(if cell.ignore {
                    "<td class=\"databar-ignore\">"
                } else {
                    "<td>"
                });
                let text = escape(&cell.text);
                match self.bars.get(r, c) {
                    Some(bar) => {
                        let _ = write!(
                            out,
                            "<div style=\"{WRAPPER_STYLE}\"><span style=\"{}\"></span>{text}</div>",
                            self.bar_style(bar)
                        );
                    }
                    None => out.push_str(&text),
                }
                out.push_str("</td>");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("  </tbody>\n</table>\n");
        out
    }
}

impl OverlayRenderer for HtmlRenderer {
    fn overlay(&mut self, row: usize, column: usize, bar: BarSpec) {
        self.bars.overlay(row, column, bar);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
