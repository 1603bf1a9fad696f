//! Plain-text table with bars painted as true-colour cell backgrounds.
//!
//! Every cell is a fixed-width run of characters; the bar covers the run
//! between `left_fraction` and `left_fraction + width_fraction` of it.

use terminal_size::{Width, terminal_size};

use crate::{
    core::{
        color::{AnsiCode, colorize},
        constants::{FALLBACK_TERMINAL_WIDTH, MIN_CELL_WIDTH},
        data::Table,
        geometry::BarSpec,
    },
    render::{OverlayGrid, OverlayRenderer},
};

// Box-drawing glyphs
const H: &str = "─";
const V: &str = "│";
const CROSS: &str = "┼";

/// Bars are composited over a dark terminal background.
const BACKDROP: (u8, u8, u8) = (0, 0, 0);

/// Current terminal width in columns (80 fallback).
#[inline]
#[must_use]
pub fn terminal_width() -> usize {
    terminal_size().map_or(FALLBACK_TERMINAL_WIDTH, |(Width(w), _)| usize::from(w))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// CSS `text-align` value; anything unrecognised aligns right.
    #[must_use]
    pub fn from_css(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("left" | "start") => Self::Left,
            Some("center") => Self::Center,
            _ => Self::Right,
        }
    }
}

pub struct TerminalRenderer {
    bars: OverlayGrid,
    width: usize,
    align: Align,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(width: usize, align: Align) -> Self {
        Self {
            bars: OverlayGrid::default(),
            width,
            align,
        }
    }

    /// Natural width per column, capped so the row fits `self.width`.
    fn column_widths(&self, table: &Table) -> Vec<usize> {
        let header = table.header.as_deref().unwrap_or(&[]);
        let columns = table
            .rows()
            .iter()
            .map(Vec::len)
            .chain([header.len()])
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return Vec::new();
        }
        let budget = (self.width.saturating_sub(columns - 1) / columns).max(MIN_CELL_WIDTH);

        (0..columns)
            .map(|c| {
                let natural = table
                    .rows()
                    .iter()
                    .filter_map(|row| row.get(c))
                    .map(|cell| cell.text.chars().count())
                    .chain(header.get(c).map(|h| h.chars().count()))
                    .max()
                    .unwrap_or(0)
                    + 2;
                natural.clamp(MIN_CELL_WIDTH, budget)
            })
            .collect()
    }

    #[must_use]
    pub fn render(&self, table: &Table) -> String {
        let widths = self.column_widths(table);
        let mut out = String::new();

        if let Some(header) = &table.header {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(c, &w)| fit(header.get(c).map_or("", String::as_str), w, self.align))
                .collect();
            out.push_str(&cells.join(V));
            out.push('\n');
            let rule: Vec<String> = widths.iter().map(|&w| H.repeat(w)).collect();
            out.push_str(&rule.join(CROSS));
            out.push('\n');
        }

        for (r, row) in table.rows().iter().enumerate() {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(c, &w)| {
                    let text = fit(row.get(c).map_or("", |cell| cell.text.as_str()), w, self.align);
                    match self.bars.get(r, c) {
                        Some(bar) => paint(&text, bar),
                        None => text,
                    }
                })
                .collect();
            out.push_str(&cells.join(V));
            out.push('\n');
        }
        out
    }
}

impl OverlayRenderer for TerminalRenderer {
    fn overlay(&mut self, row: usize, column: usize, bar: BarSpec) {
        self.bars.overlay(row, column, bar);
    }
}

/// Character range `[start, end)` of a `width`-wide cell the bar covers.
#[must_use]
pub fn bar_span(bar: &BarSpec, width: usize) -> (usize, usize) {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let at = |f: f64| ((f.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let start = at(bar.left_fraction);
    let end = at(bar.left_fraction + bar.width_fraction).max(start);
    (start, end)
}

/// Pad (or truncate with `…`) to exactly `width` characters, one space of
/// margin on each side.
fn fit(text: &str, width: usize, align: Align) -> String {
    let inner = width.saturating_sub(2);
    let len = text.chars().count();
    let body: String = if len > inner {
        text.chars()
            .take(inner.saturating_sub(1))
            .chain(std::iter::once('…'))
            .collect()
    } else {
        text.to_owned()
    };
    let pad = inner - body.chars().count().min(inner);
    let (l, r) = match align {
        Align::Left => (0, pad),
        Align::Center => (pad / 2, pad - pad / 2),
        Align::Right => (pad, 0),
    };
    format!(" {}{body}{} ", " ".repeat(l), " ".repeat(r))
}

fn paint(text: &str, bar: &BarSpec) -> String {
    let chars: Vec<char> = text.chars().collect();
    let (start, end) = bar_span(bar, chars.len());
    if start == end {
        return text.to_owned();
    }
    let (r, g, b) = bar.color.over(BACKDROP);
    let before: String = chars[..start].iter().collect();
    let inside: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();
    format!("{before}{}{after}", colorize(&AnsiCode::bg(r, g, b), &inside))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Rgba;

    fn bar(left: f64, width: f64) -> BarSpec {
        BarSpec {
            left_fraction: left,
            width_fraction: width,
            color: Rgba::new(38, 139, 210, 1.0),
        }
    }

    #[test]
    fn span_covers_fraction_of_cell() {
        assert_eq!(bar_span(&bar(0.0, 0.5), 10), (0, 5));
        assert_eq!(bar_span(&bar(1.0 / 3.0, 2.0 / 3.0), 12), (4, 12));
        assert_eq!(bar_span(&bar(0.2, 0.0), 10), (2, 2));
    }

    #[test]
    fn fit_aligns_and_truncates() {
        assert_eq!(fit("42", 8, Align::Right), "     42 ");
        assert_eq!(fit("42", 8, Align::Left), " 42     ");
        assert_eq!(fit("42", 8, Align::Center), "   42   ");
        assert_eq!(fit("abcdefghij", 6, Align::Right), " abc… ");
    }

    #[test]
    fn painted_cells_carry_background_escape() {
        let table = Table::new(["v"]).row(["10"]).row(["0"]);
        let mut term = TerminalRenderer::new(40, Align::Right);
        term.overlay(0, 0, bar(0.0, 1.0));
        term.overlay(1, 0, bar(0.0, 0.0));
        let out = term.render(&table);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("\x1b[48;2;38;139;210m"));
        assert!(!lines[3].contains('\x1b'));
    }

    #[test]
    fn columns_shrink_to_terminal() {
        let long = "x".repeat(50);
        let table = Table::new(["a", "b"]).row([long.as_str(), "1"]);
        let term = TerminalRenderer::new(30, Align::Right);
        let widths = term.column_widths(&table);
        assert!(widths[0] <= 14);
        assert_eq!(widths[1], MIN_CELL_WIDTH);
    }

    #[test]
    fn css_alignment() {
        assert_eq!(Align::from_css(Some("left")), Align::Left);
        assert_eq!(Align::from_css(Some("center")), Align::Center);
        assert_eq!(Align::from_css(None), Align::Right);
    }
}
