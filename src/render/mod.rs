pub mod html;
pub mod terminal;

use std::collections::BTreeMap;

use crate::core::geometry::BarSpec;

pub use html::HtmlRenderer;
pub use terminal::{TerminalRenderer, terminal_width};

/// Receives every bar a pass emits, keyed by body row and column.
pub trait OverlayRenderer {
    fn overlay(&mut self, row: usize, column: usize, bar: BarSpec);
}

/// Bars collected during a pass, looked up again while drawing.
#[derive(Clone, Debug, Default)]
pub struct OverlayGrid(BTreeMap<(usize, usize), BarSpec>);

impl OverlayGrid {
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&BarSpec> {
        self.0.get(&(row, column))
    }
}

impl OverlayRenderer for OverlayGrid {
    fn overlay(&mut self, row: usize, column: usize, bar: BarSpec) {
        self.0.insert((row, column), bar);
    }
}

/// `0.333333…` → `"33.3333%"`: four decimals, trailing zeros dropped.
#[must_use]
pub fn percent(fraction: f64) -> String {
    let s = format!("{:.4}", 100.0 * fraction);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    let s = if s == "-0" { "0" } else { s };
    format!("{s}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_formatting() {
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(1.0), "100%");
        assert_eq!(percent(0.25), "25%");
        assert_eq!(percent(1.0 / 3.0), "33.3333%");
        assert_eq!(percent(-0.000_000_1), "0%");
    }
}
