//! Public-facing crate root – re-exports + one-shot helpers.
//!
//! A pass partitions a table's columns into groups, measures each group's
//! value range and hands every numeric cell a proportional bar:
//!
//! ```
//! use databar::{Config, Table, to_html};
//!
//! let table = Table::new(["region", "q1", "q2"])
//!     .row(["north", "1,200", "-300"])
//!     .row(["south", "800", "450"]);
//! let cfg = Config::builder().group([1, 2]).build().unwrap();
//! let html = to_html(&table, &cfg).unwrap();
//! assert!(html.contains("background-color: rgba(255, 0, 0, 0.4)"));
//! ```

pub mod cli;
pub mod core;
pub mod render;

pub use crate::core::{
    color::{PaletteCycle, Rgba},
    config::{Config, ConfigBuilder, ConfigFile, StyleOverrides},
    data::{Cell, Table, TableSource, read_table, read_table_from_path},
    error::{ConfigError, DatabarError, EmptyRangeError, MalformedTableError},
    geometry::{BarSpec, bar_for_cell, compute_bar},
    numeric::{CellValue, extract},
    partition::{ColumnGroup, GroupConfig, partition},
    pass::{GroupOutcome, PassReport, run_pass},
    range::{RangeMetrics, compute_range},
};

pub use render::{HtmlRenderer, OverlayRenderer, TerminalRenderer};

/// Run one pass over `table` and return it as an HTML table.
pub fn to_html(table: &Table, config: &Config) -> Result<String, DatabarError> {
    let mut html = HtmlRenderer::new(config.css.clone());
    run_pass(table, config, &mut html)?;
    Ok(html.render(table))
}

/// Run one pass over `table` and draw it for a terminal `width` columns wide.
pub fn to_terminal(table: &Table, config: &Config, width: usize) -> Result<String, DatabarError> {
    use crate::render::terminal::Align;

    let mut term = TerminalRenderer::new(width, Align::from_css(config.css.get("text-align")));
    run_pass(table, config, &mut term)?;
    Ok(term.render(table))
}
