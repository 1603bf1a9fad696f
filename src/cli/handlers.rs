use std::{io::Write, time::Instant};

use log::debug;

use crate::{
    core::{
        color::{AnsiCode, PaletteCycle, Rgba, colorize},
        config::{Config, ConfigFile},
        constants::{DEFAULT_BACKGROUND_OPACITY, PALETTE},
        data::{Table, read_table_from_path},
        error::DatabarError,
    },
    render::terminal::terminal_width,
    to_html, to_terminal,
};

use super::parse::TableArgs;

/// Flags layered over the optional configuration file.
fn config(a: &TableArgs) -> Result<Config, DatabarError> {
    let mut b = Config::builder()
        .groups(a.groups.iter().map(|g| g.0.clone()).collect())
        .ignore(a.ignore.iter().flat_map(|g| g.0.iter().copied()))
        .opacity_opt(a.opacity);
    for (p, v) in &a.css {
        b = b.style(p.as_str(), v.as_str());
    }
    if a.strict {
        b = b.strict(true);
    }
    if let Some(path) = &a.config {
        b = b.file(ConfigFile::read(path)?);
    }
    Ok(b.build()?)
}

fn load(a: &TableArgs) -> Result<Table, DatabarError> {
    let t_ingest = Instant::now();
    let table = read_table_from_path(&a.file)?;
    debug!(
        "CSV ingest: {} µs   ({} rows)",
        t_ingest.elapsed().as_micros(),
        table.rows().len()
    );
    Ok(table)
}

pub fn html(a: &TableArgs) -> Result<(), DatabarError> {
    let cfg = config(a)?;
    let table = load(a)?;
    let out = to_html(&table, &cfg)?;
    std::io::stdout().write_all(out.as_bytes())?;
    Ok(())
}

pub fn show(a: &TableArgs) -> Result<(), DatabarError> {
    let cfg = config(a)?;
    let table = load(a)?;
    let out = to_terminal(&table, &cfg, terminal_width())?;
    std::io::stdout().write_all(out.as_bytes())?;
    Ok(())
}

/// Swatch per palette entry in the order groups receive them.
pub fn colors() {
    let mut cycle = PaletteCycle::new(DEFAULT_BACKGROUND_OPACITY);
    println!("\nGroup colours (alpha {DEFAULT_BACKGROUND_OPACITY}):");
    for group in 1..=PALETTE.len() {
        let c = cycle.next_color();
        println!("{}  group {group}: {c}", colorize(&AnsiCode::bg(c.r, c.g, c.b), "      "));
    }
    let n = Rgba::negative();
    println!(
        "{}  negative values: {n}\n",
        colorize(&AnsiCode::bg(n.r, n.g, n.b), "      ")
    );
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "databar";
    println!(
        "
Example invocations
-------------------
• Terminal view     : {bin} show sales.csv
• HTML to a file    : {bin} html sales.csv > sales.html
• Shared range      : {bin} html sales.csv --group 1,2,3,4
• Skip a column     : {bin} show sales.csv --ignore 0
• Left-aligned text : {bin} html sales.csv --css text-align=left
• Stronger colours  : {bin} html sales.csv --opacity 0.8
• From a config     : {bin} html sales.csv --config databar.json
• Per-cell opt out  : prefix a CSV field with ! (e.g. !1,234) to draw no bar
"
    );
}
