//! One rendering pass over one table.
//!
//! All state (palette position, per-group metrics) is local to
//! [`run_pass`], so tables rendered one after another never share colours
//! or ranges.

use std::time::Instant;

use log::{debug, warn};

use crate::{
    core::{
        color::{PaletteCycle, Rgba},
        config::Config,
        data::TableSource,
        error::{DatabarError, EmptyRangeError},
        geometry::bar_for_cell,
        numeric::{CellValue, extract},
        partition::{ColumnGroup, partition},
        range::{RangeMetrics, compute_range},
    },
    render::OverlayRenderer,
};

/// Outcome of one group inside a pass.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupOutcome {
    Rendered {
        columns: ColumnGroup,
        metrics: RangeMetrics,
        color: Rgba,
        bars: usize,
    },
    /// No numeric cell at all; nothing drawn for these columns.
    Skipped(EmptyRangeError),
}

/// What a pass did, group by group, in palette order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassReport {
    pub groups: Vec<GroupOutcome>,
}

impl PassReport {
    #[must_use]
    pub fn bars(&self) -> usize {
        self.groups
            .iter()
            .map(|g| match g {
                GroupOutcome::Rendered { bars, .. } => *bars,
                GroupOutcome::Skipped(_) => 0,
            })
            .sum()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &EmptyRangeError> {
        self.groups.iter().filter_map(|g| match g {
            GroupOutcome::Skipped(e) => Some(e),
            GroupOutcome::Rendered { .. } => None,
        })
    }
}

/// Every present cell of `group`, row-major, as `(row, column, value, ignore)`.
fn group_cells<'t, T: TableSource + ?Sized>(
    table: &'t T,
    group: &'t [usize],
) -> impl Iterator<Item = (usize, usize, CellValue, bool)> + 't {
    (0..table.row_count()).flat_map(move |row| {
        group.iter().filter_map(move |&col| {
            table
                .cell(row, col)
                .map(|cell| (row, col, extract(&cell.text), cell.ignore))
        })
    })
}

/// Validate, partition, then size and colour every bar of `table`.
///
/// Ignore-flagged cells still count towards their group's range; they only
/// lose their overlay. A group without numbers is skipped and reported
/// unless `config.strict_groups` is set, in which case the pass fails.
pub fn run_pass<T, R>(table: &T, config: &Config, renderer: &mut R) -> Result<PassReport, DatabarError>
where
    T: TableSource + ?Sized,
    R: OverlayRenderer + ?Sized,
{
    let t0 = Instant::now();
    table.validate()?;

    let columns = table.column_count();
    config.check_bounds(columns)?;
    let groups = partition(columns, &config.groups)?;
    debug!("{columns} columns partitioned into {} groups", groups.len());

    let mut palette = PaletteCycle::new(config.background_opacity);
    let mut report = PassReport::default();

    for group in groups {
        let cells: Vec<_> = group_cells(table, &group).collect();
        let values: Vec<CellValue> = cells.iter().map(|&(_, _, v, _)| v).collect();

        let metrics = match compute_range(&values, &group) {
            Ok(m) => m,
            Err(e) if config.strict_groups => return Err(e.into()),
            Err(e) => {
                warn!("{e}; skipping");
                report.groups.push(GroupOutcome::Skipped(e));
                continue;
            }
        };
        let color = palette.next_color();
        debug!("group {group:?}: {metrics:?}, colour {color}");

        let mut bars = 0;
        for &(row, column, value, ignore) in &cells {
            if let Some(bar) = bar_for_cell(value, ignore, &metrics, color) {
                renderer.overlay(row, column, bar);
                bars += 1;
            }
        }
        report.groups.push(GroupOutcome::Rendered {
            columns: group,
            metrics,
            color,
            bars,
        });
    }

    debug!(
        "pass complete: {} bars in {} µs",
        report.bars(),
        t0.elapsed().as_micros()
    );
    Ok(report)
}
