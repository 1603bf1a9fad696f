//! Column index → disjoint groups sharing one range and one colour.
//!
//! Every step is a pure transformation producing a new `Vec`, so removing
//! ignored columns never shifts an index that is still being looked at.

use std::collections::BTreeSet;

use crate::core::error::ConfigError;

/// Ordered zero-based column indices.
pub type ColumnGroup = Vec<usize>;

/// User-declared pre-groups plus columns to leave out entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupConfig {
    pub declared: Vec<ColumnGroup>,
    pub ignore: Vec<usize>,
}

/// Indices that occur more than once across all declared groups, ascending.
fn duplicates(declared: &[ColumnGroup]) -> Vec<usize> {
    let mut seen = BTreeSet::new();
    let mut dup = BTreeSet::new();
    for &c in declared.iter().flatten() {
        if !seen.insert(c) {
            dup.insert(c);
        }
    }
    dup.into_iter().collect()
}

/// Partition `0..columns` according to `config`.
///
/// 1. Declared groups are taken as given (indices outside `0..columns` are
///    passed through; bounds are the caller's business).
/// 2. Every column not covered by a declared group becomes a singleton.
/// 3. Ignored columns are removed from every group, emptied groups dropped.
/// 4. Groups are ordered by their lowest column, which is also the order
///    palette colours are handed out in. Declared groups therefore do not
///    take the first colours ahead of the singletons to their left.
///
/// ```
/// use databar::core::partition::{GroupConfig, partition};
///
/// let cfg = GroupConfig { declared: vec![vec![1, 2], vec![4, 6]], ignore: vec![2, 3] };
/// assert_eq!(partition(7, &cfg).unwrap(), vec![vec![0], vec![1], vec![4, 6], vec![5]]);
/// ```
pub fn partition(columns: usize, config: &GroupConfig) -> Result<Vec<ColumnGroup>, ConfigError> {
    let dup = duplicates(&config.declared);
    if !dup.is_empty() {
        return Err(ConfigError::DuplicateColumns(dup));
    }

    let covered: BTreeSet<usize> = config.declared.iter().flatten().copied().collect();
    let singletons = (0..columns).filter(|c| !covered.contains(c)).map(|c| vec![c]);

    let ignored: BTreeSet<usize> = config.ignore.iter().copied().collect();
    let mut groups: Vec<ColumnGroup> = config
        .declared
        .iter()
        .cloned()
        .chain(singletons)
        .map(|g| g.into_iter().filter(|c| !ignored.contains(c)).collect::<ColumnGroup>())
        .filter(|g| !g.is_empty())
        .collect();

    // non-empty by the filter above
    groups.sort_by_key(|g| g.iter().min().copied().unwrap_or(usize::MAX));
    Ok(groups)
}
