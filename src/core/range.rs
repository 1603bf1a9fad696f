//! Value range of one column group.

use crate::core::{error::EmptyRangeError, numeric::CellValue};

/// Bar sizing metrics shared by every cell of a group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeMetrics {
    /// `min(0, smallest value)`; the left edge of the cell box.
    pub min_with_zero: f64,
    /// Full extent of the group, always including 0. May be 0.
    pub span: f64,
    /// Where 0 sits inside `[0, 1]`; bars grow away from here.
    pub zero_fraction: f64,
}

impl RangeMetrics {
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.span == 0.0
    }
}

/// Min/max over the numeric entries of `values`, non-numeric ones skipped.
///
/// * Both ends are extended to include 0, so an all-negative group still
///   fits inside the cell box with its zero at the right edge. Taking the
///   plain maximum here would push those bars past the box, so the upper
///   end deliberately differs from `max(values)`.
/// * A group of zeros has `span == 0`; callers get `zero_fraction == 0` and
///   zero-width bars rather than a division by zero.
/// * `columns` only labels the error for a group with no numbers at all.
pub fn compute_range(values: &[CellValue], columns: &[usize]) -> Result<RangeMetrics, EmptyRangeError> {
    let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);

    for v in values.iter().filter_map(|v| v.as_number()) {
        low = low.min(v);
        high = high.max(v);
    }

    if !low.is_finite() || !high.is_finite() {
        return Err(EmptyRangeError {
            columns: columns.to_vec(),
        });
    }

    let min_with_zero = low.min(0.0);
    let span = high.max(0.0) - min_with_zero;
    let zero_fraction = if span > 0.0 {
        (0.0 - min_with_zero) / span
    } else {
        0.0
    };

    Ok(RangeMetrics {
        min_with_zero,
        span,
        zero_fraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::numeric::CellValue::{NotNumeric, Number};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn negative_zero_positive() {
        let m = compute_range(&[Number(-5.0), Number(0.0), Number(10.0)], &[0]).unwrap();
        assert!(close(m.min_with_zero, -5.0));
        assert!(close(m.span, 15.0));
        assert!(close(m.zero_fraction, 1.0 / 3.0));
    }

    #[test]
    fn positive_only_anchors_at_zero() {
        let m = compute_range(&[Number(2.0), Number(8.0)], &[0]).unwrap();
        assert!(close(m.min_with_zero, 0.0));
        assert!(close(m.span, 8.0));
        assert!(close(m.zero_fraction, 0.0));
    }

    #[test]
    fn negative_only_puts_zero_at_right_edge() {
        let m = compute_range(&[Number(-5.0), Number(-2.0)], &[0]).unwrap();
        assert!(close(m.span, 5.0));
        assert!(close(m.zero_fraction, 1.0));
    }

    #[test]
    fn all_zero_is_degenerate_not_an_error() {
        let m = compute_range(&[Number(0.0), Number(0.0)], &[0]).unwrap();
        assert!(m.is_degenerate());
        assert!(close(m.zero_fraction, 0.0));
    }

    #[test]
    fn non_numeric_entries_are_skipped() {
        let m = compute_range(&[NotNumeric, Number(4.0), NotNumeric], &[0]).unwrap();
        assert!(close(m.span, 4.0));
    }

    #[test]
    fn no_numbers_at_all() {
        assert_eq!(
            compute_range(&[NotNumeric, NotNumeric], &[2, 3]),
            Err(EmptyRangeError { columns: vec![2, 3] })
        );
        assert!(compute_range(&[], &[0]).is_err());
    }
}
