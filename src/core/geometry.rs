//! Per-cell bar placement.

use crate::core::{color::Rgba, numeric::CellValue, range::RangeMetrics};

/// Where to draw one bar, as fractions of the cell box, and in what colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpec {
    pub left_fraction: f64,
    pub width_fraction: f64,
    pub color: Rgba,
}

/// Non-negative values grow rightwards from the zero line in the group's
/// colour; negative values grow leftwards in [`Rgba::negative`].
#[must_use]
pub fn compute_bar(value: f64, metrics: &RangeMetrics, group_color: Rgba) -> BarSpec {
    let width_fraction = if metrics.is_degenerate() {
        0.0
    } else {
        value.abs() / metrics.span
    };

    if value >= 0.0 {
        BarSpec {
            left_fraction: metrics.zero_fraction,
            width_fraction,
            color: group_color,
        }
    } else {
        BarSpec {
            left_fraction: metrics.zero_fraction - width_fraction,
            width_fraction,
            color: Rgba::negative(),
        }
    }
}

/// `None` for cells that get no overlay: non-numeric or flagged ignorable.
#[inline]
#[must_use]
pub fn bar_for_cell(
    value: CellValue,
    ignored: bool,
    metrics: &RangeMetrics,
    group_color: Rgba,
) -> Option<BarSpec> {
    if ignored {
        return None;
    }
    value
        .as_number()
        .map(|v| compute_bar(v, metrics, group_color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::range::compute_range;

    const GROUP: Rgba = Rgba::new(203, 75, 22, 0.4);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn metrics(values: &[f64]) -> RangeMetrics {
        let values: Vec<CellValue> = values.iter().map(|&v| CellValue::Number(v)).collect();
        compute_range(&values, &[0]).unwrap()
    }

    #[test]
    fn negative_value_grows_left_in_alert_colour() {
        let m = metrics(&[-5.0, 0.0, 10.0]);
        let bar = compute_bar(-5.0, &m, GROUP);
        assert!(close(bar.width_fraction, 1.0 / 3.0));
        assert!(close(bar.left_fraction, 0.0));
        assert_eq!(bar.color, Rgba::negative());
    }

    #[test]
    fn positive_value_grows_right_in_group_colour() {
        let m = metrics(&[-5.0, 0.0, 10.0]);
        let bar = compute_bar(10.0, &m, GROUP);
        assert!(close(bar.width_fraction, 2.0 / 3.0));
        assert!(close(bar.left_fraction, 1.0 / 3.0));
        assert_eq!(bar.color, GROUP);
    }

    #[test]
    fn zero_is_positive() {
        let m = metrics(&[-5.0, 10.0]);
        let bar = compute_bar(0.0, &m, GROUP);
        assert!(close(bar.width_fraction, 0.0));
        assert_eq!(bar.color, GROUP);
    }

    #[test]
    fn degenerate_span_gives_zero_width() {
        let m = metrics(&[0.0, 0.0, 0.0]);
        let bar = compute_bar(0.0, &m, GROUP);
        assert!(close(bar.width_fraction, 0.0));
        assert!(bar.left_fraction.is_finite());
    }

    #[test]
    fn bars_stay_inside_the_box() {
        let values = [-7.0, -3.5, 0.0, 2.0, 11.0];
        let m = metrics(&values);
        for v in values {
            let bar = compute_bar(v, &m, GROUP);
            assert!(bar.left_fraction >= -1e-12, "{v}: {bar:?}");
            assert!(bar.left_fraction + bar.width_fraction <= 1.0 + 1e-12, "{v}: {bar:?}");
        }
    }

    #[test]
    fn skipped_cells_produce_nothing() {
        let m = metrics(&[1.0, 2.0]);
        assert_eq!(bar_for_cell(CellValue::NotNumeric, false, &m, GROUP), None);
        assert_eq!(bar_for_cell(CellValue::Number(1.0), true, &m, GROUP), None);
        assert!(bar_for_cell(CellValue::Number(1.0), false, &m, GROUP).is_some());
    }
}
