use std::fmt;

use super::model::{LogDataset, finite_extent};

// ---------------------------------------------------------------------------
// Depth range selected by the user
// ---------------------------------------------------------------------------

/// Closed depth interval `[start, end]`.  A range with `start > end` is
/// allowed and simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub start: f64,
    pub end: f64,
}

impl DepthRange {
    pub fn new(start: f64, end: f64) -> Self {
        DepthRange { start, end }
    }

    /// NaN depths are never contained.
    pub fn contains(&self, depth: f64) -> bool {
        self.start <= depth && depth <= self.end
    }
}

impl fmt::Display for DepthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} – {:.2}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Indices whose depth lies inside `range`, in file order.
pub fn range_indices(dataset: &LogDataset, range: &DepthRange) -> Vec<usize> {
    dataset
        .depth
        .iter()
        .enumerate()
        .filter(|(_, &d)| range.contains(d))
        .map(|(i, _)| i)
        .collect()
}

/// Indices inside `range` where depth and every curve hold a value.
///
/// A row is dropped if *any* curve is missing there, even though the
/// averages are computed per curve.
pub fn filtered_indices(dataset: &LogDataset, range: &DepthRange) -> Vec<usize> {
    range_indices(dataset, range)
        .into_iter()
        .filter(|&i| dataset.row_is_complete(i))
        .collect()
}

/// Arithmetic mean of `values` at `indices`, `None` for an empty selection.
pub fn curve_mean(values: &[f64], indices: &[usize]) -> Option<f64> {
    if indices.is_empty() {
        return None;
    }
    let sum: f64 = indices.iter().map(|&i| values[i]).sum();
    Some(sum / indices.len() as f64)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Per-curve statistics over the filtered interval.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSummary {
    pub mnemonic: String,
    pub unit: String,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl CurveSummary {
    /// Mean to two decimals, or `n/a` when nothing was selected.
    pub fn mean_label(&self) -> String {
        match self.mean {
            Some(m) => format!("{m:.2}"),
            None => "n/a".to_string(),
        }
    }
}

/// Result of filtering a dataset to a depth range.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSummary {
    pub range: DepthRange,
    /// Rows passing both the range and the validity mask.
    pub indices: Vec<usize>,
    /// Rows inside the range before missing values were dropped.
    pub in_range: usize,
    pub curves: Vec<CurveSummary>,
}

impl Default for IntervalSummary {
    fn default() -> Self {
        IntervalSummary {
            range: DepthRange::new(0.0, 0.0),
            indices: Vec::new(),
            in_range: 0,
            curves: Vec::new(),
        }
    }
}

impl IntervalSummary {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Depth extent of the surviving rows.
    pub fn depth_extent(&self, dataset: &LogDataset) -> Option<(f64, f64)> {
        finite_extent(self.indices.iter().map(|&i| dataset.depth[i]))
    }

    /// Filtered `(depth, value)` pairs of curve `curve_idx`, in depth order
    /// of the source file.
    pub fn points(&self, dataset: &LogDataset, curve_idx: usize) -> Vec<(f64, f64)> {
        let values = &dataset.curves[curve_idx].values;
        self.indices
            .iter()
            .map(|&i| (dataset.depth[i], values[i]))
            .collect()
    }
}

/// Filter `dataset` to `range` and compute each curve's statistics.
pub fn summarize(dataset: &LogDataset, range: DepthRange) -> IntervalSummary {
    let in_range = range_indices(dataset, &range);
    let n_in_range = in_range.len();
    let indices: Vec<usize> = in_range
        .into_iter()
        .filter(|&i| dataset.row_is_complete(i))
        .collect();

    let curves = dataset
        .curves
        .iter()
        .map(|curve| {
            let extent = finite_extent(indices.iter().map(|&i| curve.values[i]));
            CurveSummary {
                mnemonic: curve.mnemonic.clone(),
                unit: curve.unit.clone(),
                mean: curve_mean(&curve.values, &indices),
                min: extent.map(|(lo, _)| lo),
                max: extent.map(|(_, hi)| hi),
            }
        })
        .collect();

    IntervalSummary {
        range,
        indices,
        in_range: n_in_range,
        curves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Curve, WellInfo};

    const NAN: f64 = f64::NAN;

    fn dataset(depth: Vec<f64>, a: Vec<f64>, b: Vec<f64>, c: Vec<f64>) -> LogDataset {
        LogDataset::new(
            depth,
            vec![
                Curve::new("GRZ", a),
                Curve::new("PORD", b),
                Curve::new("ZDEN", c),
            ],
            WellInfo::default(),
        )
        .unwrap()
    }

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 0.01)
    }

    #[test]
    fn test_gap_in_one_curve_drops_the_row() {
        let ds = dataset(
            vec![1.0, 2.0, 3.0, 4.0],
            vec![10.0, NAN, 30.0, 40.0],
            vec![1.0, 2.0, 3.0, 4.0],
            vec![5.0, 6.0, 7.0, 8.0],
        );
        let s = summarize(&ds, DepthRange::new(1.0, 4.0));

        assert_eq!(s.indices, vec![0, 2, 3]);
        assert_eq!(s.in_range, 4);
        assert_eq!(s.indices, filtered_indices(&ds, &s.range));
        assert!(close(s.curves[0].mean, 26.67));
        assert!(close(s.curves[1].mean, 2.67));
        assert!(close(s.curves[2].mean, 6.67));
        assert_eq!(s.curves[0].mean_label(), "26.67");
        assert_eq!(s.curves[1].min, Some(1.0));
        assert_eq!(s.curves[1].max, Some(4.0));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let ds = dataset(
            vec![1.0, 2.0, 3.0],
            vec![1.0, 1.0, 1.0],
            vec![2.0, 2.0, 2.0],
            vec![3.0, 3.0, 3.0],
        );
        let s = summarize(&ds, DepthRange::new(3.0, 1.0));

        assert!(s.is_empty());
        assert_eq!(s.curves.len(), 3);
        for c in &s.curves {
            assert_eq!(c.mean, None);
            assert_eq!(c.mean_label(), "n/a");
        }
    }

    #[test]
    fn test_full_extent_keeps_complete_rows_only() {
        let ds = dataset(
            vec![1.0, NAN, 3.0, 4.0, 5.0],
            vec![1.0, 1.0, 1.0, NAN, 1.0],
            vec![1.0, 1.0, 1.0, 1.0, 1.0],
            vec![1.0, 1.0, NAN, 1.0, 1.0],
        );
        let (lo, hi) = ds.depth_extent().unwrap();
        let idx = filtered_indices(&ds, &DepthRange::new(lo, hi));
        assert_eq!(idx, vec![0, 4]);
    }

    #[test]
    fn test_in_range_counts_rows_before_validity_mask() {
        let ds = dataset(
            vec![1.0, 2.0, NAN, 4.0, 5.0],
            vec![1.0, NAN, 1.0, 1.0, 1.0],
            vec![1.0; 5],
            vec![1.0; 5],
        );
        let range = DepthRange::new(1.0, 4.0);
        let s = summarize(&ds, range);
        assert_eq!(s.in_range, range_indices(&ds, &range).len());
        assert_eq!(s.in_range, 3);
        assert_eq!(s.indices, vec![0, 3]);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let ds = dataset(
            vec![1.0, 2.0, 3.0, 4.0],
            vec![0.0; 4],
            vec![0.0; 4],
            vec![0.0; 4],
        );
        assert_eq!(range_indices(&ds, &DepthRange::new(2.0, 3.0)), vec![1, 2]);
        assert_eq!(range_indices(&ds, &DepthRange::new(2.5, 2.5)), Vec::<usize>::new());
    }

    #[test]
    fn test_empty_dataset() {
        let ds = LogDataset::empty(&["GRZ", "PORD", "ZDEN"]);
        let s = summarize(&ds, DepthRange::new(0.0, 10_000.0));
        assert!(s.is_empty());
        assert_eq!(s.curves.len(), 3);
        assert!(s.curves.iter().all(|c| c.mean.is_none()));
        assert_eq!(s.depth_extent(&ds), None);
    }

    #[test]
    fn test_points_preserve_file_order() {
        let ds = dataset(
            vec![3.0, 2.0, 1.0],
            vec![30.0, 20.0, 10.0],
            vec![0.0; 3],
            vec![0.0; 3],
        );
        let s = summarize(&ds, DepthRange::new(1.0, 2.0));
        assert_eq!(s.points(&ds, 0), vec![(2.0, 20.0), (1.0, 10.0)]);
        assert_eq!(s.depth_extent(&ds), Some((1.0, 2.0)));
    }

    #[test]
    fn test_curve_mean_empty_is_none() {
        assert_eq!(curve_mean(&[1.0, 2.0], &[]), None);
        assert_eq!(curve_mean(&[1.0, 2.0], &[0, 1]), Some(1.5));
    }
}
