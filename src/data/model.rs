use std::fmt;

use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// Missing-value handling
// ---------------------------------------------------------------------------

/// Reserved LAS placeholder meaning "no measurement".
pub const NULL_SENTINEL: f64 = -999.25;

/// Replace every sample equal to `sentinel` with NaN (missing), in place.
///
/// This is the only place sentinel substitution happens; the loader runs
/// every extracted column through it.
pub fn mask_sentinel(values: &mut [f64], sentinel: f64) {
    for v in values.iter_mut() {
        if *v == sentinel {
            *v = f64::NAN;
        }
    }
}

/// NaN-aware `(min, max)` of a slice, `None` if every value is missing.
pub fn finite_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

// ---------------------------------------------------------------------------
// WellInfo – selected fields of the ~W section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WellInfo {
    pub well_name: String,
    pub company: String,
    pub field: String,
    /// Unit of the depth index (`M`, `FT`, ...), taken from `STRT`.
    pub depth_unit: String,
    /// The `NULL` value the file declares, if any.
    pub null_value: Option<f64>,
}

impl fmt::Display for WellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.well_name.is_empty() {
            "<unnamed well>"
        } else {
            &self.well_name
        };
        write!(f, "{name}")?;
        if !self.field.is_empty() {
            write!(f, " · {}", self.field)?;
        }
        if !self.company.is_empty() {
            write!(f, " · {}", self.company)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Curve – one measured log aligned to depth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub mnemonic: String,
    pub unit: String,
    pub description: String,
    /// Samples, NaN where missing. Same length as the dataset depth.
    pub values: Vec<f64>,
}

impl Curve {
    pub fn new(mnemonic: impl Into<String>, values: Vec<f64>) -> Self {
        Curve {
            mnemonic: mnemonic.into(),
            unit: String::new(),
            description: String::new(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// LogDataset – depth index plus the displayed curves
// ---------------------------------------------------------------------------

/// A loaded well log: the depth column and the curves chosen for display,
/// all of equal length.
#[derive(Debug, Clone, Default)]
pub struct LogDataset {
    pub depth: Vec<f64>,
    pub curves: Vec<Curve>,
    pub well: WellInfo,
}

impl LogDataset {
    /// Build a dataset, checking that every curve is aligned with `depth`.
    pub fn new(depth: Vec<f64>, curves: Vec<Curve>, well: WellInfo) -> Result<Self> {
        for curve in &curves {
            if curve.values.len() != depth.len() {
                bail!(
                    "curve {} has {} samples but depth has {}",
                    curve.mnemonic,
                    curve.values.len(),
                    depth.len()
                );
            }
        }
        Ok(LogDataset { depth, curves, well })
    }

    /// A dataset with no samples that still names its curves, so the
    /// averages read "n/a" per track instead of disappearing.
    pub fn empty<S: AsRef<str>>(mnemonics: &[S]) -> Self {
        LogDataset {
            depth: Vec::new(),
            curves: mnemonics
                .iter()
                .map(|m| Curve::new(m.as_ref(), Vec::new()))
                .collect(),
            well: WellInfo::default(),
        }
    }

    /// Number of depth samples.
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    /// Whether no samples are loaded.
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Shallowest and deepest non-missing depth.
    pub fn depth_extent(&self) -> Option<(f64, f64)> {
        finite_extent(self.depth.iter().copied())
    }

    pub fn curve(&self, mnemonic: &str) -> Option<&Curve> {
        self.curves
            .iter()
            .find(|c| c.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    /// Whether depth and every curve hold a value at row `i`.
    pub fn row_is_complete(&self, i: usize) -> bool {
        !self.depth[i].is_nan() && self.curves.iter().all(|c| !c.values[i].is_nan())
    }
}
