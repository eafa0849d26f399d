use std::path::Path;

use anyhow::{Context, Result, bail};

use super::las::{LasFile, read_las_file};
use super::model::{Curve, LogDataset, NULL_SENTINEL, mask_sentinel};

// ---------------------------------------------------------------------------
// Which columns to pull out of a log file
// ---------------------------------------------------------------------------

/// Mnemonics of the depth index and of the curves to display, in track order.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSelection {
    pub depth: String,
    pub curves: Vec<String>,
}

impl Default for CurveSelection {
    fn default() -> Self {
        CurveSelection {
            depth: "DEPT".to_string(),
            curves: vec!["GRZ".into(), "PORD".into(), "ZDEN".into()],
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a well log from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.las` – LAS 2.0 well-log file
pub fn load_file(path: &Path, selection: &CurveSelection) -> Result<LogDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "las" => load_las(path, selection),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn load_las(path: &Path, selection: &CurveSelection) -> Result<LogDataset> {
    let las = read_las_file(path).context("reading LAS file")?;
    log::debug!(
        "LAS {} (wrap: {}): {} curves, {} parameters, {} rows",
        las.version,
        las.wrapped,
        las.curves.len(),
        las.params.len(),
        las.len()
    );
    dataset_from_las(&las, selection)
}

/// Extract the selected columns and mask null samples.
///
/// Both the fixed `-999.25` sentinel and the file's own `NULL` value (when it
/// declares a different one) become NaN.
pub fn dataset_from_las(las: &LasFile, selection: &CurveSelection) -> Result<LogDataset> {
    let null_values = null_values(las);

    let depth_curve = las
        .require(&selection.depth)
        .context("locating depth column")?;
    let mut depth = depth_curve.data.clone();
    for &null in &null_values {
        mask_sentinel(&mut depth, null);
    }

    let mut curves = Vec::with_capacity(selection.curves.len());
    for mnemonic in &selection.curves {
        let src = las
            .require(mnemonic)
            .with_context(|| format!("locating curve '{mnemonic}'"))?;
        let mut values = src.data.clone();
        for &null in &null_values {
            mask_sentinel(&mut values, null);
        }
        curves.push(Curve {
            mnemonic: src.mnemonic.clone(),
            unit: src.unit.clone(),
            description: src.description.clone(),
            values,
        });
    }

    let mut well = las.well.clone();
    if well.depth_unit.is_empty() {
        well.depth_unit = depth_curve.unit.clone();
    }

    LogDataset::new(depth, curves, well)
}

fn null_values(las: &LasFile) -> Vec<f64> {
    let mut nulls = vec![NULL_SENTINEL];
    if let Some(declared) = las.well.null_value {
        if declared != NULL_SENTINEL {
            nulls.push(declared);
        }
    }
    nulls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::las::parse_las;
    use std::io::Write;

    const LOG: &str = "~W\n NULL. -9999 :\n WELL. TEST-1 :\n\
                       ~C\n DEPT.FT :\n GRZ.GAPI :\n PORD. :\n ZDEN. :\n CALI.IN :\n\
                       ~A\n\
                       100.0  50.0  0.20  2.40  8.5\n\
                       100.5  -999.25  0.21  2.41  8.5\n\
                       101.0  52.0  -9999  2.42  8.6\n\
                       -999.25  53.0  0.22  2.43  8.6\n";

    #[test]
    fn test_sentinel_and_declared_null_become_missing() {
        let las = parse_las(LOG).unwrap();
        let ds = dataset_from_las(&las, &CurveSelection::default()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.curves.len(), 3);
        assert!(ds.depth[3].is_nan());
        assert!(ds.curves[0].values[1].is_nan());
        assert!(ds.curves[1].values[2].is_nan());
        assert_eq!(ds.curves[2].values, vec![2.40, 2.41, 2.42, 2.43]);
        assert_eq!(ds.well.well_name, "TEST-1");
        assert_eq!(ds.well.depth_unit, "FT");
        assert!(ds.curve("CALI").is_none());
    }

    #[test]
    fn test_missing_curve_fails() {
        let las = parse_las(LOG).unwrap();
        let selection = CurveSelection {
            depth: "DEPT".into(),
            curves: vec!["GRZ".into(), "RHOB".into()],
        };
        let err = dataset_from_las(&las, &selection).unwrap_err();
        assert!(format!("{err:#}").contains("RHOB"));
    }

    #[test]
    fn test_load_file_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".LAS").tempfile().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();

        let ds = load_file(file.path(), &CurveSelection::default()).unwrap();
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        assert!(load_file(file.path(), &CurveSelection::default()).is_err());
    }

    #[test]
    fn test_nonexistent_file_fails() {
        let path = Path::new("definitely/not/here.las");
        assert!(load_file(path, &CurveSelection::default()).is_err());
    }
}
