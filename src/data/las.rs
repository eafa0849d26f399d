/// LAS 2.0 (Log ASCII Standard) well-log reader
///
/// Format overview:
///   - A file is a sequence of sections, each opened by a line starting with `~`
///   - `~V` version information (`VERS`, `WRAP`)
///   - `~W` well information (`STRT`, `STOP`, `STEP`, `NULL`, `WELL`, ...)
///   - `~C` curve information, one line per data column, in column order
///   - `~P` parameters, `~O` free-form other information
///   - `~A` the ASCII data table, always the last section
///   - Lines starting with `#` are comments
///
/// Header lines have the shape `MNEM.UNIT  VALUE : DESCRIPTION`, where the
/// unit directly follows the first period and ends at the first space.
///
/// With `WRAP. YES` one depth step may span several lines. The data section
/// is read as a single stream of numbers and chunked by the curve count,
/// which covers both wrapped and unwrapped files.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use thiserror::Error;

use super::model::WellInfo;

#[derive(Debug, Error)]
pub enum LasError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no ~C (curve information) section")]
    MissingCurveSection,

    #[error("no ~A (ASCII data) section")]
    MissingDataSection,

    #[error("~C section defines no curves")]
    NoCurves,

    #[error("line {line}: '{token}' is not a number")]
    BadNumber { line: usize, token: String },

    #[error("data section holds {values} values, which is not a multiple of {curves} curves")]
    RaggedData { values: usize, curves: usize },

    #[error("curve '{0}' not found")]
    MissingCurve(String),
}

/// One `MNEM.UNIT VALUE : DESCRIPTION` line.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

/// A data column with its `~C` definition.
#[derive(Debug, Clone)]
pub struct LasCurve {
    pub mnemonic: String,
    pub unit: String,
    pub description: String,
    /// Raw samples as written in the file; null values are not yet masked.
    pub data: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct LasFile {
    pub version: String,
    pub wrapped: bool,
    pub well: WellInfo,
    pub params: Vec<HeaderItem>,
    pub curves: Vec<LasCurve>,
}

impl LasFile {
    /// Case-insensitive curve lookup by mnemonic.
    pub fn curve(&self, mnemonic: &str) -> Option<&LasCurve> {
        self.curves
            .iter()
            .find(|c| c.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    pub fn require(&self, mnemonic: &str) -> Result<&LasCurve, LasError> {
        self.curve(mnemonic)
            .ok_or_else(|| LasError::MissingCurve(mnemonic.to_string()))
    }

    /// Number of depth steps.
    pub fn len(&self) -> usize {
        self.curves.first().map_or(0, |c| c.data.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Version,
    Well,
    Curves,
    Parameters,
    Other,
    Data,
    Unknown,
}

impl Section {
    fn from_marker(line: &str) -> Self {
        match line[1..].chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => Section::Version,
            Some('W') => Section::Well,
            Some('C') => Section::Curves,
            Some('P') => Section::Parameters,
            Some('O') => Section::Other,
            Some('A') => Section::Data,
            _ => Section::Unknown,
        }
    }
}

/// Read and parse a LAS file from disk.
pub fn read_las_file(path: &Path) -> Result<LasFile, LasError> {
    let content = std::fs::read_to_string(path)?;
    parse_las(&content)
}

/// Parse LAS content.
pub fn parse_las(content: &str) -> Result<LasFile, LasError> {
    let mut version = String::new();
    let mut wrapped = false;
    let mut well = WellInfo::default();
    let mut params = Vec::new();
    let mut curve_defs: Vec<HeaderItem> = Vec::new();
    let mut seen_curve_section = false;
    let mut seen_data_section = false;
    let mut tokens: Vec<f64> = Vec::new();

    let mut section = Section::Unknown;

    for (line_idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('~') {
            section = Section::from_marker(line);
            match section {
                Section::Curves => seen_curve_section = true,
                Section::Data => seen_data_section = true,
                _ => {}
            }
            continue;
        }

        match section {
            Section::Data => {
                for tok in line.split_whitespace() {
                    let value = tok.parse::<f64>().map_err(|_| LasError::BadNumber {
                        line: line_idx + 1,
                        token: tok.to_string(),
                    })?;
                    tokens.push(value);
                }
            }
            Section::Other | Section::Unknown => {}
            _ => {
                let Some(item) = parse_header_line(line) else {
                    log::debug!("LAS line {}: skipping unparsable header line", line_idx + 1);
                    continue;
                };
                match section {
                    Section::Version => match item.mnemonic.to_ascii_uppercase().as_str() {
                        "VERS" => version = item.value.clone(),
                        "WRAP" => wrapped = item.value.eq_ignore_ascii_case("YES"),
                        _ => {}
                    },
                    Section::Well => apply_well_item(&mut well, &item),
                    Section::Curves => curve_defs.push(item),
                    Section::Parameters => params.push(item),
                    _ => {}
                }
            }
        }
    }

    if !seen_curve_section {
        return Err(LasError::MissingCurveSection);
    }
    if !seen_data_section {
        return Err(LasError::MissingDataSection);
    }
    if curve_defs.is_empty() {
        return Err(LasError::NoCurves);
    }

    let n_curves = curve_defs.len();
    if tokens.len() % n_curves != 0 {
        return Err(LasError::RaggedData {
            values: tokens.len(),
            curves: n_curves,
        });
    }

    let n_rows = tokens.len() / n_curves;
    let mut curves: Vec<LasCurve> = dedup_mnemonics(curve_defs)
        .into_iter()
        .map(|def| LasCurve {
            mnemonic: def.mnemonic,
            unit: def.unit,
            description: def.description,
            data: Vec::with_capacity(n_rows),
        })
        .collect();

    for row in tokens.chunks_exact(n_curves) {
        for (curve, &value) in curves.iter_mut().zip(row) {
            curve.data.push(value);
        }
    }

    Ok(LasFile {
        version,
        wrapped,
        well,
        params,
        curves,
    })
}

/// Split `MNEM.UNIT  VALUE : DESCRIPTION`. Returns `None` when there is no
/// period to terminate the mnemonic.
fn parse_header_line(line: &str) -> Option<HeaderItem> {
    let dot = line.find('.')?;
    let mnemonic = line[..dot].trim().to_string();
    if mnemonic.is_empty() {
        return None;
    }

    let rest = &line[dot + 1..];
    let unit_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    // A unit running straight into the colon, e.g. `DEPT.M:`.
    let unit_end = rest[..unit_end].find(':').unwrap_or(unit_end);
    let unit = rest[..unit_end].to_string();
    let rest = &rest[unit_end..];

    // The value may itself contain colons (times), so split on the last one.
    let (value, description) = match rest.rfind(':') {
        Some(colon) => (&rest[..colon], &rest[colon + 1..]),
        None => (rest, ""),
    };

    Some(HeaderItem {
        mnemonic,
        unit,
        value: value.trim().to_string(),
        description: description.trim().to_string(),
    })
}

fn apply_well_item(well: &mut WellInfo, item: &HeaderItem) {
    match item.mnemonic.to_ascii_uppercase().as_str() {
        "WELL" => well.well_name = item.value.clone(),
        "COMP" => well.company = item.value.clone(),
        "FLD" => well.field = item.value.clone(),
        "STRT" => well.depth_unit = item.unit.clone(),
        "NULL" => well.null_value = item.value.parse().ok(),
        _ => {}
    }
}

/// Give repeated mnemonics a `:1`, `:2`, ... suffix so lookups stay unambiguous.
fn dedup_mnemonics(defs: Vec<HeaderItem>) -> Vec<HeaderItem> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    defs.into_iter()
        .map(|mut def| {
            let count = seen.entry(def.mnemonic.to_ascii_uppercase()).or_insert(0);
            if *count > 0 {
                def.mnemonic = format!("{}:{}", def.mnemonic, count);
            }
            *count += 1;
            def
        })
        .collect()
}
