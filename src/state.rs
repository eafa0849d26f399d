use std::path::{Path, PathBuf};

use crate::config::{TrackOrientation, ViewerConfig};
use crate::data::export::export_interval_csv;
use crate::data::filter::{DepthRange, IntervalSummary, summarize};
use crate::data::loader::load_file;
use crate::data::model::LogDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Slider positions are integer steps of `1 / slider_resolution` depth
/// units. Every mutation ends in [`AppState::recompute`].
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded log; empty (but naming the configured tracks) until a file
    /// loads successfully, and again after a failed load.
    pub dataset: LogDataset,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    pub slider_min: i64,
    pub slider_max: i64,
    pub start_step: i64,
    pub end_step: i64,

    /// Text field contents; committed with `commit_*_text`.
    pub start_text: String,
    pub end_text: String,

    /// Filtered interval and averages for the current range (cached).
    pub summary: IntervalSummary,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Bumped on every recompute so the charts refit their bounds.
    pub revision: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let dataset = empty_dataset(&config);
        let mut state = Self {
            config,
            dataset,
            source: None,
            slider_min: 0,
            slider_max: 0,
            start_step: 0,
            end_step: 0,
            start_text: String::new(),
            end_text: String::new(),
            summary: IntervalSummary::default(),
            status_message: None,
            revision: 0,
        };
        state.sync_text();
        state.recompute();
        state
    }

    // ---- Loading ----

    /// Load `path`, replacing the dataset on success and resetting it to
    /// empty on failure.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path, &self.config.curve_selection()) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} samples of {:?} from {}",
                    dataset.len(),
                    dataset.curves.iter().map(|c| &c.mnemonic).collect::<Vec<_>>(),
                    path.display()
                );
                self.set_dataset(dataset);
                self.source = Some(path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.reset_dataset();
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and open the range to its full extent.
    pub fn set_dataset(&mut self, dataset: LogDataset) {
        let (lo, hi) = dataset.depth_extent().unwrap_or((0.0, 0.0));
        self.slider_min = self.outer_step(lo, false);
        self.slider_max = self.outer_step(hi, true);
        self.start_step = self.slider_min;
        self.end_step = self.slider_max;

        self.dataset = dataset;
        self.status_message = None;
        self.sync_text();
        self.recompute();
    }

    /// Drop all loaded data.
    pub fn reset_dataset(&mut self) {
        self.dataset = empty_dataset(&self.config);
        self.source = None;
        self.slider_min = 0;
        self.slider_max = 0;
        self.start_step = 0;
        self.end_step = 0;
        self.sync_text();
        self.recompute();
    }

    // ---- Range controls ----

    pub fn depth_range(&self) -> DepthRange {
        DepthRange::new(self.to_depth(self.start_step), self.to_depth(self.end_step))
    }

    pub fn set_start_step(&mut self, step: i64) {
        self.start_step = step.clamp(self.slider_min, self.slider_max);
        self.start_text = self.format_step(self.start_step);
        self.recompute();
    }

    pub fn set_end_step(&mut self, step: i64) {
        self.end_step = step.clamp(self.slider_min, self.slider_max);
        self.end_text = self.format_step(self.end_step);
        self.recompute();
    }

    /// Apply the start text field. Unparsable text leaves the slider alone.
    pub fn commit_start_text(&mut self) {
        match parse_depth(&self.start_text) {
            Some(depth) => self.set_start_step(self.to_step(depth)),
            None => {
                log::debug!("Ignoring start depth input {:?}", self.start_text);
                self.start_text = self.format_step(self.start_step);
            }
        }
    }

    /// Apply the end text field. Unparsable text leaves the slider alone.
    pub fn commit_end_text(&mut self) {
        match parse_depth(&self.end_text) {
            Some(depth) => self.set_end_step(self.to_step(depth)),
            None => {
                log::debug!("Ignoring end depth input {:?}", self.end_text);
                self.end_text = self.format_step(self.end_step);
            }
        }
    }

    /// Re-filter and re-average for the current range.
    pub fn recompute(&mut self) {
        let range = self.depth_range();
        self.summary = summarize(&self.dataset, range);
        self.revision = self.revision.wrapping_add(1);
        log::debug!(
            "Depth range {range}: {} of {} in-range samples complete",
            self.summary.indices.len(),
            self.summary.in_range
        );
    }

    // ---- Presentation helpers ----

    /// Plot coordinates of track `idx` for the configured orientation, with
    /// the track's display scale applied.
    pub fn track_points(&self, idx: usize) -> Vec<[f64; 2]> {
        let scale = self
            .config
            .tracks
            .get(idx)
            .map_or(1.0, |t| t.display_scale);
        self.summary
            .points(&self.dataset, idx)
            .into_iter()
            .map(|(depth, value)| match self.config.orientation {
                TrackOrientation::Vertical => [value / scale, -depth],
                TrackOrientation::Horizontal => [depth, value / scale],
            })
            .collect()
    }

    // ---- Export ----

    /// Write the current interval to `path` as CSV.
    pub fn export_to(&mut self, path: &Path) {
        match export_interval_csv(
            path,
            &self.dataset,
            &self.summary,
            &self.config.depth_mnemonic,
        ) {
            Ok(()) => {
                log::info!(
                    "Exported {} samples to {}",
                    self.summary.indices.len(),
                    path.display()
                );
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Export error: {e:#}"));
            }
        }
    }

    // ---- Internals ----

    /// Nearest slider step. Products like `1024.1 * 100` land just below
    /// the whole number, so truncation would lose a step.
    fn to_step(&self, depth: f64) -> i64 {
        (depth * self.config.slider_resolution).round() as i64
    }

    /// Step whose depth is on the far side of `depth`: at or below it for
    /// the shallow end, at or above it for the deep end, so the full
    /// extent always contains the outermost samples.
    fn outer_step(&self, depth: f64, deep_end: bool) -> i64 {
        let step = self.to_step(depth);
        if deep_end && self.to_depth(step) < depth {
            step + 1
        } else if !deep_end && self.to_depth(step) > depth {
            step - 1
        } else {
            step
        }
    }

    fn to_depth(&self, step: i64) -> f64 {
        step as f64 / self.config.slider_resolution
    }

    fn format_step(&self, step: i64) -> String {
        format!("{:.2}", self.to_depth(step))
    }

    fn sync_text(&mut self) {
        self.start_text = self.format_step(self.start_step);
        self.end_text = self.format_step(self.end_step);
    }
}

fn empty_dataset(config: &ViewerConfig) -> LogDataset {
    LogDataset::empty(&config.curve_selection().curves)
}

fn parse_depth(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|d| d.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Curve, WellInfo};
    use std::io::Write;

    const GOOD: &str = "~W\n NULL. -999.25 :\n STRT.M 1000.0 :\n\
                        ~C\n DEPT.M :\n GRZ.GAPI :\n PORD.V/V :\n ZDEN.G/C3 :\n\
                        ~A\n\
                        1000.00  40.0  0.20  2.40\n\
                        1000.25  -999.25  0.21  2.41\n\
                        1000.50  60.0  0.22  2.42\n\
                        1000.75  80.0  0.23  2.43\n";

    fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn loaded_state() -> (AppState, tempfile::NamedTempFile) {
        let file = write_temp(GOOD, ".las");
        let mut state = AppState::default();
        state.open_path(file.path());
        (state, file)
    }

    #[test]
    fn test_initial_state_is_empty_with_na_averages() {
        let state = AppState::default();
        assert!(state.dataset.is_empty());
        assert!(state.summary.is_empty());
        assert_eq!(state.summary.curves.len(), 3);
        assert!(state.summary.curves.iter().all(|c| c.mean_label() == "n/a"));
    }

    #[test]
    fn test_load_opens_full_range() {
        let (state, _file) = loaded_state();
        assert_eq!(state.status_message, None);
        assert!(state.source.is_some());
        assert_eq!(state.slider_min, 100_000);
        assert_eq!(state.slider_max, 100_075);
        assert_eq!(state.start_text, "1000.00");
        assert_eq!(state.end_text, "1000.75");
        assert_eq!(state.summary.indices, vec![0, 2, 3]);
        assert_eq!(state.summary.curves[0].mean_label(), "60.00");
    }

    #[test]
    fn test_failed_load_resets_to_empty() {
        let (mut state, _file) = loaded_state();
        assert!(!state.dataset.is_empty());

        let bad = write_temp("~C\n DEPT.M :\n GRZ. :\n~A\n1 2\n", ".las");
        state.open_path(bad.path());

        assert!(state.dataset.is_empty());
        assert!(state.source.is_none());
        assert!(state.status_message.is_some());
        assert!(state.summary.is_empty());
        assert!(state.summary.curves.iter().all(|c| c.mean.is_none()));
        assert!(state
            .summary
            .curves
            .iter()
            .all(|c| state.dataset.curve(&c.mnemonic).is_some()));

        state.set_start_step(-5);
        assert_eq!(state.start_step, 0);
        assert!(state.summary.is_empty());
    }

    #[test]
    fn test_text_commit_moves_slider() {
        let (mut state, _file) = loaded_state();
        state.start_text = " 1000.5 ".into();
        state.commit_start_text();

        assert_eq!(state.start_step, 100_050);
        assert_eq!(state.start_text, "1000.50");
        assert_eq!(state.summary.indices, vec![2, 3]);
        assert_eq!(state.summary.curves[0].mean_label(), "70.00");
    }

    #[test]
    fn test_invalid_text_is_ignored() {
        let (mut state, _file) = loaded_state();
        let before = state.summary.clone();
        state.end_text = "deep".into();
        state.commit_end_text();

        assert_eq!(state.end_step, 100_075);
        assert_eq!(state.end_text, "1000.75");
        assert_eq!(state.summary.indices, before.indices);
    }

    fn three_rows(depth: [f64; 3]) -> LogDataset {
        LogDataset::new(
            depth.to_vec(),
            vec![
                Curve::new("GRZ", vec![1.0; 3]),
                Curve::new("PORD", vec![2.0; 3]),
                Curve::new("ZDEN", vec![3.0; 3]),
            ],
            WellInfo::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_full_extent_keeps_deepest_sample() {
        let mut state = AppState::default();
        state.set_dataset(three_rows([1024.0, 1024.05, 1024.1]));

        assert_eq!(state.slider_max, 102_410);
        assert_eq!(state.end_text, "1024.10");
        assert_eq!(state.summary.indices, vec![0, 1, 2]);

        state.end_text = "1024.05".into();
        state.commit_end_text();
        assert_eq!(state.summary.indices, vec![0, 1]);

        state.end_text = "1024.1".into();
        state.commit_end_text();
        assert_eq!(state.end_step, 102_410);
        assert_eq!(state.end_text, "1024.10");
        assert_eq!(state.summary.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_off_grid_extent_is_widened_outward() {
        let mut state = AppState::default();
        state.set_dataset(three_rows([1000.004, 1000.5, 1000.996]));

        assert_eq!(state.slider_min, 100_000);
        assert_eq!(state.slider_max, 100_100);
        assert_eq!(state.summary.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_steps_are_clamped_to_extent() {
        let (mut state, _file) = loaded_state();
        state.set_end_step(1_000_000);
        assert_eq!(state.end_step, state.slider_max);
        state.end_text = "10".into();
        state.commit_end_text();
        assert_eq!(state.end_step, state.slider_min);
    }

    #[test]
    fn test_crossed_sliders_give_empty_interval() {
        let (mut state, _file) = loaded_state();
        state.set_start_step(state.slider_max);
        state.set_end_step(state.slider_min);
        assert!(state.summary.is_empty());
        assert!(state.summary.curves.iter().all(|c| c.mean.is_none()));
    }

    #[test]
    fn test_track_points_follow_orientation_and_scale() {
        let mut config = ViewerConfig::default();
        config.tracks[0].display_scale = 10.0;
        let mut state = AppState::new(config);
        state.set_dataset(
            LogDataset::new(
                vec![5.0],
                vec![
                    Curve::new("GRZ", vec![20.0]),
                    Curve::new("PORD", vec![0.1]),
                    Curve::new("ZDEN", vec![2.5]),
                ],
                WellInfo::default(),
            )
            .unwrap(),
        );

        assert_eq!(state.track_points(0), vec![[2.0, -5.0]]);

        state.config.orientation = TrackOrientation::Horizontal;
        assert_eq!(state.track_points(2), vec![[5.0, 2.5]]);
    }

    #[test]
    fn test_export_reports_failure_in_status() {
        let (mut state, _file) = loaded_state();
        state.export_to(Path::new("no/such/dir/out.csv"));
        assert!(state.status_message.is_some());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        state.export_to(&path);
        assert_eq!(state.status_message, None);
        assert_eq!(std::fs::read_to_string(path).unwrap().lines().count(), 4);
    }
}
