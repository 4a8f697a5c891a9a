//! # Analysis Session
//!
//! An [`AnalysisSession`] owns a loaded dataset, the active profile, the
//! latest report and the rolling [`AnalysisHistory`]. Every recompute
//! (start, profile switch, parameter submission) runs the full pipeline and
//! records one history entry.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::dataset::{fallback_dataset, DatasetOrigin, LoadedDataset};
//! use facade_core::session::AnalysisSession;
//!
//! let loaded = LoadedDataset {
//!     dataset: fallback_dataset(),
//!     origin: DatasetOrigin::Fallback { reason: "offline".into() },
//! };
//! let mut session = AnalysisSession::start(loaded).unwrap();
//! session.select_profile("DX-02").unwrap();
//!
//! assert_eq!(session.history().len(), 2);
//! assert_eq!(session.active_profile_id(), "DX-02");
//! ```

use tracing::debug;

use crate::calculations::{analyze, AnalysisReport};
use crate::dataset::{Dataset, DatasetOrigin, DesignProfile, LoadedDataset};
use crate::errors::{FacadeError, FacadeResult};
use crate::history::{AnalysisHistory, HistoryEntry};
use crate::parameters::ParameterSet;

pub const REMARK_IMPORTED: &str = "Imported base configuration";
pub const REMARK_BUILTIN: &str = "Using built-in calibration parameters";
pub const REMARK_PROFILE_SWITCH: &str = "Regenerated after profile switch";

/// Label used when recomputed parameters have no named profile
pub const CUSTOM_INPUT_LABEL: &str = "Custom input";

/// Remark for a parameter submission made under `profile_name`.
pub fn recompute_remark(profile_name: Option<&str>) -> String {
    format!("Parameters recomputed · {}", profile_name.unwrap_or(CUSTOM_INPUT_LABEL))
}

/// Interactive analysis state over one dataset.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    dataset: Dataset,
    origin: DatasetOrigin,
    active_profile_id: String,
    current: AnalysisReport,
    history: AnalysisHistory,
}

impl AnalysisSession {
    /// Analyze the dataset's active profile and open a session.
    ///
    /// Falls back to the first profile when the active id is unknown.
    /// Fails only when the dataset has no profiles.
    pub fn start(loaded: LoadedDataset) -> FacadeResult<Self> {
        let LoadedDataset { dataset, origin } = loaded;
        let profile = dataset.active_profile().cloned().ok_or(FacadeError::EmptyDataset)?;

        let remark = match origin {
            DatasetOrigin::File(_) => REMARK_IMPORTED,
            DatasetOrigin::Fallback { .. } => REMARK_BUILTIN,
        };

        let current = analyze(&profile.parameters);
        let mut history = AnalysisHistory::new();
        history.push(HistoryEntry::from_report(&profile.id, &current, remark));

        debug!(profile = %profile.id, remark, "session started");

        Ok(Self {
            dataset,
            origin,
            active_profile_id: profile.id,
            current,
            history,
        })
    }

    /// Switch to another profile and recompute.
    pub fn select_profile(&mut self, id: &str) -> FacadeResult<&AnalysisReport> {
        let profile = self
            .dataset
            .profile(id)
            .cloned()
            .ok_or_else(|| FacadeError::profile_not_found(id))?;

        self.active_profile_id = profile.id;
        self.record(&profile.parameters, REMARK_PROFILE_SWITCH.to_string());
        Ok(&self.current)
    }

    /// Recompute arbitrary parameters under the active profile id.
    pub fn submit(&mut self, params: &ParameterSet, remark: impl Into<String>) -> &AnalysisReport {
        self.record(params, remark.into());
        &self.current
    }

    fn record(&mut self, params: &ParameterSet, remark: String) {
        self.current = analyze(params);
        debug!(profile = %self.active_profile_id, remark = %remark, "session recomputed");
        self.history
            .push(HistoryEntry::from_report(&self.active_profile_id, &self.current, remark));
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn origin(&self) -> &DatasetOrigin {
        &self.origin
    }

    pub fn active_profile_id(&self) -> &str {
        &self.active_profile_id
    }

    /// The active profile as stored in the dataset
    pub fn active_profile(&self) -> Option<&DesignProfile> {
        self.dataset.profile(&self.active_profile_id)
    }

    /// Latest report
    pub fn current(&self) -> &AnalysisReport {
        &self.current
    }

    pub fn history(&self) -> &AnalysisHistory {
        &self.history
    }
}
