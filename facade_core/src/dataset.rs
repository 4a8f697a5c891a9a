//! # Dataset I/O
//!
//! Reads and writes the design dataset: the list of design profiles, the
//! active profile id and, when written by the seed command, a precomputed
//! snapshot of the active profile's analysis.
//!
//! - **Best-effort load**: [`load_or_fallback`] never fails. Any read, parse
//!   or empty-dataset error substitutes the built-in profiles and records why.
//! - **Atomic saves**: write to a temp file, fsync, rename.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "generatedAt": "2025-01-01T00:00:00Z",
//!   "activeProfileId": "DX-01",
//!   "profiles": [
//!     { "id": "DX-01", "name": "Hyperbolic East Atrium", "module_width": 1.25, "material": "aluminum" }
//!   ],
//!   "integrity": {}, "geometry": {}, "structural": {}, "corrections": {}, "association": {}
//! }
//! ```
//!
//! The five snapshot keys are optional. A snapshot that does not parse is
//! dropped with a warning and the profiles still load.
//!
//! ## Example
//!
//! ```rust,no_run
//! use facade_core::dataset::{load_or_fallback, DatasetOrigin};
//! use std::path::Path;
//!
//! let loaded = load_or_fallback(Path::new("data/system_dataset.json"));
//! if let DatasetOrigin::Fallback { reason } = &loaded.origin {
//!     eprintln!("using built-in profiles: {}", reason);
//! }
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculations::{analyze, AnalysisReport};
use crate::errors::{FacadeError, FacadeResult};
use crate::parameters::{Material, ParamName, ParameterSet};

/// Dataset path used when none is configured
pub const DEFAULT_DATASET_PATH: &str = "data/system_dataset.json";

/// Top-level keys holding the snapshot report
const SNAPSHOT_KEYS: [&str; 5] = ["integrity", "geometry", "structural", "corrections", "association"];

/// A named parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignProfile {
    /// Profile identifier (e.g., "DX-01")
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub parameters: ParameterSet,
}

impl DesignProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parameters: ParameterSet) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parameters,
        }
    }
}

/// The dataset file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub generated_at: DateTime<Utc>,
    pub active_profile_id: String,
    pub profiles: Vec<DesignProfile>,
    /// Analysis of the active profile as written by the seed command
    #[serde(flatten)]
    pub snapshot: Option<AnalysisReport>,
}

impl Dataset {
    /// Look up a profile by id
    pub fn profile(&self, id: &str) -> Option<&DesignProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// The active profile, or the first profile when the active id is unknown
    pub fn active_profile(&self) -> Option<&DesignProfile> {
        self.profile(&self.active_profile_id)
            .or_else(|| self.profiles.first())
    }

    /// Profile ids in file order
    pub fn profile_ids(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.id.as_str()).collect()
    }
}

/// Where a loaded dataset came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetOrigin {
    /// Read from this file
    File(PathBuf),
    /// Built-in profiles, with the reason the file was not used
    Fallback { reason: String },
}

/// A dataset together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub origin: DatasetOrigin,
}

impl LoadedDataset {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, DatasetOrigin::Fallback { .. })
    }
}

// ============================================================================
// Built-in Profiles
// ============================================================================

fn builtin_profile(id: &str, name: &str, values: [f64; 9], material: Material) -> DesignProfile {
    let parameters = ParamName::ALL
        .iter()
        .zip(values)
        .fold(ParameterSet::default(), |params, (param, value)| params.with(*param, value))
        .with_material(material);
    DesignProfile::new(id, name, parameters)
}

static BUILTIN_PROFILES: Lazy<Vec<DesignProfile>> = Lazy::new(|| {
    vec![
        builtin_profile(
            "DX-01",
            "Hyperbolic East Atrium",
            [1.25, 3.45, 0.24, 28.0, 3.5, 1.42, 0.021, 34.0, 16.0],
            Material::Aluminum,
        ),
        builtin_profile(
            "DX-02",
            "North Tower Ribbon",
            [1.1, 3.0, 0.22, 45.0, 2.0, 1.5, 0.019, 38.0, 12.0],
            Material::Glass,
        ),
        builtin_profile(
            "DX-03",
            "Skywalk Link Gallery",
            [1.35, 3.8, 0.27, 24.0, 5.2, 1.32, 0.024, 42.0, 18.0],
            Material::Steel,
        ),
    ]
});

/// Dataset of the built-in profiles with DX-01 active and no snapshot.
pub fn fallback_dataset() -> Dataset {
    Dataset {
        generated_at: Utc::now(),
        active_profile_id: BUILTIN_PROFILES[0].id.clone(),
        profiles: BUILTIN_PROFILES.clone(),
        snapshot: None,
    }
}

/// Fallback dataset plus the analysis snapshot of its active profile.
pub fn seed_dataset() -> Dataset {
    let mut dataset = fallback_dataset();
    dataset.snapshot = dataset
        .active_profile()
        .map(|profile| analyze(&profile.parameters));
    dataset
}

// ============================================================================
// Load / Save
// ============================================================================

/// Load a dataset from a JSON file.
///
/// # Returns
///
/// * `Err(FacadeError::FileError)` - I/O error
/// * `Err(FacadeError::SerializationError)` - Invalid JSON or schema
/// * `Err(FacadeError::EmptyDataset)` - No profiles
pub fn load_dataset(path: &Path) -> FacadeResult<Dataset> {
    let mut file = File::open(path)
        .map_err(|e| FacadeError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| FacadeError::file_error("read", path.display().to_string(), e.to_string()))?;

    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| FacadeError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;
    let dataset = Dataset::deserialize(&value)
        .map_err(|e| FacadeError::serialization(format!("Invalid dataset in {}: {}", path.display(), e)))?;

    if dataset.profiles.is_empty() {
        return Err(FacadeError::EmptyDataset);
    }

    if dataset.snapshot.is_none() {
        if let Some(reason) = snapshot_rejection(&value) {
            warn!(path = %path.display(), %reason, "dataset snapshot ignored");
        }
    }

    info!(path = %path.display(), profiles = dataset.profiles.len(), "dataset loaded");
    Ok(dataset)
}

/// Load a dataset, substituting the built-in profiles on any failure.
pub fn load_or_fallback(path: &Path) -> LoadedDataset {
    match load_dataset(path) {
        Ok(dataset) => LoadedDataset {
            dataset,
            origin: DatasetOrigin::File(path.to_path_buf()),
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "dataset unavailable, using built-in profiles");
            LoadedDataset {
                dataset: fallback_dataset(),
                origin: DatasetOrigin::Fallback {
                    reason: err.to_string(),
                },
            }
        }
    }
}

/// Save a dataset with atomic write semantics, creating parent directories.
pub fn save_dataset(dataset: &Dataset, path: &Path) -> FacadeResult<()> {
    let json = serde_json::to_string_pretty(dataset).map_err(|e| FacadeError::serialization(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            FacadeError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }

    let tmp_path = temp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        FacadeError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        FacadeError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        FacadeError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        FacadeError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), bytes = json.len(), "dataset saved");
    Ok(())
}

/// Why a snapshot present in the file did not parse, `None` when the file
/// carries no snapshot keys.
fn snapshot_rejection(value: &serde_json::Value) -> Option<String> {
    let object = value.as_object()?;
    if !SNAPSHOT_KEYS.iter().any(|key| object.contains_key(*key)) {
        return None;
    }
    AnalysisReport::deserialize(value).err().map(|e| e.to_string())
}

/// `<name>.tmp` next to the target file
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_profiles() {
        let dataset = fallback_dataset();
        assert_eq!(dataset.profile_ids(), vec!["DX-01", "DX-02", "DX-03"]);
        assert_eq!(dataset.active_profile_id, "DX-01");
        assert_eq!(dataset.active_profile().unwrap().name, "Hyperbolic East Atrium");
        assert_eq!(dataset.profile("DX-03").unwrap().parameters.material, Some(Material::Steel));
        assert!(dataset.snapshot.is_none());
    }

    #[test]
    fn test_active_profile_falls_back_to_first() {
        let mut dataset = fallback_dataset();
        dataset.active_profile_id = "DX-99".to_string();
        assert_eq!(dataset.active_profile().unwrap().id, "DX-01");
        assert!(dataset.profile("DX-99").is_none());
    }

    #[test]
    fn test_seed_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("system_dataset.json");

        let seed = seed_dataset();
        save_dataset(&seed, &path).unwrap();
        assert!(!temp_path_for(&path).exists());

        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded, seed);
        let snapshot = loaded.snapshot.unwrap();
        assert_eq!(snapshot.geometry.frame_weight, 23.75);
    }

    #[test]
    fn test_profile_fields_are_flat() {
        let json = serde_json::to_value(&seed_dataset()).unwrap();
        let first = &json["profiles"][0];
        assert_eq!(first["id"], "DX-01");
        assert_eq!(first["module_width"], 1.25);
        assert_eq!(first["material"], "aluminum");
        assert!(json.get("activeProfileId").is_some());
        assert!(json.get("corrections").is_some());
    }

    #[test]
    fn test_load_without_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        fs::write(
            &path,
            r#"{
                "generatedAt": "2025-03-01T08:00:00Z",
                "activeProfileId": "P-1",
                "profiles": [
                    { "id": "P-1", "name": "Test", "module_width": 1.2, "curvature_radius": 30, "material": "bronze" }
                ]
            }"#,
        )
        .unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert!(dataset.snapshot.is_none());
        let params = &dataset.active_profile().unwrap().parameters;
        assert_eq!(params.curvature_radius, Some(30.0));
        assert_eq!(params.module_height, None);
        assert_eq!(params.material, Some(Material::Other("bronze".to_string())));
    }

    #[test]
    fn test_snapshot_with_null_value_is_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system_dataset.json");

        let mut json = serde_json::to_value(seed_dataset()).unwrap();
        json["structural"]["windPressure"] = serde_json::Value::Null;
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert!(dataset.snapshot.is_none());
        assert_eq!(dataset.profiles.len(), 3);
        assert!(snapshot_rejection(&json).is_some());
    }

    #[test]
    fn test_snapshot_rejection_needs_snapshot_keys() {
        let without = serde_json::to_value(fallback_dataset()).unwrap();
        assert_eq!(snapshot_rejection(&without), None);

        let with = serde_json::to_value(seed_dataset()).unwrap();
        assert_eq!(snapshot_rejection(&with), None);
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"generatedAt":"2025-03-01T08:00:00Z","activeProfileId":"","profiles":[]}"#).unwrap();
        assert_eq!(load_dataset(&path), Err(FacadeError::EmptyDataset));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempdir().unwrap();
        let loaded = load_or_fallback(&dir.path().join("absent.json"));
        assert!(loaded.is_fallback());
        assert_eq!(loaded.dataset.profiles.len(), 3);
        match loaded.origin {
            DatasetOrigin::Fallback { reason } => assert!(reason.contains("File error")),
            other => panic!("unexpected origin {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_dataset(&path), Err(FacadeError::SerializationError { .. })));
        assert!(load_or_fallback(&path).is_fallback());
    }

    #[test]
    fn test_file_origin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        save_dataset(&fallback_dataset(), &path).unwrap();
        assert_eq!(load_or_fallback(&path).origin, DatasetOrigin::File(path));
    }
}
