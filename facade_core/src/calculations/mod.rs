//! # Indicator Pipeline
//!
//! Five stages turn one [`ParameterSet`] into a full [`AnalysisReport`]:
//!
//! - [`integrity`] - completeness and rule conformance
//! - [`geometry`] - envelope, control points, path weights, coefficients
//! - [`structural`] - wind and dead load, stress profile, stability
//! - [`correction`] - fixed five-step deviation reduction
//! - [`association`] - stage correlations and the linkage table
//!
//! Geometry feeds the structural and correction stages; correction feeds
//! association. Nothing feeds back, and every stage is a pure function.
//!
//! ## Entry Points
//!
//! - [`analyze`] is total: missing fields propagate as NaN and zero divisors
//!   produce non-finite values.
//! - [`calculate`] validates first and returns a [`FacadeError`] instead.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::calculations::calculate;
//! use facade_core::parameters::{Material, ParameterSet, ParamName};
//!
//! let params = ParameterSet::default()
//!     .with(ParamName::ModuleWidth, 1.25)
//!     .with(ParamName::ModuleHeight, 3.45)
//!     .with(ParamName::ModuleDepth, 0.24)
//!     .with(ParamName::CurvatureRadius, 28.0)
//!     .with(ParamName::TiltAngle, 3.5)
//!     .with(ParamName::MullionSpacing, 1.42)
//!     .with(ParamName::PanelThickness, 0.021)
//!     .with(ParamName::WindSpeed, 34.0)
//!     .with(ParamName::ThermalGradient, 16.0)
//!     .with_material(Material::Aluminum);
//!
//! let report = calculate(&params).unwrap();
//! assert_eq!(report.integrity.completeness_score, 100.0);
//! assert_eq!(report.structural.stress_distribution.len(), 7);
//! ```
//!
//! [`FacadeError`]: crate::errors::FacadeError

pub mod association;
pub mod correction;
pub mod geometry;
pub mod integrity;
pub mod structural;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::FacadeResult;
use crate::parameters::ParameterSet;

pub use association::{AssociationResult, LinkageRow, Stage, StageCorrelation};
pub use correction::{CorrectionIteration, CorrectionResult};
pub use geometry::{ControlPoint, DynamicCoefficients, Geometry};
pub use integrity::IntegrityResult;
pub use structural::{StressSample, StructuralResult};

/// All five stage results for one parameter set.
///
/// Serializes with the same keys the dataset snapshot uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub integrity: IntegrityResult,
    pub geometry: Geometry,
    pub structural: StructuralResult,
    pub corrections: CorrectionResult,
    pub association: AssociationResult,
}

impl AnalysisReport {
    /// True when every headline indicator is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.geometry.projected_area,
            self.geometry.frame_weight,
            self.structural.wind_pressure,
            self.structural.stability_index,
            self.corrections.residual_deviation,
            self.corrections.assembly_suitability,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Run every stage. Never fails.
pub fn analyze(params: &ParameterSet) -> AnalysisReport {
    let integrity = integrity::score(params);
    let geometry = geometry::generate(params);
    let structural = structural::analyze(params, &geometry);
    let corrections = correction::correct(params, &geometry);
    let association = association::associate(params, corrections.assembly_suitability);

    debug!(
        rule_match = integrity.rule_match_score,
        stability = structural.stability_index,
        suitability = corrections.assembly_suitability,
        "pipeline complete"
    );

    AnalysisReport {
        integrity,
        geometry,
        structural,
        corrections,
        association,
    }
}

/// Validate, then run every stage.
pub fn calculate(params: &ParameterSet) -> FacadeResult<AnalysisReport> {
    params.validate()?;
    Ok(analyze(params))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::parameters::{Material, ParamName, ParameterSet};

    fn profile(values: [f64; 9], material: Material) -> ParameterSet {
        ParamName::ALL
            .iter()
            .zip(values)
            .fold(ParameterSet::default(), |params, (name, value)| params.with(*name, value))
            .with_material(material)
    }

    /// DX-01
    pub fn east_atrium() -> ParameterSet {
        profile([1.25, 3.45, 0.24, 28.0, 3.5, 1.42, 0.021, 34.0, 16.0], Material::Aluminum)
    }

    /// DX-02
    pub fn north_ribbon() -> ParameterSet {
        profile([1.1, 3.0, 0.22, 45.0, 2.0, 1.5, 0.019, 38.0, 12.0], Material::Glass)
    }

    /// DX-03
    pub fn skywalk() -> ParameterSet {
        profile([1.35, 3.8, 0.27, 24.0, 5.2, 1.32, 0.024, 42.0, 18.0], Material::Steel)
    }

    /// Flat, lightly tilted bay whose outputs sit close to rounding midpoints
    pub fn offset_bay() -> ParameterSet {
        profile([1.304, 2.551, 0.175, 98.8, 4.54, 1.5, 0.022, 30.0, -6.5], Material::Aluminum)
    }

    #[track_caller]
    pub fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }
}
