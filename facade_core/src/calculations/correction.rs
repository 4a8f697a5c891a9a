//! # Dimensional Error Correction
//!
//! Models a fixed five-step correction sequence. The module's drift (from
//! curvature and thermal gradient) is reduced by a linearly decaying factor
//! at each step, the tilt response is scaled the same way, and the four
//! geometry path weights are reused cyclically as the per-step reweighting.
//!
//! The series always runs exactly [`ITERATION_COUNT`] steps. There is no
//! convergence test and no early exit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::geometry::Geometry;
use crate::parameters::{ParamName, ParameterSet};
use crate::units::round_dp;

/// Length of the correction series
pub const ITERATION_COUNT: usize = 5;

/// Share of the final deviation left as residual
const RESIDUAL_FRACTION: f64 = 0.45;

/// One step of the correction series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionIteration {
    /// 1-based step number
    pub iteration: u32,
    /// Remaining dimensional deviation (mm, 3 decimals)
    pub deviation_mm: f64,
    /// Remaining shape offset (degrees, 3 decimals)
    pub shape_offset_deg: f64,
    /// Path weight applied at this step (3 decimals)
    pub path_reweight: f64,
}

/// Correction results.
///
/// ## JSON Example
///
/// ```json
/// {
///   "iterations": [
///     { "iteration": 1, "deviationMm": 0.717, "shapeOffsetDeg": 1.98, "pathReweight": 0.223 }
///   ],
///   "residualDeviation": 0.108,
///   "assemblySuitability": 98.7
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResult {
    /// Exactly [`ITERATION_COUNT`] steps in order
    pub iterations: Vec<CorrectionIteration>,
    /// Deviation left after the series (mm, 3 decimals)
    pub residual_deviation: f64,
    /// Post-correction dimensional readiness (0-100, 2 decimals)
    pub assembly_suitability: f64,
}

/// Reduction factor for a 0-based step: `0.72 - 0.12 i`
pub fn reduction_factor(step: usize) -> f64 {
    0.72 - step as f64 * 0.12
}

/// Initial drift: curvature share plus thermal share.
pub fn drift(curvature_influence: f64, thermal_gradient: f64) -> f64 {
    curvature_influence * 0.18 + thermal_gradient * 0.014
}

/// Run the correction series.
pub fn correct(params: &ParameterSet, geometry: &Geometry) -> CorrectionResult {
    let coefficients = &geometry.dynamic_coefficients;
    let drift = drift(
        coefficients.curvature_influence,
        params.value(ParamName::ThermalGradient),
    );

    let iterations: Vec<CorrectionIteration> = (0..ITERATION_COUNT)
        .map(|step| {
            let reduction = reduction_factor(step);
            let weight = geometry.path_weights[step % geometry.path_weights.len()];
            CorrectionIteration {
                iteration: step as u32 + 1,
                deviation_mm: round_dp(drift * reduction, 3),
                shape_offset_deg: round_dp(coefficients.tilt_response * reduction, 3),
                path_reweight: round_dp(weight, 3),
            }
        })
        .collect();

    let final_deviation = iterations
        .last()
        .map_or(f64::NAN, |step| step.deviation_mm);
    let residual_deviation = round_dp(final_deviation * RESIDUAL_FRACTION, 3);
    let assembly_suitability = round_dp(100.0 - residual_deviation * 12.0, 2).clamp(0.0, 100.0);

    debug!(drift, residual_deviation, assembly_suitability, "correction series complete");

    CorrectionResult {
        iterations,
        residual_deviation,
        assembly_suitability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::geometry;
    use crate::calculations::test_support::{assert_close, east_atrium, north_ribbon, offset_bay};

    fn run(params: &ParameterSet) -> CorrectionResult {
        correct(params, &geometry::generate(params))
    }

    #[test]
    fn test_always_five_iterations() {
        let result = run(&east_atrium());
        assert_eq!(result.iterations.len(), ITERATION_COUNT);
        let numbers: Vec<u32> = result.iterations.iter().map(|i| i.iteration).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_east_atrium_series() {
        let result = run(&east_atrium());
        // drift = 4.29 * 0.18 + 16 * 0.014 = 0.9962
        assert_close(result.iterations[0].deviation_mm, 0.717);
        assert_close(result.iterations[0].shape_offset_deg, 1.98);
        assert_close(result.iterations[4].deviation_mm, 0.239);
        assert_close(result.iterations[4].shape_offset_deg, 0.66);
        assert_close(result.residual_deviation, 0.108);
        assert_close(result.assembly_suitability, 98.7);
    }

    #[test]
    fn test_residual_from_short_final_step() {
        // drift = 1.21 * 0.18 - 6.5 * 0.014 = 0.1268
        // 0.030 * 0.45 is stored just below 0.0135
        let result = run(&offset_bay());
        assert_close(result.iterations[4].deviation_mm, 0.03);
        assert_close(result.residual_deviation, 0.013);
        assert_close(result.assembly_suitability, 99.84);
    }

    #[test]
    fn test_path_weights_reused_cyclically() {
        let params = north_ribbon();
        let geometry = geometry::generate(&params);
        let result = correct(&params, &geometry);
        assert_eq!(result.iterations[4].path_reweight, result.iterations[0].path_reweight);
        assert_eq!(result.iterations[3].path_reweight, geometry.path_weights[3]);
    }

    #[test]
    fn test_deviation_decays() {
        let result = run(&east_atrium());
        for pair in result.iterations.windows(2) {
            assert!(pair[1].deviation_mm < pair[0].deviation_mm);
        }
    }

    #[test]
    fn test_reduction_factors() {
        assert_close(reduction_factor(0), 0.72);
        assert_close(reduction_factor(4), 0.24);
    }

    #[test]
    fn test_suitability_clamped() {
        let params = east_atrium().with(ParamName::ThermalGradient, 10_000.0);
        assert_eq!(run(&params).assembly_suitability, 0.0);

        let params = east_atrium().with(ParamName::ThermalGradient, -10_000.0);
        assert_eq!(run(&params).assembly_suitability, 100.0);
    }
}
