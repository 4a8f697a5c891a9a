//! # Structural Verification
//!
//! Derives wind pressure and frame dead load, samples a stress profile at
//! seven equally spaced nodes up the module height, and summarizes how much
//! the optimized profile relieves the generated one.
//!
//! ## Formulas
//!
//! - Exposure: `e = 0.5 + h / 12`
//! - Wind pressure: `q = 0.613 * v² * e / 1000`
//! - Dead load: `g = W * 0.0098`
//! - Baseline stress: `s = sqrt(q² + g²)`
//! - Node gradient: `1 + (i / 6) * 0.32`
//! - Stability: `100 - 38 * mean(|generated - optimized|)`, clamped to 0..=100
//!
//! ## Assumptions
//!
//! - Heuristic profile, not a finite-element solution
//! - Stress rises linearly with elevation; curvature amplifies it by `1 + k/400`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::geometry::Geometry;
use crate::parameters::{ParamName, ParameterSet};
use crate::units::{mean, round_dp};

/// Number of sampled nodes along the module height
pub const NODE_COUNT: usize = 7;

/// Air density term of the wind pressure formula
const WIND_PRESSURE_COEFFICIENT: f64 = 0.613;

/// Converts frame weight to dead load
const DEAD_LOAD_FACTOR: f64 = 0.0098;

/// One sample of the stress profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressSample {
    /// 1-based node number
    pub node: u32,
    /// Height above the module base (m, 2 decimals)
    pub elevation: f64,
    /// Baseline stress times gradient (3 decimals)
    pub baseline: f64,
    /// Baseline amplified by curvature (3 decimals)
    pub generated: f64,
    /// Generated stress after optimization relief (3 decimals)
    pub optimized: f64,
}

impl StressSample {
    /// Stress removed by optimization at this node
    pub fn relief(&self) -> f64 {
        (self.generated - self.optimized).abs()
    }
}

/// Structural verification results.
///
/// ## JSON Example
///
/// ```json
/// {
///   "windPressure": 0.558,
///   "deadLoad": 0.233,
///   "stabilityIndex": 96.56,
///   "stressDistribution": [
///     { "node": 1, "elevation": 0.0, "baseline": 0.605, "generated": 0.611, "optimized": 0.562 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralResult {
    /// Wind pressure (kPa, 3 decimals)
    pub wind_pressure: f64,
    /// Frame dead load (3 decimals)
    pub dead_load: f64,
    /// Stress-optimization consistency (0-100, 2 decimals)
    pub stability_index: f64,
    /// Exactly [`NODE_COUNT`] samples, base to top
    pub stress_distribution: Vec<StressSample>,
}

impl StructuralResult {
    /// Highest generated stress in the profile
    pub fn peak_generated(&self) -> f64 {
        self.stress_distribution
            .iter()
            .map(|s| s.generated)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Wind pressure from wind speed and module height.
pub fn wind_pressure(wind_speed: f64, module_height: f64) -> f64 {
    let exposure = 0.5 + module_height / 12.0;
    WIND_PRESSURE_COEFFICIENT * wind_speed.powi(2) * exposure / 1000.0
}

/// Run structural verification for a module.
pub fn analyze(params: &ParameterSet, geometry: &Geometry) -> StructuralResult {
    let height = params.value(ParamName::ModuleHeight);
    let wind = wind_pressure(params.value(ParamName::WindSpeed), height);
    let dead_load = geometry.frame_weight * DEAD_LOAD_FACTOR;

    let last = (NODE_COUNT - 1) as f64;
    let step = height / last;
    let baseline_stress = (wind.powi(2) + dead_load.powi(2)).sqrt();
    let amplification = 1.0 + geometry.dynamic_coefficients.curvature_influence / 400.0;

    let stress_distribution: Vec<StressSample> = (0..NODE_COUNT)
        .map(|index| {
            let i = index as f64;
            let gradient = 1.0 + (i / last) * 0.32;
            let generated = baseline_stress * gradient * amplification;
            let optimized = generated * (0.92 - i * 0.015);
            StressSample {
                node: index as u32 + 1,
                elevation: round_dp(step * i, 2),
                baseline: round_dp(baseline_stress * gradient, 3),
                generated: round_dp(generated, 3),
                optimized: round_dp(optimized, 3),
            }
        })
        .collect();

    let reliefs: Vec<f64> = stress_distribution.iter().map(StressSample::relief).collect();
    let stability_index = round_dp(100.0 - mean(&reliefs) * 38.0, 2).clamp(0.0, 100.0);

    debug!(wind_pressure = wind, dead_load, baseline_stress, stability_index, "structure verified");

    StructuralResult {
        wind_pressure: round_dp(wind, 3),
        dead_load: round_dp(dead_load, 3),
        stability_index,
        stress_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::geometry;
    use crate::calculations::test_support::{assert_close, east_atrium, skywalk};

    fn run(params: &ParameterSet) -> StructuralResult {
        analyze(params, &geometry::generate(params))
    }

    #[test]
    fn test_east_atrium_loads() {
        let result = run(&east_atrium());
        assert_close(result.wind_pressure, 0.558);
        // 23.75 * 0.0098 = 0.23275
        assert_close(result.dead_load, 0.233);
        assert_close(result.stability_index, 96.56);
    }

    #[test]
    fn test_profile_shape() {
        let result = run(&east_atrium());
        assert_eq!(result.stress_distribution.len(), NODE_COUNT);

        let first = &result.stress_distribution[0];
        assert_eq!(first.node, 1);
        assert_eq!(first.elevation, 0.0);
        assert_close(first.generated, 0.611);
        assert_close(first.optimized, 0.562);

        let top = &result.stress_distribution[NODE_COUNT - 1];
        assert_eq!(top.node, 7);
        assert_close(top.elevation, 3.45);
        assert_close(top.baseline, 0.798);
        assert_close(top.generated, 0.807);
        assert_close(top.optimized, 0.67);
    }

    #[test]
    fn test_top_elevation_below_midpoint() {
        let params = east_atrium().with(ParamName::ModuleHeight, 5.215);
        let result = run(&params);
        assert_close(result.stress_distribution[NODE_COUNT - 1].elevation, 5.21);
    }

    #[test]
    fn test_elevation_strictly_increasing() {
        let result = run(&skywalk());
        for pair in result.stress_distribution.windows(2) {
            assert!(pair[1].elevation > pair[0].elevation);
            assert_eq!(pair[1].node, pair[0].node + 1);
        }
    }

    #[test]
    fn test_generated_rises_with_height() {
        let result = run(&skywalk());
        for pair in result.stress_distribution.windows(2) {
            assert!(pair[1].generated >= pair[0].generated);
        }
        assert_close(result.peak_generated(), 1.691);
    }

    #[test]
    fn test_wind_pressure_formula() {
        // 0.613 * 34² * (0.5 + 3.45/12) / 1000
        let q = wind_pressure(34.0, 3.45);
        assert!((q - 0.55804455).abs() < 1e-9);
        assert_eq!(wind_pressure(0.0, 3.45), 0.0);
    }

    #[test]
    fn test_stability_clamped() {
        let params = east_atrium().with(ParamName::WindSpeed, 400.0);
        let result = run(&params);
        assert_eq!(result.stability_index, 0.0);
    }

    #[test]
    fn test_missing_wind_speed_is_nan() {
        let mut params = east_atrium();
        params.wind_speed = None;
        let result = run(&params);
        assert!(result.wind_pressure.is_nan());
        assert!(result.stability_index.is_nan());
    }
}
