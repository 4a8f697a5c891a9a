//! # Module Geometry
//!
//! Synthesizes the module's envelope quantities, a four-point control
//! polyline across its face, the relative weights of the four generation
//! paths, and the dynamic coefficients consumed by the structural and
//! correction stages.
//!
//! ## Formulas
//!
//! - Projected area: `A = w * h`
//! - Envelope volume: `V = A * d`
//! - Frame weight: `W = V * rho * 0.85`
//! - Curvature factor: `k = 1 / max(R, 1)`
//!
//! Frame weight, curvature influence and tilt response are rounded when
//! produced and consumed downstream in rounded form.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::calculations::geometry::generate;
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
//!     .with_material(Material::Aluminum);
//!
//! let geometry = generate(&params);
//! assert_eq!(geometry.projected_area, 4.313);
//! assert_eq!(geometry.frame_weight, 23.75);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parameters::{ParamName, ParameterSet};
use crate::units::{max_or_nan, round_dp, Degrees, Radians};

/// Fraction of envelope mass attributed to the frame
pub const FRAME_MASS_FRACTION: f64 = 0.85;

/// Control point fractions of (width, height), excluding the origin
const CONTROL_FRACTIONS: [(f64, f64); 2] = [(0.4, 0.18), (0.65, 0.55)];

/// Point on the module face, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint(pub f64, pub f64);

impl ControlPoint {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }
}

/// Scalars describing how the module responds to its shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicCoefficients {
    /// `k * 120`, 2 decimals
    pub curvature_influence: f64,
    /// `sin(tilt) * 45`, 2 decimals
    pub tilt_response: f64,
    /// Mullion spacing over module width, 3 decimals
    pub mullion_coupling: f64,
    /// Panel thickness over module depth, 3 decimals
    pub thickness_ratio: f64,
}

/// Geometry synthesis results.
///
/// ## JSON Example
///
/// ```json
/// {
///   "projectedArea": 4.313,
///   "envelopeVolume": 1.035,
///   "frameWeight": 23.75,
///   "controlPoints": [[0.0, 0.0], [0.5, 0.621], [0.8125, 1.8975], [1.25, 3.45]],
///   "pathWeights": [0.223, 0.077, 0.689, 0.011],
///   "dynamicCoefficients": {
///     "curvatureInfluence": 4.29,
///     "tiltResponse": 2.75,
///     "mullionCoupling": 1.136,
///     "thicknessRatio": 0.088
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Face area (m², 3 decimals)
    pub projected_area: f64,

    /// Area times depth (m³, 3 decimals)
    pub envelope_volume: f64,

    /// Frame weight (2 decimals)
    pub frame_weight: f64,

    /// Origin, two interior guide points, far corner
    pub control_points: [ControlPoint; 4],

    /// Relative weights of the construction, envelope, load-balance and
    /// thickness paths (3 decimals each, sum 1 within rounding)
    pub path_weights: [f64; 4],

    pub dynamic_coefficients: DynamicCoefficients,
}

impl Geometry {
    /// Sum of the rounded path weights
    pub fn path_weight_total(&self) -> f64 {
        self.path_weights.iter().sum()
    }
}

/// Derive geometry from a parameter set.
///
/// Reads width, height, depth, curvature radius, tilt, mullion spacing,
/// panel thickness and material. Missing fields propagate as NaN; a zero
/// width or depth yields non-finite ratios.
pub fn generate(params: &ParameterSet) -> Geometry {
    let width = params.value(ParamName::ModuleWidth);
    let height = params.value(ParamName::ModuleHeight);
    let depth = params.value(ParamName::ModuleDepth);
    let radius = params.value(ParamName::CurvatureRadius);
    let mullion = params.value(ParamName::MullionSpacing);
    let thickness = params.value(ParamName::PanelThickness);

    let area = width * height;
    let volume = area * depth;
    let curvature_factor = 1.0 / max_or_nan(radius, 1.0);
    let tilt: Radians = Degrees(params.value(ParamName::TiltAngle)).into();

    let frame_weight = round_dp(volume * params.density() * FRAME_MASS_FRACTION, 2);

    let [(x1, y1), (x2, y2)] = CONTROL_FRACTIONS;
    let control_points = [
        ControlPoint(0.0, 0.0),
        ControlPoint(round_dp(width * x1, 3), round_dp(height * y1, 3)),
        ControlPoint(round_dp(width * x2, 4), round_dp(height * y2, 4)),
        ControlPoint(round_dp(width, 4), round_dp(height, 4)),
    ];

    let raw_weights = [
        area,
        volume * (1.0 + curvature_factor * 12.0),
        frame_weight * (0.5 + tilt.abs()),
        thickness * 10.0,
    ];
    let total: f64 = raw_weights.iter().sum();
    let path_weights = raw_weights.map(|w| round_dp(w / total, 3));

    let dynamic_coefficients = DynamicCoefficients {
        curvature_influence: round_dp(curvature_factor * 120.0, 2),
        tilt_response: round_dp(tilt.sin() * 45.0, 2),
        mullion_coupling: round_dp(mullion / width, 3),
        thickness_ratio: round_dp(thickness / depth, 3),
    };

    debug!(area, volume, frame_weight, ?path_weights, "geometry generated");

    Geometry {
        projected_area: round_dp(area, 3),
        envelope_volume: round_dp(volume, 3),
        frame_weight,
        control_points,
        path_weights,
        dynamic_coefficients,
    }
}
