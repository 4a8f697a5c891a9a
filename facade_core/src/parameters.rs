//! # Facade Module Parameters
//!
//! The typed input to the indicator pipeline: nine numeric fields describing
//! one repeating facade module plus its frame material.
//!
//! Numeric fields are optional. An absent or NaN field counts as *missing*
//! for integrity scoring; the downstream stages read it as NaN and produce
//! non-finite results rather than failing. Use [`ParameterSet::validate`]
//! (or [`crate::calculations::calculate`]) when a hard failure is wanted.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "module_width": 1.25,
//!   "module_height": 3.45,
//!   "module_depth": 0.24,
//!   "curvature_radius": 28.0,
//!   "tilt_angle": 3.5,
//!   "mullion_spacing": 1.42,
//!   "panel_thickness": 0.021,
//!   "wind_speed": 34.0,
//!   "thermal_gradient": 16.0,
//!   "material": "aluminum"
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{FacadeError, FacadeResult};

/// Density used when the material is absent or not in the table
pub const DEFAULT_DENSITY: f64 = 30.0;

// ============================================================================
// Parameter Names
// ============================================================================

/// Name of a numeric module parameter.
///
/// Declaration order is the display order used by integrity indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamName {
    ModuleWidth,
    ModuleHeight,
    ModuleDepth,
    CurvatureRadius,
    TiltAngle,
    MullionSpacing,
    PanelThickness,
    WindSpeed,
    ThermalGradient,
}

impl ParamName {
    /// Every numeric parameter, in declaration order
    pub const ALL: [ParamName; 9] = [
        ParamName::ModuleWidth,
        ParamName::ModuleHeight,
        ParamName::ModuleDepth,
        ParamName::CurvatureRadius,
        ParamName::TiltAngle,
        ParamName::MullionSpacing,
        ParamName::PanelThickness,
        ParamName::WindSpeed,
        ParamName::ThermalGradient,
    ];

    /// Field name as it appears in dataset JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamName::ModuleWidth => "module_width",
            ParamName::ModuleHeight => "module_height",
            ParamName::ModuleDepth => "module_depth",
            ParamName::CurvatureRadius => "curvature_radius",
            ParamName::TiltAngle => "tilt_angle",
            ParamName::MullionSpacing => "mullion_spacing",
            ParamName::PanelThickness => "panel_thickness",
            ParamName::WindSpeed => "wind_speed",
            ParamName::ThermalGradient => "thermal_gradient",
        }
    }

    /// Human-readable label (e.g., "Module Width")
    pub fn display_name(&self) -> &'static str {
        match self {
            ParamName::ModuleWidth => "Module Width",
            ParamName::ModuleHeight => "Module Height",
            ParamName::ModuleDepth => "Module Depth",
            ParamName::CurvatureRadius => "Curvature Radius",
            ParamName::TiltAngle => "Tilt Angle",
            ParamName::MullionSpacing => "Mullion Spacing",
            ParamName::PanelThickness => "Panel Thickness",
            ParamName::WindSpeed => "Wind Speed",
            ParamName::ThermalGradient => "Thermal Gradient",
        }
    }

    /// Unit of the stored value
    pub fn unit(&self) -> &'static str {
        match self {
            ParamName::ModuleWidth
            | ParamName::ModuleHeight
            | ParamName::ModuleDepth
            | ParamName::CurvatureRadius
            | ParamName::MullionSpacing
            | ParamName::PanelThickness => "m",
            ParamName::TiltAngle => "deg",
            ParamName::WindSpeed => "m/s",
            ParamName::ThermalGradient => "K",
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = FacadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| FacadeError::invalid_input("parameter", s, "Unknown parameter name"))
    }
}

// ============================================================================
// Material
// ============================================================================

/// Frame material of a module.
///
/// Serializes as a lowercase string. Names outside the table are kept
/// verbatim as [`Material::Other`] and use [`DEFAULT_DENSITY`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Material {
    Aluminum,
    Glass,
    Steel,
    Other(String),
}

impl Material {
    /// Density factor used for frame weight
    pub fn density(&self) -> f64 {
        match self {
            Material::Aluminum => 27.0,
            Material::Glass => 25.0,
            Material::Steel => 78.5,
            Material::Other(_) => DEFAULT_DENSITY,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Material::Aluminum => "aluminum",
            Material::Glass => "glass",
            Material::Steel => "steel",
            Material::Other(name) => name,
        }
    }

    /// Whether this material has a tabulated density
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Material::Other(_))
    }
}

impl From<String> for Material {
    fn from(name: String) -> Self {
        match name.as_str() {
            "aluminum" => Material::Aluminum,
            "glass" => Material::Glass,
            "steel" => Material::Steel,
            _ => Material::Other(name),
        }
    }
}

impl From<Material> for String {
    fn from(material: Material) -> Self {
        material.as_str().to_string()
    }
}

impl FromStr for Material {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Material::from(s.to_string()))
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parameter Set
// ============================================================================

/// One facade module's parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Module width (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_width: Option<f64>,

    /// Module height (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_height: Option<f64>,

    /// Module depth (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_depth: Option<f64>,

    /// Facade curvature radius (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curvature_radius: Option<f64>,

    /// Module tilt from vertical (degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tilt_angle: Option<f64>,

    /// Mullion spacing (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mullion_spacing: Option<f64>,

    /// Infill panel thickness (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_thickness: Option<f64>,

    /// Design wind speed (m/s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,

    /// Thermal gradient across the module (K)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thermal_gradient: Option<f64>,

    /// Frame material
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
}

impl ParameterSet {
    /// Raw field value, `None` when absent.
    pub fn get(&self, name: ParamName) -> Option<f64> {
        match name {
            ParamName::ModuleWidth => self.module_width,
            ParamName::ModuleHeight => self.module_height,
            ParamName::ModuleDepth => self.module_depth,
            ParamName::CurvatureRadius => self.curvature_radius,
            ParamName::TiltAngle => self.tilt_angle,
            ParamName::MullionSpacing => self.mullion_spacing,
            ParamName::PanelThickness => self.panel_thickness,
            ParamName::WindSpeed => self.wind_speed,
            ParamName::ThermalGradient => self.thermal_gradient,
        }
    }

    /// Set a field by name (the explicit field-by-field mapping used by
    /// form and command-line overrides).
    pub fn set(&mut self, name: ParamName, value: f64) {
        let slot = match name {
            ParamName::ModuleWidth => &mut self.module_width,
            ParamName::ModuleHeight => &mut self.module_height,
            ParamName::ModuleDepth => &mut self.module_depth,
            ParamName::CurvatureRadius => &mut self.curvature_radius,
            ParamName::TiltAngle => &mut self.tilt_angle,
            ParamName::MullionSpacing => &mut self.mullion_spacing,
            ParamName::PanelThickness => &mut self.panel_thickness,
            ParamName::WindSpeed => &mut self.wind_speed,
            ParamName::ThermalGradient => &mut self.thermal_gradient,
        };
        *slot = Some(value);
    }

    /// Builder-style [`ParameterSet::set`]
    pub fn with(mut self, name: ParamName, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style material assignment
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// A field is missing when absent or NaN.
    pub fn is_missing(&self, name: ParamName) -> bool {
        self.get(name).map_or(true, f64::is_nan)
    }

    /// Field value for computation; missing fields read as NaN.
    pub fn value(&self, name: ParamName) -> f64 {
        self.get(name).unwrap_or(f64::NAN)
    }

    /// Frame density, [`DEFAULT_DENSITY`] when material is absent or unrecognized.
    pub fn density(&self) -> f64 {
        self.material.as_ref().map_or(DEFAULT_DENSITY, Material::density)
    }

    /// Strict validation for the checked pipeline.
    ///
    /// Rejects missing numeric fields, non-finite values, and non-positive
    /// divisor fields (width, height, depth, curvature radius). An
    /// unrecognized or absent material is accepted.
    pub fn validate(&self) -> FacadeResult<()> {
        for name in ParamName::ALL {
            let value = match self.get(name) {
                Some(v) if !v.is_nan() => v,
                _ => return Err(FacadeError::missing_field(name.as_str())),
            };
            if !value.is_finite() {
                return Err(FacadeError::invalid_input(
                    name.as_str(),
                    value.to_string(),
                    "Value must be finite",
                ));
            }
        }

        for name in [
            ParamName::ModuleWidth,
            ParamName::ModuleHeight,
            ParamName::ModuleDepth,
            ParamName::CurvatureRadius,
        ] {
            let value = self.value(name);
            if value <= 0.0 {
                return Err(FacadeError::invalid_input(
                    name.as_str(),
                    value.to_string(),
                    format!("{} must be positive", name.display_name()),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ParameterSet {
        ParameterSet {
            module_width: Some(1.25),
            module_height: Some(3.45),
            module_depth: Some(0.24),
            curvature_radius: Some(28.0),
            tilt_angle: Some(3.5),
            mullion_spacing: Some(1.42),
            panel_thickness: Some(0.021),
            wind_speed: Some(34.0),
            thermal_gradient: Some(16.0),
            material: Some(Material::Aluminum),
        }
    }

    #[test]
    fn test_param_name_roundtrip() {
        for name in ParamName::ALL {
            assert_eq!(name.as_str().parse::<ParamName>().unwrap(), name);
        }
        assert!("module_colour".parse::<ParamName>().is_err());
    }

    #[test]
    fn test_param_name_serializes_snake_case() {
        let json = serde_json::to_string(&ParamName::CurvatureRadius).unwrap();
        assert_eq!(json, "\"curvature_radius\"");
    }

    #[test]
    fn test_material_density() {
        assert_eq!(Material::Aluminum.density(), 27.0);
        assert_eq!(Material::Glass.density(), 25.0);
        assert_eq!(Material::Steel.density(), 78.5);
        assert_eq!(Material::from("titanium".to_string()).density(), DEFAULT_DENSITY);
    }

    #[test]
    fn test_material_serialization_keeps_unknown_name() {
        let material: Material = serde_json::from_str("\"bronze\"").unwrap();
        assert_eq!(material, Material::Other("bronze".to_string()));
        assert!(!material.is_recognized());
        assert_eq!(serde_json::to_string(&material).unwrap(), "\"bronze\"");

        let steel: Material = serde_json::from_str("\"steel\"").unwrap();
        assert_eq!(steel, Material::Steel);
    }

    #[test]
    fn test_missing_detection() {
        let mut params = complete();
        assert!(!params.is_missing(ParamName::ModuleWidth));

        params.module_width = None;
        assert!(params.is_missing(ParamName::ModuleWidth));
        assert!(params.value(ParamName::ModuleWidth).is_nan());

        params.module_width = Some(f64::NAN);
        assert!(params.is_missing(ParamName::ModuleWidth));
    }

    #[test]
    fn test_density_defaults_without_material() {
        let mut params = complete();
        params.material = None;
        assert_eq!(params.density(), DEFAULT_DENSITY);
    }

    #[test]
    fn test_set_by_name() {
        let params = ParameterSet::default()
            .with(ParamName::WindSpeed, 40.0)
            .with(ParamName::TiltAngle, -2.0);
        assert_eq!(params.wind_speed, Some(40.0));
        assert_eq!(params.tilt_angle, Some(-2.0));
        assert!(params.module_width.is_none());
    }

    #[test]
    fn test_validate_complete() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_field() {
        let mut params = complete();
        params.thermal_gradient = None;
        assert_eq!(
            params.validate(),
            Err(FacadeError::missing_field("thermal_gradient"))
        );
    }

    #[test]
    fn test_validate_zero_divisor() {
        let mut params = complete();
        params.module_depth = Some(0.0);
        let err = params.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_validate_accepts_unknown_material() {
        let params = complete().with_material(Material::from("bronze".to_string()));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{ "module_width": 1.2, "material": "glass" }"#;
        let params: ParameterSet = serde_json::from_str(json).unwrap();
        assert_eq!(params.module_width, Some(1.2));
        assert_eq!(params.material, Some(Material::Glass));
        assert!(params.module_height.is_none());

        let out = serde_json::to_string(&params).unwrap();
        assert!(!out.contains("module_height"));
    }
}
