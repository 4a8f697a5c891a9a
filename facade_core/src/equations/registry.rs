//! # Formula Registry
//!
//! Central registry of every formula the indicator pipeline evaluates.
//! Each formula carries its plain-text form, variable definitions,
//! assumptions and the function that implements it.
//!
//! ## Usage
//!
//! ```rust
//! use facade_core::equations::registry::{Equation, EquationCategory};
//!
//! let meta = Equation::WindPressure.metadata();
//! assert_eq!(meta.category, EquationCategory::Structural);
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Equation Categories
// ============================================================================

/// Pipeline stage a formula belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Completeness and rule conformance
    Integrity,
    /// Envelope quantities, path weights, dynamic coefficients
    Geometry,
    /// Loads, stress profile, stability
    Structural,
    /// Deviation-reduction series
    Correction,
    /// Stage correlation and linkage
    Association,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Integrity => "Parameter Integrity",
            EquationCategory::Geometry => "Module Geometry",
            EquationCategory::Structural => "Structural Verification",
            EquationCategory::Correction => "Dimensional Correction",
            EquationCategory::Association => "Design-to-Field Association",
        }
    }

    /// Position in the pipeline (lower runs first)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Integrity => 1,
            EquationCategory::Geometry => 2,
            EquationCategory::Structural => 3,
            EquationCategory::Correction => 4,
            EquationCategory::Association => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "w", "q", "k")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units, or "-" for dimensionless
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Wind Pressure")
    pub name: &'static str,
    /// What the formula produces
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source file implementing the formula, relative to `src/`
    pub source_module: &'static str,
    /// Function implementing the formula
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every formula evaluated by the indicator pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Integrity
    // -------------------------------------------------------------------------
    /// C = 100 (1 - m/7)
    CompletenessScore,
    /// g = min(|x - t| / (s/2), 1.8)
    NormalizedGap,
    /// I = 100 - 55 g w
    IndicatorScore,
    /// S = max(0, 100 - 18 sum(g w))
    RuleMatchScore,

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------
    /// A = w h
    ProjectedArea,
    /// V = A d
    EnvelopeVolume,
    /// k = 1 / max(R, 1)
    CurvatureFactor,
    /// W = V rho 0.85
    FrameWeight,
    /// p_i = r_i / sum(r)
    PathWeights,
    /// 120 k
    CurvatureInfluence,
    /// 45 sin(theta)
    TiltResponse,
    /// m / w
    MullionCoupling,
    /// t / d
    ThicknessRatio,

    // -------------------------------------------------------------------------
    // Structural
    // -------------------------------------------------------------------------
    /// q = 0.613 v^2 (0.5 + h/12) / 1000
    WindPressure,
    /// g = W 0.0098
    DeadLoad,
    /// s = sqrt(q^2 + g^2)
    BaselineStress,
    /// Per-node generated and optimized stress
    NodeStress,
    /// 100 - 38 mean(|generated - optimized|)
    StabilityIndex,

    // -------------------------------------------------------------------------
    // Correction
    // -------------------------------------------------------------------------
    /// D = 0.18 c + 0.014 T
    ThermalDrift,
    /// D (0.72 - 0.12 i)
    IterationDeviation,
    /// 0.45 D_5
    ResidualDeviation,
    /// 100 - 12 r
    AssemblySuitability,

    // -------------------------------------------------------------------------
    // Association
    // -------------------------------------------------------------------------
    /// (0.68 + S/250)(1 - 0.06 i) + 0.05 i
    StageCorrelation,
    /// Design and field widths per stage
    LinkageRow,
}

impl Equation {
    /// Full metadata for this formula
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            // Integrity
            Equation::CompletenessScore => EquationMetadata {
                name: "Completeness Score",
                description: "Share of the seven rule-governed parameters that are present",
                formula_plain: "C = 100 * (1 - m / 7)",
                variables: vec![
                    Variable::new("C", "Completeness score", "%"),
                    Variable::new("m", "Number of missing or NaN rule-governed parameters", "-"),
                ],
                assumptions: vec!["Wind speed and thermal gradient are not rule-governed"],
                category: EquationCategory::Integrity,
                source_module: "calculations/integrity.rs",
                source_function: "score",
            },

            Equation::NormalizedGap => EquationMetadata {
                name: "Normalized Gap",
                description: "Deviation of a parameter from its rule target in half-spreads",
                formula_plain: "g = min(|x - t| / (s / 2), 1.8)",
                variables: vec![
                    Variable::new("x", "Parameter value", "varies"),
                    Variable::new("t", "Rule target", "varies"),
                    Variable::new("s", "Rule spread: max - min, else target, else 1", "varies"),
                    Variable::new("g", "Normalized gap", "-"),
                ],
                assumptions: vec!["Capped at 1.8 so one outlier cannot dominate"],
                category: EquationCategory::Integrity,
                source_module: "calculations/integrity.rs",
                source_function: "normalized_gap",
            },

            Equation::IndicatorScore => EquationMetadata {
                name: "Normalized Indicator",
                description: "Per-parameter conformance score",
                formula_plain: "I = 100 - g * 55 * w",
                variables: vec![
                    Variable::new("I", "Indicator score", "%"),
                    Variable::new("g", "Normalized gap", "-"),
                    Variable::new("w", "Rule weight", "-"),
                ],
                assumptions: vec!["Not clamped; may be negative for heavily weighted outliers"],
                category: EquationCategory::Integrity,
                source_module: "calculations/integrity.rs",
                source_function: "score",
            },

            Equation::RuleMatchScore => EquationMetadata {
                name: "Rule Match Score",
                description: "Overall conformance of the parameter set to the rule table",
                formula_plain: "S = max(0, 100 - 18 * sum(g * w))",
                variables: vec![
                    Variable::new("S", "Rule match score", "%"),
                    Variable::new("g", "Normalized gap per present parameter", "-"),
                    Variable::new("w", "Rule weight", "-"),
                ],
                assumptions: vec!["Missing parameters contribute no penalty"],
                category: EquationCategory::Integrity,
                source_module: "calculations/integrity.rs",
                source_function: "score",
            },

            // Geometry
            Equation::ProjectedArea => EquationMetadata {
                name: "Projected Area",
                description: "Face area of the module",
                formula_plain: "A = w * h",
                variables: vec![
                    Variable::new("A", "Projected area", "m^2"),
                    Variable::new("w", "Module width", "m"),
                    Variable::new("h", "Module height", "m"),
                ],
                assumptions: vec!["Rectangular face; curvature ignored"],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            Equation::EnvelopeVolume => EquationMetadata {
                name: "Envelope Volume",
                description: "Bounding volume of the module",
                formula_plain: "V = A * d",
                variables: vec![
                    Variable::new("V", "Envelope volume", "m^3"),
                    Variable::new("A", "Projected area", "m^2"),
                    Variable::new("d", "Module depth", "m"),
                ],
                assumptions: vec![],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            Equation::CurvatureFactor => EquationMetadata {
                name: "Curvature Factor",
                description: "Inverse curvature radius with a 1 m floor",
                formula_plain: "k = 1 / max(R, 1)",
                variables: vec![
                    Variable::new("k", "Curvature factor", "1/m"),
                    Variable::new("R", "Curvature radius", "m"),
                ],
                assumptions: vec!["Radii below 1 m are treated as 1 m"],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            Equation::FrameWeight => EquationMetadata {
                name: "Frame Weight",
                description: "Weight of the module frame from envelope volume and material density",
                formula_plain: "W = V * rho * 0.85",
                variables: vec![
                    Variable::new("W", "Frame weight", "kN"),
                    Variable::new("V", "Envelope volume", "m^3"),
                    Variable::new("rho", "Density: aluminum 27, glass 25, steel 78.5, other 30", "kN/m^3"),
                ],
                assumptions: vec!["85% of envelope mass attributed to the frame", "Rounded to 2 decimals before downstream use"],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            Equation::PathWeights => EquationMetadata {
                name: "Path Weights",
                description: "Relative weights of the construction, envelope, load-balance and thickness paths",
                formula_plain: "p_i = r_i / sum(r), r = [A, V (1 + 12k), W (0.5 + |theta|), 10t]",
                variables: vec![
                    Variable::new("p_i", "Path weight", "-"),
                    Variable::new("theta", "Tilt angle", "rad"),
                    Variable::new("t", "Panel thickness", "m"),
                ],
                assumptions: vec!["Each weight rounded to 3 decimals; sum is 1 within rounding"],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            Equation::CurvatureInfluence => EquationMetadata {
                name: "Curvature Influence",
                description: "Scaled curvature factor used by structural and correction stages",
                formula_plain: "c = 120 * k",
                variables: vec![
                    Variable::new("c", "Curvature influence", "-"),
                    Variable::new("k", "Curvature factor", "1/m"),
                ],
                assumptions: vec!["Rounded to 2 decimals before downstream use"],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            Equation::TiltResponse => EquationMetadata {
                name: "Tilt Response",
                description: "Scaled sine of the tilt angle",
                formula_plain: "r_t = 45 * sin(theta)",
                variables: vec![
                    Variable::new("r_t", "Tilt response", "deg"),
                    Variable::new("theta", "Tilt angle", "rad"),
                ],
                assumptions: vec!["Rounded to 2 decimals before downstream use"],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            Equation::MullionCoupling => EquationMetadata {
                name: "Mullion Coupling",
                description: "Mullion spacing relative to module width",
                formula_plain: "m_c = m / w",
                variables: vec![
                    Variable::new("m", "Mullion spacing", "m"),
                    Variable::new("w", "Module width", "m"),
                ],
                assumptions: vec![],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            Equation::ThicknessRatio => EquationMetadata {
                name: "Thickness Ratio",
                description: "Panel thickness relative to module depth",
                formula_plain: "t_r = t / d",
                variables: vec![
                    Variable::new("t", "Panel thickness", "m"),
                    Variable::new("d", "Module depth", "m"),
                ],
                assumptions: vec![],
                category: EquationCategory::Geometry,
                source_module: "calculations/geometry.rs",
                source_function: "generate",
            },

            // Structural
            Equation::WindPressure => EquationMetadata {
                name: "Wind Pressure",
                description: "Design wind pressure with a height-dependent exposure term",
                formula_plain: "q = 0.613 * v^2 * (0.5 + h / 12) / 1000",
                variables: vec![
                    Variable::new("q", "Wind pressure", "kPa"),
                    Variable::new("v", "Wind speed", "m/s"),
                    Variable::new("h", "Module height", "m"),
                ],
                assumptions: vec!["Exposure grows linearly with module height"],
                category: EquationCategory::Structural,
                source_module: "calculations/structural.rs",
                source_function: "wind_pressure",
            },

            Equation::DeadLoad => EquationMetadata {
                name: "Dead Load",
                description: "Gravity load of the frame",
                formula_plain: "g = W * 0.0098",
                variables: vec![
                    Variable::new("g", "Dead load", "kPa"),
                    Variable::new("W", "Frame weight (rounded)", "kN"),
                ],
                assumptions: vec![],
                category: EquationCategory::Structural,
                source_module: "calculations/structural.rs",
                source_function: "analyze",
            },

            Equation::BaselineStress => EquationMetadata {
                name: "Baseline Stress",
                description: "Combined wind and dead load magnitude",
                formula_plain: "s = sqrt(q^2 + g^2)",
                variables: vec![
                    Variable::new("s", "Baseline stress", "kPa"),
                    Variable::new("q", "Wind pressure", "kPa"),
                    Variable::new("g", "Dead load", "kPa"),
                ],
                assumptions: vec!["Wind and gravity treated as orthogonal components"],
                category: EquationCategory::Structural,
                source_module: "calculations/structural.rs",
                source_function: "analyze",
            },

            Equation::NodeStress => EquationMetadata {
                name: "Node Stress",
                description: "Generated and optimized stress at each of seven nodes up the module",
                formula_plain: "generated_i = s * (1 + 0.32 i/6) * (1 + c/400), optimized_i = generated_i * (0.92 - 0.015 i)",
                variables: vec![
                    Variable::new("i", "Node index, 0 at the base", "-"),
                    Variable::new("s", "Baseline stress", "kPa"),
                    Variable::new("c", "Curvature influence", "-"),
                ],
                assumptions: vec!["Heuristic profile, not a finite-element solution", "Nodes equally spaced over module height"],
                category: EquationCategory::Structural,
                source_module: "calculations/structural.rs",
                source_function: "analyze",
            },

            Equation::StabilityIndex => EquationMetadata {
                name: "Stability Index",
                description: "Consistency between generated and optimized stress profiles",
                formula_plain: "SI = clamp(100 - 38 * mean(|generated - optimized|), 0, 100)",
                variables: vec![
                    Variable::new("SI", "Stability index", "%"),
                ],
                assumptions: vec!["Uses the rounded per-node values"],
                category: EquationCategory::Structural,
                source_module: "calculations/structural.rs",
                source_function: "analyze",
            },

            // Correction
            Equation::ThermalDrift => EquationMetadata {
                name: "Initial Drift",
                description: "Starting dimensional deviation from curvature and thermal gradient",
                formula_plain: "D = 0.18 * c + 0.014 * T",
                variables: vec![
                    Variable::new("D", "Initial drift", "mm"),
                    Variable::new("c", "Curvature influence", "-"),
                    Variable::new("T", "Thermal gradient", "K"),
                ],
                assumptions: vec![],
                category: EquationCategory::Correction,
                source_module: "calculations/correction.rs",
                source_function: "drift",
            },

            Equation::IterationDeviation => EquationMetadata {
                name: "Iteration Deviation",
                description: "Deviation and shape offset remaining after each correction step",
                formula_plain: "d_i = D * (0.72 - 0.12 i), o_i = r_t * (0.72 - 0.12 i)",
                variables: vec![
                    Variable::new("i", "Step index, 0 to 4", "-"),
                    Variable::new("r_t", "Tilt response", "deg"),
                ],
                assumptions: vec!["Exactly five steps; no convergence test"],
                category: EquationCategory::Correction,
                source_module: "calculations/correction.rs",
                source_function: "correct",
            },

            Equation::ResidualDeviation => EquationMetadata {
                name: "Residual Deviation",
                description: "Deviation left after the correction series",
                formula_plain: "r = 0.45 * d_4",
                variables: vec![
                    Variable::new("r", "Residual deviation", "mm"),
                    Variable::new("d_4", "Rounded deviation of the final step", "mm"),
                ],
                assumptions: vec!["Not floored; a negative thermal gradient can make it negative"],
                category: EquationCategory::Correction,
                source_module: "calculations/correction.rs",
                source_function: "correct",
            },

            Equation::AssemblySuitability => EquationMetadata {
                name: "Assembly Suitability",
                description: "Post-correction dimensional readiness",
                formula_plain: "AS = clamp(100 - 12 * r, 0, 100)",
                variables: vec![
                    Variable::new("AS", "Assembly suitability", "%"),
                    Variable::new("r", "Residual deviation", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::Correction,
                source_module: "calculations/correction.rs",
                source_function: "correct",
            },

            // Association
            Equation::StageCorrelation => EquationMetadata {
                name: "Stage Correlation",
                description: "Design-to-field correlation for each project stage",
                formula_plain: "rho_i = clamp((0.68 + AS/250) * (1 - 0.06 i) + 0.05 i, 0.4, 0.98)",
                variables: vec![
                    Variable::new("i", "Stage index: Concept 0 to Installation 4", "-"),
                    Variable::new("AS", "Assembly suitability", "%"),
                ],
                assumptions: vec!["High suitability saturates every stage at 0.98"],
                category: EquationCategory::Association,
                source_module: "calculations/association.rs",
                source_function: "stage_correlation",
            },

            Equation::LinkageRow => EquationMetadata {
                name: "Linkage Row",
                description: "Design and field module widths with synchronization lag per stage",
                formula_plain: "design_i = w (1 + 0.015 i), field_i = w (1 + 0.01 i), lag_i = 2 (5 - i)",
                variables: vec![
                    Variable::new("w", "Module width", "m"),
                    Variable::new("lag_i", "Synchronization lag", "days"),
                ],
                assumptions: vec![],
                category: EquationCategory::Association,
                source_module: "calculations/association.rs",
                source_function: "associate",
            },
        }
    }

    /// All formulas in a category, in registry order
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Every category, in pipeline order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Integrity, Geometry, Structural, Correction, Association];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All formulas in the registry
pub static ALL_EQUATIONS: &[Equation] = &[
    // Integrity
    Equation::CompletenessScore,
    Equation::NormalizedGap,
    Equation::IndicatorScore,
    Equation::RuleMatchScore,
    // Geometry
    Equation::ProjectedArea,
    Equation::EnvelopeVolume,
    Equation::CurvatureFactor,
    Equation::FrameWeight,
    Equation::PathWeights,
    Equation::CurvatureInfluence,
    Equation::TiltResponse,
    Equation::MullionCoupling,
    Equation::ThicknessRatio,
    // Structural
    Equation::WindPressure,
    Equation::DeadLoad,
    Equation::BaselineStress,
    Equation::NodeStress,
    Equation::StabilityIndex,
    // Correction
    Equation::ThermalDrift,
    Equation::IterationDeviation,
    Equation::ResidualDeviation,
    Equation::AssemblySuitability,
    // Association
    Equation::StageCorrelation,
    Equation::LinkageRow,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Render the full formula reference as markdown.
///
/// ```rust
/// use facade_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Facade Indicator Formula Reference"));
/// assert!(markdown.contains("Structural Verification"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Facade Indicator Formula Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

Every formula evaluated by the indicator pipeline, grouped by stage in the
order the stages run.

## Rounding

`round(x, d)` rounds half away from zero. Frame weight, curvature influence,
tilt response, path weights, per-node stresses and per-step deviations are
rounded when produced and consumed downstream in rounded form.

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!(
                "**Source:** [`{}`](src/{})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Stages:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================
