//! # Design-to-Field Association
//!
//! Maps the post-correction assembly suitability onto the five project
//! stages and builds the design-vs-field linkage table.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parameters::{ParamName, ParameterSet};
use crate::units::round_dp;

/// Correlation floor
pub const MIN_CORRELATION: f64 = 0.4;

/// Correlation ceiling
pub const MAX_CORRELATION: f64 = 0.98;

/// Project stage, in timeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Concept,
    #[serde(rename = "Design Freeze")]
    DesignFreeze,
    Mockup,
    Fabrication,
    Installation,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Concept,
        Stage::DesignFreeze,
        Stage::Mockup,
        Stage::Fabrication,
        Stage::Installation,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Concept => "Concept",
            Stage::DesignFreeze => "Design Freeze",
            Stage::Mockup => "Mockup",
            Stage::Fabrication => "Fabrication",
            Stage::Installation => "Installation",
        }
    }

    /// 0-based position in the timeline
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Design-to-field correlation for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageCorrelation {
    pub stage: Stage,
    /// In `[0.4, 0.98]`, 3 decimals
    pub correlation: f64,
}

/// One row of the linkage table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkageRow {
    pub stage: Stage,
    /// Design-side module width at this stage (m, 3 decimals)
    pub design_param: f64,
    /// Field-measured module width at this stage (m, 3 decimals)
    pub field_value: f64,
    /// Synchronization lag behind design (days)
    pub sync_lag: u32,
}

impl LinkageRow {
    /// Design minus field value
    pub fn discrepancy(&self) -> f64 {
        self.design_param - self.field_value
    }
}

/// Association results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationResult {
    pub correlations: Vec<StageCorrelation>,
    pub linkage_table: Vec<LinkageRow>,
}

/// Correlation for a stage given assembly suitability (0-100).
pub fn stage_correlation(stage: Stage, assembly_suitability: f64) -> f64 {
    let i = stage.index() as f64;
    let base = 0.68 + assembly_suitability / 250.0;
    let attenuation = 1.0 - i * 0.06;
    round_dp((base * attenuation + 0.05 * i).clamp(MIN_CORRELATION, MAX_CORRELATION), 3)
}

/// Build stage correlations and the linkage table.
pub fn associate(params: &ParameterSet, assembly_suitability: f64) -> AssociationResult {
    let width = params.value(ParamName::ModuleWidth);

    let correlations: Vec<StageCorrelation> = Stage::ALL
        .iter()
        .map(|&stage| StageCorrelation {
            stage,
            correlation: stage_correlation(stage, assembly_suitability),
        })
        .collect();

    let linkage_table: Vec<LinkageRow> = Stage::ALL
        .iter()
        .map(|&stage| {
            let i = stage.index();
            LinkageRow {
                stage,
                design_param: round_dp(width * (1.0 + 0.015 * i as f64), 3),
                field_value: round_dp(width * (1.0 + 0.01 * i as f64), 3),
                sync_lag: (Stage::ALL.len() - i) as u32 * 2,
            }
        })
        .collect();

    debug!(assembly_suitability, stages = correlations.len(), "association mapped");

    AssociationResult {
        correlations,
        linkage_table,
    }
}
