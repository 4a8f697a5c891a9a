//! # Design Rule Table
//!
//! Per-parameter target, admissible range and scoring weight for the seven
//! geometric parameters that integrity scoring checks. Wind speed and
//! thermal gradient are load inputs and carry no rule.

use serde::{Deserialize, Serialize};

use crate::parameters::ParamName;

/// Scoring rule for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Design target value
    pub target: f64,
    /// Lower bound of the admissible range
    pub min: f64,
    /// Upper bound of the admissible range
    pub max: f64,
    /// Weight of this parameter's deviation in the rule-match penalty
    pub weight: f64,
}

impl RuleEntry {
    pub const fn new(target: f64, min: f64, max: f64, weight: f64) -> Self {
        Self { target, min, max, weight }
    }

    /// Normalizing spread: the range width, falling back to the target,
    /// then to 1 when both are zero.
    pub fn spread(&self) -> f64 {
        let range = self.max - self.min;
        if range != 0.0 {
            range
        } else if self.target != 0.0 {
            self.target
        } else {
            1.0
        }
    }

    /// Whether a value lies inside the admissible range
    pub fn admits(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The rule table, in integrity-indicator order.
pub static RULE_TABLE: [(ParamName, RuleEntry); 7] = [
    (ParamName::ModuleWidth, RuleEntry::new(1.2, 0.8, 1.8, 1.0)),
    (ParamName::ModuleHeight, RuleEntry::new(3.2, 2.4, 4.2, 1.2)),
    (ParamName::ModuleDepth, RuleEntry::new(0.26, 0.18, 0.35, 0.9)),
    (ParamName::CurvatureRadius, RuleEntry::new(36.0, 8.0, 60.0, 1.1)),
    (ParamName::TiltAngle, RuleEntry::new(4.5, -3.0, 9.0, 0.8)),
    (ParamName::MullionSpacing, RuleEntry::new(1.5, 1.0, 2.2, 0.7)),
    (ParamName::PanelThickness, RuleEntry::new(0.022, 0.016, 0.032, 0.9)),
];

/// Look up the rule for a parameter, `None` for unruled load inputs.
pub fn rule_for(name: ParamName) -> Option<&'static RuleEntry> {
    RULE_TABLE
        .iter()
        .find(|(param, _)| *param == name)
        .map(|(_, rule)| rule)
}

/// Names of the rule-governed parameters, in table order
pub fn governed_parameters() -> impl Iterator<Item = ParamName> {
    RULE_TABLE.iter().map(|(name, _)| *name)
}
