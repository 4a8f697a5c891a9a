//! # Parameter Integrity
//!
//! Scores how complete a parameter set is and how closely it follows the
//! design rule table.
//!
//! ## Scoring
//!
//! - Completeness: share of the seven rule-governed fields that are present
//! - Per-field normalized gap: `min(|value - target| / (spread / 2), 1.8)`
//! - Rule match: `max(0, 100 - 18 * sum(gap * weight))`
//!
//! Missing fields count against completeness and are skipped by the
//! rule-match penalty.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::calculations::integrity::score;
//! use facade_core::parameters::{ParameterSet, ParamName};
//!
//! let params = ParameterSet::default()
//!     .with(ParamName::ModuleWidth, 1.2)
//!     .with(ParamName::ModuleHeight, 3.2);
//!
//! let result = score(&params);
//! assert_eq!(result.missing_parameters.len(), 5);
//! assert!(!result.is_ready());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parameters::{ParamName, ParameterSet};
use crate::rules::{RuleEntry, RULE_TABLE};
use crate::units::round_dp;

/// Upper bound on a single field's normalized gap
pub const MAX_NORMALIZED_GAP: f64 = 1.8;

/// Completeness must exceed this (percent) for a ready verdict
pub const READY_COMPLETENESS: f64 = 90.0;

/// Rule match must exceed this (percent) for a ready verdict
pub const READY_RULE_MATCH: f64 = 72.0;

pub const NOTE_READY: &str = "Parameter coverage satisfactory; proceed to geometry synthesis";
pub const NOTE_REVIEW: &str = "Review highlighted inputs to strengthen rule alignment";

/// Integrity scoring results.
///
/// ## JSON Example
///
/// ```json
/// {
///   "completenessScore": 100.0,
///   "ruleMatchScore": 76.19,
///   "normalizedIndicators": { "module_width": 94.5, "module_height": 81.67 },
///   "missingParameters": [],
///   "notes": "Parameter coverage satisfactory; proceed to geometry synthesis"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityResult {
    /// Share of rule-governed fields present (0-100, 2 decimals)
    pub completeness_score: f64,

    /// Rule conformance (0-100, 2 decimals)
    pub rule_match_score: f64,

    /// Per-field score `100 - gap * 55 * weight`; not clamped, so a heavily
    /// weighted outlier can go negative. Missing fields are omitted.
    pub normalized_indicators: BTreeMap<ParamName, f64>,

    /// Rule-governed fields that are absent or NaN
    pub missing_parameters: Vec<ParamName>,

    /// Advisory note
    pub notes: String,
}

impl IntegrityResult {
    /// Whether the set clears both advisory thresholds
    pub fn is_ready(&self) -> bool {
        self.completeness_score > READY_COMPLETENESS && self.rule_match_score > READY_RULE_MATCH
    }

    /// Field with the lowest normalized indicator, if any field is present
    pub fn weakest_parameter(&self) -> Option<(ParamName, f64)> {
        self.normalized_indicators
            .iter()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, score)| (*name, *score))
    }
}

/// Normalized deviation of a value from its rule target, capped at
/// [`MAX_NORMALIZED_GAP`].
pub fn normalized_gap(value: f64, rule: &RuleEntry) -> f64 {
    let gap = (value - rule.target).abs() / (rule.spread() / 2.0);
    gap.min(MAX_NORMALIZED_GAP)
}

/// Score a parameter set against the rule table.
pub fn score(params: &ParameterSet) -> IntegrityResult {
    let governed = RULE_TABLE.len() as f64;

    let missing_parameters: Vec<ParamName> = RULE_TABLE
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| params.is_missing(*name))
        .collect();

    let completeness_score = round_dp((1.0 - missing_parameters.len() as f64 / governed) * 100.0, 2);

    let mut penalty = 0.0;
    let mut normalized_indicators = BTreeMap::new();
    for (name, rule) in RULE_TABLE.iter() {
        let value = match params.get(*name) {
            Some(v) if !v.is_nan() => v,
            _ => continue,
        };
        let gap = normalized_gap(value, rule);
        normalized_indicators.insert(*name, round_dp(100.0 - gap * 55.0 * rule.weight, 2));
        penalty += gap * rule.weight;
    }

    let rule_match_score = round_dp((100.0 - penalty * 18.0).max(0.0), 2);

    let ready = completeness_score > READY_COMPLETENESS && rule_match_score > READY_RULE_MATCH;
    debug!(
        completeness = completeness_score,
        rule_match = rule_match_score,
        missing = missing_parameters.len(),
        ready,
        "integrity scored"
    );

    IntegrityResult {
        completeness_score,
        rule_match_score,
        normalized_indicators,
        missing_parameters,
        notes: if ready { NOTE_READY } else { NOTE_REVIEW }.to_string(),
    }
}
