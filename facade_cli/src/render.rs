//! Table output for the terminal.

use facade_core::calculations::AnalysisReport;
use facade_core::dataset::{DatasetOrigin, DesignProfile, LoadedDataset};
use facade_core::history::AnalysisHistory;
use facade_core::rules::rule_for;
use facade_core::{ParamName, ParameterSet};

const RULE: &str = "═══════════════════════════════════════════════════════";

fn heading(title: &str) {
    println!("{}", RULE);
    println!("  {}", title);
    println!("{}", RULE);
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[REVIEW]" }
}

fn origin_line(origin: &DatasetOrigin) -> String {
    match origin {
        DatasetOrigin::File(path) => format!("Dataset: {}", path.display()),
        DatasetOrigin::Fallback { reason } => format!("Dataset: built-in profiles ({})", reason),
    }
}

/// One input row: value with unit, plus the admissible range for ruled parameters.
fn input_line(name: ParamName, value: f64) -> String {
    let row = format!("  {:<18} {:>9.3} {:<4}", name.display_name(), value, name.unit());
    match rule_for(name) {
        Some(rule) => format!(
            "{} [{} .. {}] {}",
            row,
            rule.min,
            rule.max,
            status_icon(rule.admits(value))
        ),
        None => row.trim_end().to_string(),
    }
}

pub fn report(profile: &DesignProfile, params: &ParameterSet, report: &AnalysisReport) {
    heading(&format!("{} · {}", profile.id, profile.name));
    println!();

    println!("Design Inputs");
    for name in ParamName::ALL {
        println!("{}", input_line(name, params.value(name)));
    }
    let material = params.material.as_ref().map_or("-", |m| m.as_str());
    println!("  {:<18} {}", "Material", material);
    println!();

    let integrity = &report.integrity;
    println!("Parameter Integrity {}", status_icon(integrity.is_ready()));
    println!("  Completeness:  {:>7.2} %", integrity.completeness_score);
    println!("  Rule match:    {:>7.2} %", integrity.rule_match_score);
    for (name, score) in &integrity.normalized_indicators {
        println!("    {:<18} {:>7.2}", name.display_name(), score);
    }
    if !integrity.missing_parameters.is_empty() {
        let missing: Vec<&str> = integrity.missing_parameters.iter().map(|p| p.as_str()).collect();
        println!("  Missing:       {}", missing.join(", "));
    }
    println!("  Note:          {}", integrity.notes);
    println!();

    let geometry = &report.geometry;
    let coeffs = &geometry.dynamic_coefficients;
    println!("Module Geometry");
    println!("  Projected area:   {:.3} m²", geometry.projected_area);
    println!("  Envelope volume:  {:.3} m³", geometry.envelope_volume);
    println!("  Frame weight:     {:.2}", geometry.frame_weight);
    println!(
        "  Path weights:     {}",
        geometry.path_weights.map(|w| format!("{:.3}", w)).join(" / ")
    );
    println!(
        "  Coefficients:     curvature {:.2}, tilt {:.2}, mullion {:.3}, thickness {:.3}",
        coeffs.curvature_influence, coeffs.tilt_response, coeffs.mullion_coupling, coeffs.thickness_ratio
    );
    println!();

    let structural = &report.structural;
    println!("Structural Verification");
    println!("  Wind pressure:    {:.3} kPa", structural.wind_pressure);
    println!("  Dead load:        {:.3}", structural.dead_load);
    println!("  Stability index:  {:.2}", structural.stability_index);
    println!("  {:>4} {:>9} {:>9} {:>9} {:>9}", "Node", "Elev (m)", "Baseline", "Generated", "Optimized");
    for s in &structural.stress_distribution {
        println!(
            "  {:>4} {:>9.2} {:>9.3} {:>9.3} {:>9.3}",
            s.node, s.elevation, s.baseline, s.generated, s.optimized
        );
    }
    println!();

    let corrections = &report.corrections;
    println!("Dimensional Correction");
    println!("  {:>4} {:>10} {:>11} {:>9}", "Step", "Dev (mm)", "Offset (°)", "Reweight");
    for i in &corrections.iterations {
        println!(
            "  {:>4} {:>10.3} {:>11.3} {:>9.3}",
            i.iteration, i.deviation_mm, i.shape_offset_deg, i.path_reweight
        );
    }
    println!("  Residual:         {:.3} mm", corrections.residual_deviation);
    println!("  Suitability:      {:.2}", corrections.assembly_suitability);
    println!();

    let association = &report.association;
    println!("Design-to-Field Association");
    println!("  {:<14} {:>6} {:>8} {:>8} {:>5}", "Stage", "Corr", "Design", "Field", "Lag");
    for (c, row) in association.correlations.iter().zip(&association.linkage_table) {
        println!(
            "  {:<14} {:>6.3} {:>8.3} {:>8.3} {:>5}",
            c.stage.display_name(),
            c.correlation,
            row.design_param,
            row.field_value,
            row.sync_lag
        );
    }
    println!("{}", RULE);
}

pub fn history(origin: &DatasetOrigin, history: &AnalysisHistory) {
    heading("Analysis History (newest first)");
    println!("{}", origin_line(origin));
    println!(
        "  {:<20} {:<8} {:>9} {:>11}  {}",
        "Time (UTC)", "Profile", "Stability", "Suitability", "Remark"
    );
    for entry in history.iter() {
        println!(
            "  {:<20} {:<8} {:>9.2} {:>11.2}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.profile,
            entry.stability_index,
            entry.assembly_suitability,
            entry.remark
        );
    }
}

pub fn profiles(loaded: &LoadedDataset) {
    let dataset = &loaded.dataset;
    println!("{}", origin_line(&loaded.origin));
    println!();
    println!("  {:<2} {:<8} {:<28} {}", "", "Id", "Name", "Material");
    for profile in &dataset.profiles {
        let active = if profile.id == dataset.active_profile_id { "*" } else { "" };
        let material = profile
            .parameters
            .material
            .as_ref()
            .map_or("-", |m| m.as_str());
        println!("  {:<2} {:<8} {:<28} {}", active, profile.id, profile.name, material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_input_line_flags_out_of_range() {
        let inside = input_line(ParamName::ModuleWidth, 1.25);
        assert!(inside.contains("Module Width"));
        assert!(inside.contains(" m "));
        assert!(inside.contains("[0.8 .. 1.8] [OK]"));

        let outside = input_line(ParamName::CurvatureRadius, 98.8);
        assert!(outside.ends_with("[REVIEW]"));
    }

    #[test]
    fn test_input_line_without_rule() {
        let line = input_line(ParamName::WindSpeed, 34.0);
        assert!(line.ends_with("34.000 m/s"));
        assert!(!line.contains('['));
    }

    #[test]
    fn test_origin_line() {
        let file = DatasetOrigin::File(PathBuf::from("data/system_dataset.json"));
        assert_eq!(origin_line(&file), "Dataset: data/system_dataset.json");

        let fallback = DatasetOrigin::Fallback { reason: "missing".to_string() };
        assert_eq!(origin_line(&fallback), "Dataset: built-in profiles (missing)");
    }
}
