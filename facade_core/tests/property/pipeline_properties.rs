use facade_core::calculations::association::{stage_correlation, Stage, MAX_CORRELATION, MIN_CORRELATION};
use facade_core::calculations::structural::NODE_COUNT;
use facade_core::calculations::correction::ITERATION_COUNT;
use facade_core::rules::governed_parameters;
use facade_core::units::round_dp;
use facade_core::{analyze, calculate, Material, ParamName, ParameterSet};
use proptest::prelude::*;

fn material() -> impl Strategy<Value = Material> {
    prop_oneof![
        Just(Material::Aluminum),
        Just(Material::Glass),
        Just(Material::Steel),
        "[a-z]{3,8}".prop_map(Material::from),
    ]
}

/// Positive, finite parameter sets in a realistic range
fn parameter_set() -> impl Strategy<Value = ParameterSet> {
    (
        (0.5f64..2.5, 1.0f64..6.0, 0.1f64..0.5, 1.0f64..120.0, -10.0f64..15.0),
        (0.5f64..2.5, 0.01f64..0.05, 0.0f64..60.0, -20.0f64..40.0),
        material(),
    )
        .prop_map(|((w, h, d, r, tilt), (m, t, v, thermal), material)| {
            ParameterSet::default()
                .with(ParamName::ModuleWidth, w)
                .with(ParamName::ModuleHeight, h)
                .with(ParamName::ModuleDepth, d)
                .with(ParamName::CurvatureRadius, r)
                .with(ParamName::TiltAngle, tilt)
                .with(ParamName::MullionSpacing, m)
                .with(ParamName::PanelThickness, t)
                .with(ParamName::WindSpeed, v)
                .with(ParamName::ThermalGradient, thermal)
                .with_material(material)
        })
}

proptest! {
    #[test]
    fn complete_sets_score_full_completeness(params in parameter_set()) {
        let report = analyze(&params);
        prop_assert_eq!(report.integrity.completeness_score, 100.0);
        prop_assert!(report.integrity.missing_parameters.is_empty());
    }

    #[test]
    fn completeness_tracks_missing_count(params in parameter_set(), mask in 0u8..128) {
        let mut params = params;
        let mut missing = 0usize;
        for (bit, name) in governed_parameters().enumerate() {
            if mask & (1 << bit) != 0 {
                match name {
                    ParamName::ModuleWidth => params.module_width = None,
                    ParamName::ModuleHeight => params.module_height = None,
                    ParamName::ModuleDepth => params.module_depth = None,
                    ParamName::CurvatureRadius => params.curvature_radius = None,
                    ParamName::TiltAngle => params.tilt_angle = None,
                    ParamName::MullionSpacing => params.mullion_spacing = None,
                    ParamName::PanelThickness => params.panel_thickness = Some(f64::NAN),
                    ParamName::WindSpeed | ParamName::ThermalGradient => unreachable!(),
                }
                missing += 1;
            }
        }

        let integrity = analyze(&params).integrity;
        let expected = round_dp((1.0 - missing as f64 / 7.0) * 100.0, 2);
        prop_assert_eq!(integrity.completeness_score, expected);
        prop_assert_eq!(integrity.missing_parameters.len(), missing);
    }

    #[test]
    fn scores_stay_in_range(params in parameter_set()) {
        let report = analyze(&params);
        prop_assert!((0.0..=100.0).contains(&report.integrity.rule_match_score));
        prop_assert!((0.0..=100.0).contains(&report.structural.stability_index));
        prop_assert!((0.0..=100.0).contains(&report.corrections.assembly_suitability));
    }

    #[test]
    fn path_weights_sum_to_one(params in parameter_set()) {
        let total = analyze(&params).geometry.path_weight_total();
        prop_assert!((total - 1.0).abs() <= 0.004, "path weights sum to {}", total);
    }

    #[test]
    fn stress_profile_spans_module_height(params in parameter_set()) {
        let height = params.module_height.unwrap();
        let profile = analyze(&params).structural.stress_distribution;

        prop_assert_eq!(profile.len(), NODE_COUNT);
        prop_assert_eq!(profile[0].elevation, 0.0);
        prop_assert!((profile[NODE_COUNT - 1].elevation - height).abs() <= 0.005 + 1e-9);
        for pair in profile.windows(2) {
            prop_assert!(pair[1].elevation > pair[0].elevation);
        }
    }

    #[test]
    fn correction_runs_exactly_five_steps(params in parameter_set()) {
        let iterations = analyze(&params).corrections.iterations;
        prop_assert_eq!(iterations.len(), ITERATION_COUNT);
        let numbers: Vec<u32> = iterations.iter().map(|i| i.iteration).collect();
        prop_assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn correlations_stay_bounded(suitability in 0.0f64..=100.0) {
        for stage in Stage::ALL {
            let c = stage_correlation(stage, suitability);
            prop_assert!((MIN_CORRELATION..=MAX_CORRELATION).contains(&c), "{} -> {}", stage, c);
        }
    }

    #[test]
    fn analysis_is_idempotent(params in parameter_set()) {
        let first = serde_json::to_string(&analyze(&params)).unwrap();
        let second = serde_json::to_string(&analyze(&params)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn checked_pipeline_accepts_valid_sets(params in parameter_set()) {
        let report = calculate(&params);
        prop_assert!(report.is_ok());
        prop_assert!(report.unwrap().is_finite());
    }
}
