use std::io::Write;

use fuzzy_usage::device::catalog::sample_catalog;
use fuzzy_usage::device::{
    AdvisorConfig, Consumption, Cost, DeviceEvaluator, DeviceRecord, DeviceTerm, Usage, UsageVerdict,
};
use fuzzy_usage::{
    ConfigError, DefuzzificationOp, FuzzyError, FuzzySystem, Inputs, MamdaniInference, Rules, Terms, Universe,
    Variables,
};

const EPS: f64 = 1e-9;

fn assess(consumption: f64, cost: f64) -> (f64, UsageVerdict) {
    let evaluator = DeviceEvaluator::reference().unwrap();
    let device = DeviceRecord::new("device", "Household", consumption, cost);
    let assessment = evaluator.assess(&device).unwrap();

    (assessment.score.unwrap(), assessment.verdict)
}

#[test]
fn low_consumption_fridge_is_high_usage() {
    // Only "consumption is low" fires, at 2/3
    let (score, verdict) = assess(200., 0.8);

    assert!((score - 2.318_592_964_824_12).abs() < EPS, "{score}");
    assert_eq!(verdict, UsageVerdict::Level(Usage::High));
    assert_eq!(verdict.to_string(), "HIGH");
}

#[test]
fn air_conditioner_is_low_usage() {
    // Rule 1 clips LOW at 0.5; the priority rule fires at 1 but stays out
    // of the aggregate
    let (score, verdict) = assess(2000., 2.5);

    assert!((score - 0.5).abs() < EPS, "{score}");
    assert_eq!(verdict, UsageVerdict::Level(Usage::Low));
    assert_eq!(verdict.to_string(), "LOW");
}

#[test]
fn priority_rule_is_reported_but_not_aggregated() {
    let evaluator = DeviceEvaluator::reference().unwrap();
    let usage = evaluator.usage_system();
    let mut inputs = Inputs::new();

    inputs.add(usage.consumption(), 2000.);
    inputs.add(usage.cost(), 2.5);

    let outputs = usage.system().eval(&inputs).unwrap();

    assert_eq!(outputs.firing_strengths()[0], 0.5);
    assert_eq!(outputs.firing_strengths()[5], 1.);
    assert_eq!(outputs.max_firing_strength(), 1.);
    // Nothing but the priority rule targets HIGH
    assert_eq!(outputs.aggregated_membership(usage.usage(), 2.5), Some(0.));
}

#[test]
fn aggregated_priority_rule_pulls_scores_up() {
    let mut config = AdvisorConfig::default();

    config.aggregate_priority_rule = true;

    let evaluator = DeviceEvaluator::from_config(&config).unwrap();
    let assess = |consumption, cost| {
        let device = DeviceRecord::new("device", "Household", consumption, cost);

        evaluator.assess(&device).unwrap()
    };

    let air_conditioner = assess(2000., 2.5);

    assert!((air_conditioner.score.unwrap() - 1.727_678_571_428_571).abs() < EPS);
    assert_eq!(air_conditioner.verdict, UsageVerdict::Level(Usage::Moderate));

    let washing_machine = assess(800., 2.);

    assert!((washing_machine.score.unwrap() - 1.586_021_505_376_344_7).abs() < EPS);
    assert_eq!(washing_machine.verdict, UsageVerdict::Level(Usage::Moderate));

    // No effect where the rule does not fire
    assert!((assess(200., 0.8).score.unwrap() - 2.318_592_964_824_12).abs() < EPS);
}

#[test]
fn tv_resolves_to_high() {
    let (score, verdict) = assess(150., 1.2);

    assert!((score - 2.303_571_428_571_429).abs() < EPS, "{score}");
    assert_eq!(verdict, UsageVerdict::Level(Usage::High));
}

#[test]
fn washing_machine_and_computer() {
    // Rule 4 clips LOW at 0.5, the cost alone would only fire the priority rule
    let (score, verdict) = assess(800., 2.);

    assert!((score - 0.5).abs() < EPS, "{score}");
    assert_eq!(verdict, UsageVerdict::Level(Usage::Low));

    let (score, verdict) = assess(300., 1.5);

    assert!((score - 7. / 3.).abs() < EPS, "{score}");
    assert_eq!(verdict, UsageVerdict::Level(Usage::High));
}

#[test]
fn essential_devices_skip_inference() {
    let evaluator = DeviceEvaluator::reference().unwrap();

    // Inputs that would make inference fail are irrelevant here
    for (consumption, cost) in [(200., 0.8), (600., 0.3), (f64::NAN, 99.)] {
        let device = DeviceRecord::new("Fridge", "Essential", consumption, cost);
        let assessment = evaluator.assess(&device).unwrap();

        assert_eq!(assessment.verdict, UsageVerdict::SpecialPriority);
        assert_eq!(assessment.score, None);
        assert_eq!(evaluator.evaluate(&device).unwrap().to_string(), "HIGH (Special Priority)");
    }

    // The marker is matched exactly
    let lowercase = DeviceRecord::new("Fridge", "essential", 200., 0.8);

    assert_eq!(evaluator.evaluate(&lowercase).unwrap(), UsageVerdict::Level(Usage::High));
}

#[test]
fn rule_with_undefined_label_is_rejected() {
    let mut vars = Variables::<DeviceTerm>::new();
    let consumption = vars
        .add(
            "consumption",
            Universe::arange(0. ..=2500., 1.).unwrap(),
            Terms::new().triangle(Consumption::Low, 0., 300., 500.).unwrap(),
        )
        .unwrap();
    let cost = vars
        .add(
            "cost",
            Universe::arange(0. ..=3., 0.1).unwrap(),
            Terms::new().triangle(Cost::High, 1.5, 2.5, 3.).unwrap(),
        )
        .unwrap();
    // No MODERATE term
    let usage = vars
        .add(
            "usage",
            Universe::arange(0. ..=3., 0.1).unwrap(),
            Terms::new()
                .triangle(Usage::Low, 0., 0.5, 1.)
                .unwrap()
                .triangle(Usage::High, 1.5, 2.5, 3.)
                .unwrap(),
        )
        .unwrap();
    let mut rules = Rules::new();

    rules.add(consumption.is(Consumption::Low), usage.is(Usage::High));
    rules.add(cost.is(Cost::High), usage.is(Usage::Moderate));

    let err = FuzzySystem::new(vars, rules, MamdaniInference::default()).err();

    assert_eq!(
        err,
        Some(ConfigError::UnknownTerm {
            rule: 1,
            variable: "usage".into(),
            term: "Usage(Moderate)".into(),
        })
    );
}

#[test]
fn no_rule_firing_is_undefined_output() {
    // Medium consumption with low cost matches no premise
    let evaluator = DeviceEvaluator::reference().unwrap();
    let device = DeviceRecord::new("Dryer", "Appliance", 600., 0.3);

    assert_eq!(
        evaluator.evaluate(&device),
        Err(FuzzyError::UndefinedOutput {
            variable: "usage".into()
        })
    );
}

#[test]
fn batch_keeps_going_after_a_failure() {
    let evaluator = DeviceEvaluator::reference().unwrap();
    let mut devices = sample_catalog();

    devices.insert(2, DeviceRecord::new("Dryer", "Appliance", 600., 0.3));

    let labels: Vec<_> = evaluator
        .evaluate_all(&devices)
        .into_iter()
        .map(|(device, result)| (device.id.as_str(), result.map(|a| a.verdict.to_string())))
        .collect();

    assert_eq!(
        labels,
        vec![
            ("Refrigerator", Ok("HIGH (Special Priority)".to_owned())),
            ("Air Conditioner", Ok("LOW".to_owned())),
            (
                "Dryer",
                Err(FuzzyError::UndefinedOutput {
                    variable: "usage".into()
                })
            ),
            ("TV", Ok("HIGH".to_owned())),
            ("Washing Machine", Ok("LOW".to_owned())),
            ("Computer", Ok("HIGH".to_owned())),
        ]
    );
}

#[test]
fn centroid_converges_on_finer_grids() {
    let coarse = DeviceEvaluator::reference().unwrap();
    let mut config = AdvisorConfig::default();

    config.usage.step = 0.01;

    let fine = DeviceEvaluator::from_config(&config).unwrap();

    for (consumption, cost) in [(200., 0.8), (2000., 2.5), (150., 1.2), (800., 2.), (1000., 1.5)] {
        let a = coarse.usage_system().score(consumption, cost).unwrap();
        let b = fine.usage_system().score(consumption, cost).unwrap();

        assert!((a - b).abs() < 1e-2, "({consumption}, {cost}): {a} vs {b}");
    }
}

#[test]
fn evaluations_share_one_system_across_threads() {
    let evaluator = DeviceEvaluator::reference().unwrap();
    let devices = sample_catalog();
    let expected: Vec<_> = devices.iter().map(|d| evaluator.evaluate(d)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| devices.iter().map(|d| evaluator.evaluate(d)).collect::<Vec<_>>()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn config_file_changes_marker_and_operators() {
    let mut file = tempfile::NamedTempFile::new().unwrap();

    writeln!(
        file,
        r#"
essential_category = "Medical"

[inference]
defuzz_op = "mom"
"#
    )
    .unwrap();

    let config = AdvisorConfig::load(file.path()).unwrap();

    assert_eq!(config.inference.defuzz_op, DefuzzificationOp::Mom);

    let evaluator = DeviceEvaluator::from_config(&config).unwrap();
    let oxygen = DeviceRecord::new("Oxygen concentrator", "Medical", 2400., 2.9);
    let fridge = DeviceRecord::new("Refrigerator", "Essential", 300., 0.8);

    assert_eq!(evaluator.evaluate(&oxygen).unwrap(), UsageVerdict::SpecialPriority);

    // Only "consumption is low" fires at full strength, the HIGH peak is 2.5
    let assessment = evaluator.assess(&fridge).unwrap();

    assert_eq!(assessment.verdict, UsageVerdict::Level(Usage::High));
    assert!((assessment.score.unwrap() - 2.5).abs() < EPS);
}

#[test]
fn membership_curves_for_plotting() {
    let evaluator = DeviceEvaluator::reference().unwrap();
    let usage = evaluator.usage_system();
    let system = usage.system();
    let curves = system.variable(usage.usage()).unwrap().curves();
    let labels: Vec<_> = curves.iter().map(|(term, _)| *term).collect();

    assert_eq!(
        labels,
        [
            DeviceTerm::Usage(Usage::Low),
            DeviceTerm::Usage(Usage::Moderate),
            DeviceTerm::Usage(Usage::High),
        ]
    );
    assert!(curves.iter().all(|(_, curve)| curve.len() == 31));
    assert_eq!(curves[0].1[5], 1.);
    assert_eq!(system.variable(usage.consumption()).unwrap().universe().len(), 2501);
    assert_eq!(system.variables().count(), 3);
    assert_eq!(system.rule_count(), 6);
}
