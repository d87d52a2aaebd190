//! Cookie-jar scenarios end to end: training, prior odds, likelihoods and
//! posterior odds against hand-computed values.
//!
//! Jar1 holds 40 cookies (10 chocolate, 30 plain, all star-shaped); Jar2
//! holds 30 (15 chocolate, 15 plain, all round).

use std::collections::HashMap;

use ob_core::{
    Accumulation, ClassificationReport, CountStore, Error, Feature, LabeledExample,
    PosteriorOptions, StringLabels, Trainer,
};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn jar(name: &str) -> String {
    name.to_string()
}

fn cookie(label: &str, kind: &str, shape: &str) -> LabeledExample<String> {
    LabeledExample::new(
        jar(label),
        vec![Feature::new("CookieF", kind), Feature::new("ShapeF", shape)],
    )
}

fn two_jar_corpus() -> Vec<LabeledExample<String>> {
    let mut examples = Vec::new();
    for i in 1..=40 {
        let kind = if i > 10 { "plain" } else { "chocolate" };
        examples.push(cookie("Jar1", kind, "star"));
    }
    for i in 1..=30 {
        let kind = if i > 15 { "plain" } else { "chocolate" };
        examples.push(cookie("Jar2", kind, "round"));
    }
    examples
}

fn three_jar_corpus() -> Vec<LabeledExample<String>> {
    let mut examples = two_jar_corpus();
    for _ in 0..40 {
        examples.push(LabeledExample::new(
            jar("Jar3"),
            vec![Feature::new("CookieF", "chocolate")],
        ));
    }
    examples
}

fn two_jars() -> CountStore<String> {
    Trainer::new().train(&two_jar_corpus())
}

fn plain() -> Feature {
    Feature::new("CookieF", "plain")
}

fn chocolate() -> Feature {
    Feature::new("CookieF", "chocolate")
}

// ============================================================================
// Training
// ============================================================================

#[test]
fn training_counts() {
    let store = two_jars();
    assert_eq!(store.labels(), &[jar("Jar1"), jar("Jar2")]);
    assert_eq!(store.cases_total(), 70.0);
    assert_eq!(store.feature_count(&plain(), &jar("Jar1")), 30.0);
    assert_eq!(store.feature_count(&chocolate(), &jar("Jar2")), 15.0);
    assert_eq!(store.label_count(&jar("Jar1")), Some(40.0));
}

// ============================================================================
// Prior odds and likelihoods
// ============================================================================

#[test]
fn prior_odds_of_jar1() {
    let odds = two_jars().prior_odds(&jar("Jar1")).unwrap();
    assert!(approx_eq(odds, 1.333, 0.01), "odds={}", odds);
}

#[test]
fn prior_odds_of_unknown_label() {
    let err = two_jars().prior_odds(&jar("Helicopter")).unwrap_err();
    assert_eq!(err.to_string(), "unknown label 'Helicopter'");
}

#[test]
fn prior_odds_with_single_label_are_infinite() {
    let store = Trainer::new().train(&[LabeledExample::new(
        jar("Surething"),
        vec![Feature::new("question", "yes")],
    )]);
    assert_eq!(store.cases_total(), 1.0);
    let err = store.prior_odds(&jar("Surething")).unwrap_err();
    assert_eq!(err.to_string(), "infinite prior odds");
}

#[test]
fn likelihood_of_plain_for_jar1() {
    let lh = two_jars().likelihood(&plain(), &jar("Jar1")).unwrap();
    assert!(approx_eq(lh, 1.5, 1e-12), "lh={}", lh);
}

#[test]
fn likelihood_errors() {
    let store = two_jars();
    let err = store
        .likelihood(&Feature::new("donat", "plain"), &jar("Jar1"))
        .unwrap_err();
    assert_eq!(err.to_string(), "no feature with name 'donat' and value 'plain'");

    let err = store
        .likelihood(&Feature::new("CookieF", "wood"), &jar("Jar1"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownFeature { .. }));

    let err = store.likelihood(&plain(), &jar("Box")).unwrap_err();
    assert!(matches!(err, Error::UnknownLabel { ref label } if label == "Box"));
}

// ============================================================================
// Posterior odds, two jars
// ============================================================================

#[test]
fn plain_cookie_from_jar1() {
    let res = two_jars()
        .posterior_odds(&[plain()], &PosteriorOptions::new())
        .unwrap();
    assert_eq!(res.max_label, jar("Jar1"));
    assert!(approx_eq(res.max_odds, 2.0, 1e-9), "odds={}", res.max_odds);
}

#[test]
fn plain_cookie_with_prior_override() {
    let opts = PosteriorOptions::new()
        .with_prior_odds(HashMap::from([(jar("Jar1"), 1.0), (jar("Jar2"), 6.0)]));
    let res = two_jars().posterior_odds(&[plain()], &opts).unwrap();
    assert_eq!(res.max_label, jar("Jar2"));
    assert!(approx_eq(res.max_odds, 3.999, 0.1), "odds={}", res.max_odds);
}

#[test]
fn plain_cookie_ignoring_prior_odds() {
    let opts = PosteriorOptions::new().ignore_prior_odds(true);
    let res = two_jars().posterior_odds(&[plain()], &opts).unwrap();
    assert_eq!(res.max_label, jar("Jar1"));
    assert!(approx_eq(res.max_odds, 1.5, 1e-12));
}

#[test]
fn options_do_not_leak_between_calls() {
    let store = two_jars();
    let ignoring = PosteriorOptions::new().ignore_prior_odds(true);
    store.posterior_odds(&[plain()], &ignoring).unwrap();
    let res = store.posterior_odds(&[plain()], &PosteriorOptions::new()).unwrap();
    assert!(approx_eq(res.max_odds, 2.0, 1e-9));
}

#[test]
fn plain_cookie_twice() {
    let res = two_jars()
        .posterior_odds(&[plain(), plain()], &PosteriorOptions::new())
        .unwrap();
    assert_eq!(res.max_label, jar("Jar1"));
    assert!(approx_eq(res.max_odds, 3.0, 1e-9), "odds={}", res.max_odds);
}

#[test]
fn chocolate_star_cookie() {
    let features = [chocolate(), Feature::new("ShapeF", "star")];
    let res = two_jars()
        .posterior_odds(&features, &PosteriorOptions::new())
        .unwrap();
    assert_eq!(res.max_label, jar("Jar1"));
    assert!(approx_eq(res.max_odds, 20.0, 1.0), "odds={}", res.max_odds);
}

#[test]
fn unknown_shape_is_ignored() {
    let features = [plain(), Feature::new("ShapeF", "square")];
    let res = two_jars()
        .posterior_odds(&features, &PosteriorOptions::new())
        .unwrap();
    assert_eq!(res.max_label, jar("Jar1"));
    assert!(approx_eq(res.max_odds, 2.0, 1e-9));
}

#[test]
fn all_features_unknown() {
    let err = two_jars()
        .posterior_odds(&[Feature::new("UnknownF", "x")], &PosteriorOptions::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "all features are unknown");
}

#[test]
fn log_odds_agree_with_linear() {
    let store = two_jars();
    let features = [chocolate(), Feature::new("ShapeF", "star")];
    let opts = PosteriorOptions::new().with_accumulation(Accumulation::Log);
    let res = store.posterior_odds(&features, &opts).unwrap();
    assert_eq!(res.max_label, jar("Jar1"));
    assert!(approx_eq(res.max_odds, 20.0, 1e-9), "odds={}", res.max_odds);
}

// ============================================================================
// Posterior odds, three jars
// ============================================================================

#[test]
fn three_jars_chocolate_twice() {
    let store = Trainer::new().train(&three_jar_corpus());
    let res = store
        .posterior_odds(&[chocolate(), chocolate()], &PosteriorOptions::new())
        .unwrap();
    assert_eq!(res.max_label, jar("Jar3"));
    assert!(approx_eq(res.max_odds, 4.479, 0.001), "odds={}", res.max_odds);
}

#[test]
fn three_jars_plain_with_zero_frequency() {
    let store = Trainer::new().train(&three_jar_corpus());
    let res = store
        .posterior_odds(&[plain()], &PosteriorOptions::new())
        .unwrap();
    assert_eq!(res.max_label, jar("Jar1"));
    assert!(approx_eq(res.max_odds, 2.0, 0.01), "odds={}", res.max_odds);
}

// ============================================================================
// Small corpus
// ============================================================================

#[test]
fn eight_cookies() {
    let rows = [
        ("Jar1", "plain", "round"),
        ("Jar1", "plain", "star"),
        ("Jar1", "chocolate", "star"),
        ("Jar1", "plain", "round"),
        ("Jar1", "plain", "round"),
        ("Jar2", "chocolate", "star"),
        ("Jar2", "chocolate", "star"),
        ("Jar2", "chocolate", "star"),
    ];
    let examples: Vec<_> = rows
        .iter()
        .map(|(label, kind, shape)| {
            LabeledExample::new(
                jar(label),
                vec![Feature::new("kind", *kind), Feature::new("shape", *shape)],
            )
        })
        .collect();
    let store = Trainer::new().train(&examples);

    let prior = store.prior_odds(&jar("Jar1")).unwrap();
    assert_eq!(format!("{:.2}", prior), "1.67");

    let features = [
        Feature::new("kind", "chocolate"),
        Feature::new("shape", "star"),
    ];
    let res = store.posterior_odds(&features, &PosteriorOptions::new()).unwrap();
    assert_eq!(res.max_label, jar("Jar2"));
    assert_eq!(format!("{:.2}", res.max_odds), "7.50");

    let report = ClassificationReport::new(&res, &StringLabels, Accumulation::Linear);
    assert_eq!(report.max_label, "Jar2");
    assert_eq!(report.evidence.entries()[0].feature, "kind: chocolate");
}
