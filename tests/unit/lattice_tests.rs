use volsurface_rs::prelude::*;

fn reference(option_type: OptionType) -> OptionParameters {
    OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, option_type)
}

fn european(steps: usize, params: &OptionParameters) -> f64 {
    BinomialTree::new(steps)
        .price(params, ExerciseStyle::European)
        .unwrap()
}

#[test]
fn test_european_call_convergence_table() {
    let params = reference(OptionType::Call);
    let analytic = BlackScholes::new().price(&params);

    let mut previous_error = f64::INFINITY;
    for steps in [25, 50, 100, 250, 500, 1000] {
        let error = (european(steps, &params) - analytic).abs();
        assert!(error < previous_error, "N={steps}: {error} >= {previous_error}");
        previous_error = error;
    }
    assert!(previous_error < 2.5e-3);
}

#[test]
fn test_european_call_within_tolerance_at_high_resolution() {
    let params = reference(OptionType::Call);
    let analytic = BlackScholes::new().price(&params);
    assert!((european(2500, &params) - analytic).abs() < 1e-3);
}

#[test]
fn test_odd_even_average_removes_oscillation() {
    let params = reference(OptionType::Call);
    let analytic = BlackScholes::new().price(&params);
    let average = 0.5 * (european(1000, &params) + european(1001, &params));
    assert!((average - analytic).abs() < 1e-3);
}

#[test]
fn test_european_put_tracks_analytic() {
    let params = reference(OptionType::Put);
    let analytic = BlackScholes::new().price(&params);
    assert!((european(500, &params) - analytic).abs() < 5e-3);
}

#[test]
fn test_early_exercise_premium_for_put() {
    let params = reference(OptionType::Put);
    let tree = BinomialTree::new(500);
    let american = tree.price(&params, ExerciseStyle::American).unwrap();
    let european = tree.price(&params, ExerciseStyle::European).unwrap();

    assert!(american > european);
    assert!((american - european - 0.5193).abs() < 1e-3);
}

#[test]
fn test_american_call_has_no_premium() {
    let params = reference(OptionType::Call);
    let premium = BinomialTree::new(500)
        .early_exercise_premium(&params)
        .unwrap();
    assert!(premium.abs() < 1e-10);
}

#[test]
fn test_non_positive_volatility_is_floored() {
    let params = OptionParameters::call(100.0, 90.0, 1.0, 0.0, 0.0);
    let price = BinomialTree::new(100)
        .price(&params, ExerciseStyle::European)
        .unwrap();
    assert!(price.is_finite());
    assert!((price - 10.0).abs() < 1e-3);
}
