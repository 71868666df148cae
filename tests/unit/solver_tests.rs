use volsurface_rs::prelude::*;

#[test]
fn test_reference_round_trip() {
    let model = BlackScholes::new();
    let params = OptionParameters::call(100.0, 100.0, 1.0, 0.05, 0.2);
    let price = model.price(&params);

    let iv = implied_volatility(&model, price, &params, &SolverConfig::default()).unwrap();
    assert!((iv - 0.2).abs() < 1e-4);
}

#[test]
fn test_non_convergence_uses_full_budget() {
    let model = BlackScholes::new();
    let params = OptionParameters::call(100.0, 100.0, 1.0, 0.05, 0.2);

    for max_iterations in [1, 10, 100, 250] {
        let config = SolverConfig::new().with_max_iterations(max_iterations);
        for target in [-1.0, 1e6] {
            match solve_iv(&model, target, &params, &config) {
                Err(PricingError::NonConvergence { iterations, last_iv }) => {
                    assert_eq!(iterations, max_iterations);
                    assert!(last_iv > 0.0 && last_iv <= config.max_iv);
                }
                other => panic!("target {target}: expected non-convergence, got {other:?}"),
            }
            assert!(implied_volatility(&model, target, &params, &config).is_none());
        }
    }
}

#[test]
fn test_zero_iterations_never_converges() {
    let model = BlackScholes::new();
    let params = OptionParameters::call(100.0, 100.0, 1.0, 0.05, 0.2);
    let price = model.price(&params);
    let config = SolverConfig::new().with_max_iterations(0);

    assert!(matches!(
        solve_iv(&model, price, &params, &config),
        Err(PricingError::NonConvergence { iterations: 0, .. })
    ));
}

#[test]
fn test_repriced_volatility_matches_market() {
    let model = BlackScholes::new();
    let params = OptionParameters::put(187.5, 180.0, 45.0 / 365.25, 0.043, 0.0);
    let market_price = 3.85;

    let iv = implied_volatility(&model, market_price, &params, &SolverConfig::default()).unwrap();
    let repriced = model.price(&params.with_volatility(iv));
    assert!((repriced - market_price).abs() < 1e-6);
}

#[test]
fn test_custom_initial_guess_reaches_same_root() {
    let model = BlackScholes::new();
    let params = OptionParameters::call(100.0, 105.0, 0.5, 0.02, 0.33);
    let price = model.price(&params);

    let default = solve_iv(&model, price, &params, &SolverConfig::default()).unwrap();
    let seeded = solve_iv(
        &model,
        price,
        &params,
        &SolverConfig::new().with_initial_guess(0.3),
    )
    .unwrap();
    assert!((default.iv - seeded.iv).abs() < 1e-5);
    assert!(seeded.iterations <= default.iterations);
}

#[test]
fn test_iteration_count_matches_work_done() {
    let model = BlackScholes::new();
    let params = OptionParameters::put(100.0, 95.0, 0.75, 0.03, 0.28);
    let price = model.price(&params);

    let solution = solve_iv(&model, price, &params, &SolverConfig::default()).unwrap();
    assert!(solution.iterations > 1 && solution.iterations < 100);

    // The exact budget is enough; one fewer is not.
    let exact = SolverConfig::new().with_max_iterations(solution.iterations);
    assert_eq!(solve_iv(&model, price, &params, &exact).unwrap(), solution);

    let short = SolverConfig::new().with_max_iterations(solution.iterations - 1);
    match solve_iv(&model, price, &params, &short) {
        Err(PricingError::NonConvergence { iterations, .. }) => {
            assert_eq!(iterations, solution.iterations - 1);
        }
        other => panic!("expected non-convergence, got {other:?}"),
    }
}
