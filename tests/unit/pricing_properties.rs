use proptest::prelude::*;
use volsurface_rs::prelude::*;

fn option_type() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

proptest! {
    #[test]
    fn put_call_parity_holds(
        spot in 10.0f64..500.0,
        strike in 10.0f64..500.0,
        time in 0.01f64..3.0,
        rate in -0.02f64..0.10,
        vol in 0.05f64..1.5,
    ) {
        let model = BlackScholes::new();
        let call = model.price(&OptionParameters::call(spot, strike, time, rate, vol));
        let put = model.price(&OptionParameters::put(spot, strike, time, rate, vol));
        let forward = spot - strike * (-rate * time).exp();
        prop_assert!((call - put - forward).abs() < 1e-8, "parity gap {}", call - put - forward);
    }

    #[test]
    fn expired_price_is_intrinsic(
        spot in 1.0f64..500.0,
        strike in 1.0f64..500.0,
        rate in -0.05f64..0.2,
        vol in -1.0f64..3.0,
        option_type in option_type(),
    ) {
        let params = OptionParameters::new(spot, strike, 0.0, rate, vol, option_type);
        let expected = match option_type {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        };
        prop_assert_eq!(BlackScholes::new().price(&params), expected);
        prop_assert_eq!(BlackScholes::new().greeks(&params), GreeksResult::zero());
    }

    #[test]
    fn gamma_and_vega_positive_before_expiry(
        strike in 70.0f64..130.0,
        time in 0.05f64..2.0,
        rate in 0.0f64..0.08,
        vol in 0.1f64..1.0,
        option_type in option_type(),
    ) {
        let params = OptionParameters::new(100.0, strike, time, rate, vol, option_type);
        let greeks = BlackScholes::new().greeks(&params);
        prop_assert!(greeks.gamma > 0.0);
        prop_assert!(greeks.vega > 0.0);
    }

    #[test]
    fn atm_call_delta_above_half(
        spot in 10.0f64..500.0,
        time in 0.01f64..3.0,
        rate in 0.001f64..0.10,
        vol in 0.05f64..1.5,
    ) {
        let delta = BlackScholes::new().delta(&OptionParameters::call(spot, spot, time, rate, vol));
        prop_assert!(delta > 0.5 && delta < 1.0, "delta {}", delta);
    }

    #[test]
    fn american_put_never_below_european(
        spot in 50.0f64..150.0,
        strike in 50.0f64..150.0,
        time in 0.1f64..3.0,
        rate in 0.0f64..0.10,
        vol in 0.05f64..0.8,
        steps in 50usize..200,
    ) {
        let params = OptionParameters::put(spot, strike, time, rate, vol);
        let premium = BinomialTree::new(steps).early_exercise_premium(&params).unwrap();
        prop_assert!(premium >= -1e-12, "premium {}", premium);
    }

    #[test]
    fn american_call_matches_european_without_dividends(
        spot in 50.0f64..150.0,
        strike in 50.0f64..150.0,
        time in 0.1f64..3.0,
        rate in 0.0f64..0.10,
        vol in 0.05f64..0.8,
        steps in 50usize..200,
    ) {
        let params = OptionParameters::call(spot, strike, time, rate, vol);
        let premium = BinomialTree::new(steps).early_exercise_premium(&params).unwrap();
        prop_assert!(premium.abs() < 1e-9, "premium {}", premium);
    }

    #[test]
    fn implied_volatility_round_trips(
        strike in 90.0f64..110.0,
        time in 0.25f64..2.0,
        rate in 0.0f64..0.08,
        vol in 0.1f64..0.8,
        option_type in option_type(),
    ) {
        let model = BlackScholes::new();
        let params = OptionParameters::new(100.0, strike, time, rate, vol, option_type);
        let market_price = model.price(&params);
        let iv = implied_volatility(&model, market_price, &params, &SolverConfig::default());
        prop_assert!(iv.is_some());
        prop_assert!((iv.unwrap_or_default() - vol).abs() < 1e-4);
    }
}
