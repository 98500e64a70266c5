#[cfg(test)]
mod tests {
    use crate::config::{curve_state_json, load_curve_params};
    use crate::*;
    use anyhow::Result;
    use approx::assert_relative_eq;
    use once_cell::sync::Lazy;
    use std::thread;

    static DEFAULT_CURVE: Lazy<BondingCurve> = Lazy::new(BondingCurve::default);

    // Helper to load the canonical display curve the way a caller would
    fn setup_default_curve() -> Result<BondingCurve> {
        let params = load_curve_params(br#"{"curve_type":"exponential","base_price":0.0001,"exponent":1.5}"#)?;
        params.validate()?;
        Ok(BondingCurve::new(params))
    }

    #[test]
    fn test_configured_curve_matches_default() -> Result<()> {
        let curve = setup_default_curve()?;

        assert_eq!(curve, BondingCurve::default());
        assert_eq!(curve.price_at(0.0), 0.0);
        assert_eq!(curve.price_at(1.0), 0.0001);
        assert_relative_eq!(curve.price_at(100.0), 0.1, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn test_graduation_supply_on_default_curve() -> Result<()> {
        let curve = setup_default_curve()?;

        // market cap = 0.0001 * s^2.5, so graduation sits at s = (9e8)^(1/2.5)
        let graduation_supply = (GRADUATION_THRESHOLD / curve.base_price()).powf(1.0 / 2.5);
        assert!(!should_graduate(curve.market_cap_at(graduation_supply * 0.999)));
        assert!(should_graduate(curve.market_cap_at(graduation_supply * 1.001)));
        Ok(())
    }

    #[test]
    fn test_buy_flow_graduates_exactly_once() -> Result<()> {
        let curve = BondingCurve::new(CurveParams::linear(1.0, 0.5));
        let mut lifecycle = TokenLifecycle::new();
        let mut supply = 0.0;
        let mut events = Vec::new();

        for _ in 0..12 {
            lifecycle.ensure_trading()?;
            let quote = buy_quote(&curve, supply, 50.0)?;
            supply = quote.new_supply;

            let market_cap = calculate_market_cap(supply, curve.price_at(supply));
            if let Some(event) = lifecycle.observe(market_cap) {
                events.push(event);
            }
            if lifecycle.is_graduated() {
                break;
            }
        }

        // 450 tokens: 450 * 226 = 101,700 is the first cap over the threshold
        assert_eq!(supply, 450.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].market_cap, 101_700.0);
        assert!(matches!(
            lifecycle.ensure_trading(),
            Err(CurveError::AlreadyGraduated(Phase::Graduated))
        ));
        assert!(lifecycle.observe(0.0).is_none());
        Ok(())
    }

    #[test]
    fn test_market_cap_from_last_trade_price() {
        let mut cache: PriceCache<&str> = PriceCache::new(16, 60);
        cache.insert("SOL/USD", 150.0, 1_000);

        let sol_usd = cache.get(&"SOL/USD", 1_030).unwrap_or(0.0);
        let cap = market_cap_usd(1_000_000.0, 0.0006, sol_usd);

        assert_relative_eq!(cap, 90_000.0, max_relative = 1e-9);
        assert_eq!(cache.get(&"SOL/USD", 1_060), None);
    }

    #[test]
    fn test_cached_curve_prices() {
        let curve = setup_default_curve().expect("default curve loads");
        let mut cache: PriceCache<u64> = PriceCache::default();

        let price = cache.get_or_insert_with(100, 0, || curve.price_at(100.0));
        assert_relative_eq!(price, 0.1, max_relative = 1e-9);
        assert_eq!(cache.get(&100, 1), Some(price));
    }

    #[test]
    fn test_state_snapshot_for_default_curve() -> Result<()> {
        let curve = setup_default_curve()?;
        let state = curve_state_json(&curve, 100.0);

        assert_eq!(state["curve_type"], "exponential");
        assert_eq!(state["graduation_threshold"], 90_000.0);
        assert_eq!(state["can_graduate"], false);
        let progress = state["graduation_progress"].as_f64().unwrap_or(-1.0);
        // market cap 10 against a 90k threshold
        assert_relative_eq!(progress, 10.0 / 900.0, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn test_shared_curve_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let supply = 100.0 * (i + 1) as f64;
                    let price = DEFAULT_CURVE.price_at(supply);
                    (supply, price, DEFAULT_CURVE.supply_at_price(price))
                })
            })
            .collect();

        for handle in handles {
            let (supply, price, inverse) = handle.join().expect("worker panicked");
            assert_eq!(price, BondingCurve::default().price_at(supply));
            assert_relative_eq!(inverse, supply, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_chart_points_are_non_decreasing() {
        let points = price_points(&DEFAULT_CURVE, 1_000_000.0, 64);

        assert_eq!(points.len(), 65);
        assert_eq!(points[0], PricePoint { supply: 0.0, price: 0.0 });
        assert!(points.windows(2).all(|pair| pair[1].price >= pair[0].price));
    }
}
