//! Property-based tests for the tracking and valuation laws.
//!
//! These tests verify that:
//! 1. The position on every date is the sum of all trades dated on or before it
//! 2. Compounding period returns reproduces the total series
//! 3. Benchmarks start at the portfolio's first total
//! 4. Without trades the portfolio stays at its initial capital

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use optfolio::domain::benchmark::simulate;
use optfolio::domain::portfolio::value;
use optfolio::domain::position::track;
use optfolio::domain::price::PriceSeries;
use optfolio::domain::transaction::{sort_transactions, Transaction};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Strictly ascending date index with gaps of 1-3 days.
fn index_strategy() -> impl Strategy<Value = Vec<NaiveDate>> {
    prop::collection::vec(1i64..=3, 1..40).prop_map(|gaps| {
        let mut day = 0i64;
        gaps.iter()
            .map(|g| {
                day += g;
                base() + Duration::days(day)
            })
            .collect()
    })
}

fn closes_strategy(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.5..500.0f64, len)
}

/// Trades dated anywhere up to the last index date, sorted.
fn trades_strategy(last_day: i64) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((0..=last_day, -20i32..=20), 0..25).prop_map(|raw| {
        let mut txs: Vec<Transaction> = raw
            .into_iter()
            .map(|(d, q)| Transaction::new(base() + Duration::days(d), q as f64))
            .collect();
        sort_transactions(&mut txs);
        txs
    })
}

fn scenario() -> impl Strategy<Value = (Vec<NaiveDate>, Vec<f64>, Vec<Transaction>)> {
    index_strategy().prop_flat_map(|index| {
        let last_day = (index[index.len() - 1] - base()).num_days();
        let len = index.len();
        (Just(index), closes_strategy(len), trades_strategy(last_day))
    })
}

proptest! {
    #[test]
    fn position_is_sum_of_trades_to_date((index, _closes, txs) in scenario()) {
        let positions = track(&txs, &index).unwrap();
        for point in &positions.points {
            let expected: f64 = txs
                .iter()
                .filter(|t| t.date <= point.date)
                .map(|t| t.quantity)
                .sum();
            prop_assert_eq!(point.quantity, expected);
        }
    }

    #[test]
    fn compounding_reproduces_totals(
        (index, closes, txs) in scenario(),
        capital in 10_000.0..1_000_000.0f64,
    ) {
        let prices = PriceSeries::from_closes("OPT", &index, &closes).unwrap();
        let positions = track(&txs, &index).unwrap();
        let pf = value(&positions, &prices, 100.0, capital).unwrap();

        let initial = pf.points[0].total;
        prop_assume!(pf.points.iter().all(|p| p.total.abs() > 1e-6));
        let mut growth = 1.0;
        for p in &pf.points {
            if let Some(r) = p.period_return {
                growth *= 1.0 + r;
            }
            let rebuilt = initial * growth;
            prop_assert!((rebuilt - p.total).abs() <= 1e-6 * p.total.abs().max(1.0));
            let drift = (growth - 1.0 - p.cumulative_return).abs();
            prop_assert!(drift <= 1e-9 * growth.abs().max(1.0));
        }
    }

    #[test]
    fn benchmark_starts_at_parity(
        (index, closes, txs) in scenario(),
        asset in prop::collection::vec(1.0..1000.0f64, 40),
    ) {
        let prices = PriceSeries::from_closes("OPT", &index, &closes).unwrap();
        let bench = PriceSeries::from_closes("SPY", &index, &asset[..index.len()]).unwrap();
        let positions = track(&txs, &index).unwrap();
        let pf = value(&positions, &prices, 100.0, 0.0).unwrap();

        let b = simulate(&bench, pf.points[0].total).unwrap();
        let start = pf.points[0].total;
        prop_assert!((b.points[0].value - start).abs() <= 1e-9 * start.abs().max(1.0));
    }

    #[test]
    fn no_trades_keeps_initial_capital(
        index in index_strategy(),
        capital in -1_000.0..1_000.0f64,
    ) {
        let closes: Vec<f64> = (0..index.len()).map(|i| 1.0 + i as f64).collect();
        let prices = PriceSeries::from_closes("OPT", &index, &closes).unwrap();
        let positions = track(&[], &index).unwrap();
        let pf = value(&positions, &prices, 100.0, capital).unwrap();

        for p in &pf.points {
            prop_assert_eq!(p.holdings, 0.0);
            prop_assert_eq!(p.total, capital);
        }
    }
}
