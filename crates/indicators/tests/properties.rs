//! Property tests over randomly generated price series.

use proptest::prelude::*;
use tadash_indicators::{
    BollingerBands, EMA, Indicator, IndicatorEngine, MultiOutputIndicator, RSI, SMA,
};
use tadash_types::{IndicatorRequest, PeriodPolicy, Sample, Series};

const STEP_NS: i64 = 86_400_000_000_000;

fn series_from(values: Vec<Option<f64>>) -> Series {
    let keys = (0..values.len() as i64).map(|i| i * STEP_NS).collect();
    Series::new(keys, values.into_iter().map(Sample::from).collect()).unwrap()
}

/// Price series with roughly one sample in ten missing.
fn gappy_series(max_len: usize) -> impl Strategy<Value = Series> {
    prop::collection::vec(prop::option::weighted(0.9, 1.0f64..1_000.0), 0..max_len)
        .prop_map(series_from)
}

fn dense_series(max_len: usize) -> impl Strategy<Value = Series> {
    prop::collection::vec(1.0f64..1_000.0, 0..max_len)
        .prop_map(|values| series_from(values.into_iter().map(Some).collect()))
}

fn requests(period: usize) -> Vec<IndicatorRequest> {
    vec![
        IndicatorRequest::sma(period),
        IndicatorRequest::ema(period),
        IndicatorRequest::rsi(period),
        IndicatorRequest::bbands(period, 2.0, 1.5),
    ]
}

proptest! {
    #[test]
    fn prop_results_aligned_with_input(series in gappy_series(120), period in 0usize..30) {
        let engine = IndicatorEngine::new(PeriodPolicy::Lenient);
        let set = engine.compute(&series, &requests(period));

        if series.is_empty() {
            prop_assert!(set.is_empty());
        }
        for (name, outcome) in set.iter() {
            let result = outcome.as_ref().unwrap();
            prop_assert!(result.is_aligned_with(&series), "{} misaligned", name);
        }
    }

    #[test]
    fn prop_compute_is_deterministic(series in gappy_series(120), period in 1usize..30) {
        let engine = IndicatorEngine::default();
        let first = engine.compute(&series, &requests(period));
        let second = engine.compute(&series, &requests(period));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_parallel_matches_sequential(series in gappy_series(120), period in 0usize..30) {
        let engine = IndicatorEngine::new(PeriodPolicy::Strict);
        prop_assert_eq!(
            engine.compute(&series, &requests(period)),
            engine.compute_parallel(&series, &requests(period))
        );
    }

    #[test]
    fn prop_rsi_bounded(series in gappy_series(150), period in 1usize..20) {
        let result = RSI::new(period).compute(&series);
        for v in result.values().iter().filter_map(|s| s.value()) {
            prop_assert!((0.0..=100.0).contains(&v), "RSI out of range: {}", v);
        }
    }

    #[test]
    fn prop_bollinger_bands_ordered(
        series in gappy_series(150),
        period in 1usize..25,
        up in 0.0f64..4.0,
        down in 0.0f64..4.0,
    ) {
        let bands = BollingerBands::new(period, up, down).compute_all(&series);
        for i in 0..series.len() {
            match (bands.lower.value_at(i), bands.middle.value_at(i), bands.upper.value_at(i)) {
                (Sample::Present(lo), Sample::Present(mid), Sample::Present(hi)) => {
                    prop_assert!(lo <= mid && mid <= hi, "bands out of order at {}", i);
                }
                (Sample::Missing, Sample::Missing, Sample::Missing) => {}
                other => prop_assert!(false, "bands disagree on Missing at {}: {:?}", i, other),
            }
        }
    }

    #[test]
    fn prop_sma_of_constant_is_constant(c in -1.0e6f64..1.0e6, len in 1usize..200, period in 1usize..50) {
        let series = series_from(vec![Some(c); len]);
        let result = SMA::new(period).compute(&series);

        for (i, v) in result.values().iter().enumerate() {
            if i + 1 < period {
                prop_assert!(v.is_missing());
            } else {
                let v = v.value().unwrap();
                prop_assert!((v - c).abs() <= 1e-9 * c.abs().max(1.0), "{} != {}", v, c);
            }
        }
    }

    #[test]
    fn prop_ema_monotone_on_monotone_input(mut steps in prop::collection::vec(0.0f64..5.0, 1..150), period in 1usize..20) {
        let mut level = 100.0;
        for step in &mut steps {
            level += *step;
            *step = level;
        }
        let series = series_from(steps.into_iter().map(Some).collect());
        let result = EMA::new(period).compute(&series);

        let defined: Vec<f64> = result.values().iter().filter_map(|s| s.value()).collect();
        for pair in defined.windows(2) {
            prop_assert!(pair[1] >= pair[0] - 1e-9 * pair[0].abs(), "{} < {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn prop_warmup_prefix_is_missing(series in dense_series(100), period in 1usize..30) {
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(SMA::new(period)),
            Box::new(EMA::new(period)),
            Box::new(RSI::new(period)),
        ];

        for indicator in &indicators {
            let result = indicator.compute(&series);
            let warmup = indicator.warmup_periods().min(series.len());
            prop_assert!(result.values()[..warmup].iter().all(|v| v.is_missing()));
            prop_assert!(result.values()[warmup..].iter().all(|v| v.is_present()));
        }
    }
}
