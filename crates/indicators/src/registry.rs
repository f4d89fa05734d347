//! Indicator registry for dynamic indicator creation.

use crate::engine::IndicatorResult;
use crate::error::IndicatorError;
use crate::impl_::{
    bollinger::{BandSeries, BollingerBands},
    ema::EMA,
    rsi::RSI,
    sma::SMA,
};
use crate::traits::{Indicator, MultiOutputIndicator};
use std::collections::HashMap;
use std::sync::Arc;
use tadash_types::{IndicatorKind, IndicatorRequest, Series};

/// A built indicator, ready to run against a series.
#[derive(Clone)]
pub enum IndicatorHandle {
    /// Single-output indicator (SMA, EMA, RSI).
    Single(Arc<dyn Indicator>),
    /// Three-band indicator (Bollinger Bands).
    Bands(Arc<dyn MultiOutputIndicator<Output = BandSeries>>),
}

impl IndicatorHandle {
    /// Name of the underlying indicator.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            IndicatorHandle::Single(ind) => ind.name(),
            IndicatorHandle::Bands(ind) => ind.name(),
        }
    }

    /// Minimum series length for at least one defined output.
    #[must_use]
    pub fn required_len(&self) -> usize {
        match self {
            IndicatorHandle::Single(ind) => ind.required_len(),
            IndicatorHandle::Bands(ind) => ind.required_len(),
        }
    }

    /// Runs the indicator over `series`.
    #[must_use]
    pub fn compute(&self, series: &Series) -> IndicatorResult {
        match self {
            IndicatorHandle::Single(ind) => IndicatorResult::Single(ind.compute(series)),
            IndicatorHandle::Bands(ind) => IndicatorResult::Bands(ind.compute_all(series)),
        }
    }
}

impl std::fmt::Debug for IndicatorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IndicatorHandle").field(&self.name()).finish()
    }
}

/// Factory function type for creating indicators from a request.
pub type IndicatorFactory =
    Box<dyn Fn(&IndicatorRequest) -> Result<IndicatorHandle, IndicatorError> + Send + Sync>;

/// Registry for indicator factories.
///
/// Maps an indicator name (`"SMA"`, `"BBANDS"`, ...) to the factory that
/// validates a request's parameters and builds the indicator.
pub struct IndicatorRegistry {
    /// Indicator factories by name.
    factories: HashMap<String, IndicatorFactory>,
}

impl IndicatorRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers an indicator factory, replacing any previous one under `name`.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&IndicatorRequest) -> Result<IndicatorHandle, IndicatorError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Removes the factory registered under `name`, if any.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// Creates an indicator for a request.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::UnknownIndicator`] if the request's kind is not
    /// registered, or whatever the factory rejects the parameters with.
    pub fn create(&self, request: &IndicatorRequest) -> Result<IndicatorHandle, IndicatorError> {
        let kind = request.kind.as_str();
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| IndicatorError::UnknownIndicator(kind.to_string()))?;
        factory(request)
    }

    /// Checks if an indicator is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns list of registered indicator names.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Creates a registry with SMA, EMA, RSI and BBANDS pre-registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(IndicatorKind::Sma.as_str(), |req| {
            Ok(IndicatorHandle::Single(Arc::new(SMA::new(req.period))))
        });

        registry.register(IndicatorKind::Ema.as_str(), |req| {
            Ok(IndicatorHandle::Single(Arc::new(EMA::new(req.period))))
        });

        registry.register(IndicatorKind::Rsi.as_str(), |req| {
            Ok(IndicatorHandle::Single(Arc::new(RSI::new(req.period))))
        });

        registry.register(IndicatorKind::Bbands.as_str(), |req| {
            check_multiplier("num_std_dev_up", req.num_std_dev_up)?;
            check_multiplier("num_std_dev_down", req.num_std_dev_down)?;
            Ok(IndicatorHandle::Bands(Arc::new(BollingerBands::new(
                req.period,
                req.num_std_dev_up,
                req.num_std_dev_down,
            ))))
        });

        registry
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Band multipliers must be finite and non-negative.
fn check_multiplier(field: &str, value: f64) -> Result<(), IndicatorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(IndicatorError::degenerate(format!(
            "{field} must be a finite value >= 0, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_series(values: &[f64]) -> Series {
        Series::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as i64 * 60, *v)),
        )
        .unwrap()
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = IndicatorRegistry::with_defaults();

        assert!(registry.contains("SMA"));
        assert!(registry.contains("EMA"));
        assert!(registry.contains("RSI"));
        assert!(registry.contains("BBANDS"));
        assert!(!registry.contains("UNKNOWN"));
        assert_eq!(registry.names().len(), 4);
    }

    #[test]
    fn test_registry_create_sma() {
        let registry = IndicatorRegistry::with_defaults();
        let indicator = registry.create(&IndicatorRequest::sma(5)).unwrap();

        assert_eq!(indicator.name(), "SMA");
        assert_eq!(indicator.required_len(), 5);
    }

    #[test]
    fn test_registry_create_rsi() {
        let registry = IndicatorRegistry::with_defaults();
        let indicator = registry.create(&IndicatorRequest::rsi(14)).unwrap();

        assert_eq!(indicator.name(), "RSI");
        assert_eq!(indicator.required_len(), 15);
    }

    #[test]
    fn test_registry_create_bbands() {
        let registry = IndicatorRegistry::with_defaults();
        let indicator = registry
            .create(&IndicatorRequest::bbands(20, 2.0, 2.0))
            .unwrap();

        assert!(matches!(indicator, IndicatorHandle::Bands(_)));
        assert_eq!(indicator.name(), "BBANDS");
    }

    #[test]
    fn test_registry_rejects_negative_multiplier() {
        let registry = IndicatorRegistry::with_defaults();
        let err = registry
            .create(&IndicatorRequest::bbands(20, -1.0, 2.0))
            .unwrap_err();

        assert!(matches!(err, IndicatorError::DegenerateParameters(_)));
        assert!(err.to_string().contains("num_std_dev_up"));
    }

    #[test]
    fn test_registry_rejects_non_finite_multiplier() {
        let registry = IndicatorRegistry::with_defaults();
        let err = registry
            .create(&IndicatorRequest::bbands(20, 2.0, f64::NAN))
            .unwrap_err();

        assert!(matches!(err, IndicatorError::DegenerateParameters(_)));
        assert!(err.to_string().contains("num_std_dev_down"));
    }

    #[test]
    fn test_registry_unknown_indicator() {
        let mut registry = IndicatorRegistry::with_defaults();
        assert!(registry.unregister("EMA"));

        match registry.create(&IndicatorRequest::ema(5)) {
            Err(IndicatorError::UnknownIndicator(name)) => assert_eq!(name, "EMA"),
            other => panic!("Expected UnknownIndicator error, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_compute() {
        let registry = IndicatorRegistry::with_defaults();
        let indicator = registry.create(&IndicatorRequest::sma(3)).unwrap();
        let result = indicator.compute(&make_series(&[1.0, 2.0, 3.0, 4.0, 5.0]));

        let IndicatorResult::Single(series) = result else {
            panic!("SMA should produce a single series");
        };
        assert_eq!(series.len(), 5);
        assert!(series.value_at(1).is_missing());
        assert!((series.value_at(2).value().unwrap() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_registry_custom_factory_replaces_default() {
        let mut registry = IndicatorRegistry::with_defaults();

        // Doubles the requested period
        registry.register("SMA", |req| {
            Ok(IndicatorHandle::Single(Arc::new(SMA::new(req.period * 2))))
        });

        let indicator = registry.create(&IndicatorRequest::sma(5)).unwrap();
        assert_eq!(indicator.required_len(), 10);
    }
}
