//! Indicator engine.
//!
//! Turns one input [`Series`] and an ordered list of [`IndicatorRequest`]s
//! into an [`IndicatorSet`]. Requests are evaluated independently; a failing
//! request is recorded in the set and never aborts its siblings.

use crate::error::IndicatorError;
use crate::impl_::bollinger::BandSeries;
use crate::registry::IndicatorRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tadash_types::{IndicatorRequest, PeriodPolicy, Series};
use tracing::{debug, warn};

/// Output of one indicator request, aligned with the input key axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorResult {
    /// SMA, EMA and RSI.
    Single(Series),
    /// Bollinger Bands.
    Bands(BandSeries),
}

impl IndicatorResult {
    /// All output series of this result, in output-name order.
    #[must_use]
    pub fn series(&self) -> Vec<&Series> {
        match self {
            IndicatorResult::Single(s) => vec![s],
            IndicatorResult::Bands(b) => vec![&b.upper, &b.middle, &b.lower],
        }
    }

    /// True when every output series shares the key axis of `input`.
    #[must_use]
    pub fn is_aligned_with(&self, input: &Series) -> bool {
        self.series().iter().all(|s| s.is_aligned_with(input))
    }
}

/// Per-request outcome of an engine run.
pub type RequestOutcome = Result<IndicatorResult, IndicatorError>;

/// Ordered mapping from request name to its outcome.
///
/// Entries keep request order. A duplicated name appears twice: the first
/// entry holds the computed result, the later one a
/// [`IndicatorError::DuplicateName`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    entries: Vec<(String, RequestOutcome)>,
}

impl IndicatorSet {
    /// Outcome recorded under `name` (first entry wins).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RequestOutcome> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, outcome)| outcome)
    }

    /// Successful result under `name`, if any.
    #[must_use]
    pub fn ok(&self, name: &str) -> Option<&IndicatorResult> {
        self.get(name).and_then(|outcome| outcome.as_ref().ok())
    }

    /// Iterates `(name, outcome)` in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RequestOutcome)> {
        self.entries.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in request order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Failed entries in request order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &IndicatorError)> {
        self.entries.iter().filter_map(|(name, outcome)| match outcome {
            Ok(_) => None,
            Err(err) => Some((name.as_str(), err)),
        })
    }
}

impl IntoIterator for IndicatorSet {
    type Item = (String, RequestOutcome);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Stateless indicator orchestrator.
///
/// Holds only the factory registry and the period policy; every call is a
/// pure function of its inputs.
pub struct IndicatorEngine {
    registry: IndicatorRegistry,
    policy: PeriodPolicy,
}

impl IndicatorEngine {
    /// Engine with the default indicators and the given policy.
    #[must_use]
    pub fn new(policy: PeriodPolicy) -> Self {
        Self::with_registry(IndicatorRegistry::with_defaults(), policy)
    }

    /// Engine with a custom registry.
    #[must_use]
    pub fn with_registry(registry: IndicatorRegistry, policy: PeriodPolicy) -> Self {
        Self { registry, policy }
    }

    /// Period policy applied before each indicator runs.
    #[must_use]
    pub fn policy(&self) -> PeriodPolicy {
        self.policy
    }

    /// The factory registry.
    #[must_use]
    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    /// Evaluates every request in order on the calling thread.
    #[must_use]
    pub fn compute(&self, series: &Series, requests: &[IndicatorRequest]) -> IndicatorSet {
        if series.is_empty() {
            debug!(requests = requests.len(), "Empty input series, nothing to compute");
            return IndicatorSet::default();
        }

        self.evaluate_all(series, requests)
    }

    /// Outcomes for a run without input data.
    ///
    /// Unlike [`IndicatorEngine::compute`] on an empty series, every request
    /// still goes through its factory: parameter errors and duplicate names
    /// are reported, and each success is an empty result.
    #[must_use]
    pub fn resolve_empty(&self, requests: &[IndicatorRequest]) -> IndicatorSet {
        self.evaluate_all(&Series::empty(), requests)
    }

    /// Same result as [`IndicatorEngine::compute`], evaluated on scoped threads.
    ///
    /// Requests run in batches of at most [`std::thread::available_parallelism`]
    /// workers. A request whose thread cannot be spawned is evaluated on the
    /// calling thread.
    #[must_use]
    pub fn compute_parallel(&self, series: &Series, requests: &[IndicatorRequest]) -> IndicatorSet {
        if series.is_empty() {
            debug!(requests = requests.len(), "Empty input series, nothing to compute");
            return IndicatorSet::default();
        }

        let workers = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        let flags = duplicate_flags(requests);
        let mut entries = Vec::with_capacity(requests.len());

        for (batch, batch_flags) in requests.chunks(workers).zip(flags.chunks(workers)) {
            std::thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .iter()
                    .zip(batch_flags)
                    .map(|(request, &duplicate)| {
                        let handle = (!duplicate).then(|| {
                            std::thread::Builder::new()
                                .spawn_scoped(scope, move || self.evaluate(series, request))
                        });
                        (request, handle)
                    })
                    .collect();

                for (request, handle) in handles {
                    let outcome = match handle {
                        Some(Ok(handle)) => handle.join().unwrap_or_else(|_| {
                            Err(IndicatorError::computation(format!(
                                "worker for {} panicked",
                                request.name()
                            )))
                        }),
                        Some(Err(err)) => {
                            warn!(
                                name = request.name(),
                                error = %err,
                                "Worker spawn failed, evaluating inline"
                            );
                            self.evaluate(series, request)
                        }
                        None => Err(IndicatorError::DuplicateName(request.name().to_string())),
                    };
                    entries.push((request.name().to_string(), outcome));
                }
            });
        }

        finish(entries)
    }

    fn evaluate_all(&self, series: &Series, requests: &[IndicatorRequest]) -> IndicatorSet {
        let entries = requests
            .iter()
            .zip(duplicate_flags(requests))
            .map(|(request, duplicate)| {
                let outcome = if duplicate {
                    Err(IndicatorError::DuplicateName(request.name().to_string()))
                } else {
                    self.evaluate(series, request)
                };
                (request.name().to_string(), outcome)
            })
            .collect();

        finish(entries)
    }

    /// Evaluates a single request.
    ///
    /// # Errors
    ///
    /// - [`IndicatorError::UnknownIndicator`] / [`IndicatorError::DegenerateParameters`]
    ///   from the registry.
    /// - [`IndicatorError::InvalidPeriod`] / [`IndicatorError::InsufficientData`]
    ///   under [`PeriodPolicy::Strict`].
    pub fn evaluate(&self, series: &Series, request: &IndicatorRequest) -> RequestOutcome {
        let indicator = self.registry.create(request)?;

        if self.policy == PeriodPolicy::Strict && !series.is_empty() {
            if request.period == 0 {
                return Err(IndicatorError::InvalidPeriod(request.period));
            }
            let required = indicator.required_len();
            if series.len() < required {
                return Err(IndicatorError::InsufficientData {
                    required,
                    actual: series.len(),
                });
            }
        }

        debug!(
            name = request.name(),
            indicator = indicator.name(),
            period = request.period,
            len = series.len(),
            "Computing indicator"
        );
        Ok(indicator.compute(series))
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(PeriodPolicy::default())
    }
}

/// `true` at every request whose name was already used by an earlier one.
fn duplicate_flags(requests: &[IndicatorRequest]) -> Vec<bool> {
    let mut seen = HashSet::new();
    requests
        .iter()
        .map(|request| !seen.insert(request.name()))
        .collect()
}

fn finish(entries: Vec<(String, RequestOutcome)>) -> IndicatorSet {
    let set = IndicatorSet { entries };
    for (name, err) in set.failures() {
        warn!(name, error = %err, "Indicator request failed");
    }
    set
}
