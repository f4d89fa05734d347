//! Keyed, immutable sample series.

use crate::bar::Bar;
use crate::error::CoreError;
use crate::sample::Sample;

/// Ordered sequence of `(timestamp_ns, Sample)` pairs.
///
/// Keys are strictly increasing. A `Series` is never mutated after
/// construction; derived series are built through [`Series::derive`] and
/// [`Series::derive_n`], which copy the key axis so every output is aligned
/// 1:1 with its input.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SeriesRaw")]
pub struct Series {
    keys: Vec<i64>,
    values: Vec<Sample>,
}

#[derive(serde::Deserialize)]
struct SeriesRaw {
    keys: Vec<i64>,
    values: Vec<Sample>,
}

impl TryFrom<SeriesRaw> for Series {
    type Error = CoreError;

    fn try_from(raw: SeriesRaw) -> Result<Self, Self::Error> {
        Series::new(raw.keys, raw.values)
    }
}

impl Series {
    /// Builds a series, validating length and key ordering.
    ///
    /// # Errors
    /// - [`CoreError::LengthMismatch`] when `keys` and `values` differ in length.
    /// - [`CoreError::NonMonotonicKey`] when a key is not strictly greater than its predecessor.
    pub fn new(keys: Vec<i64>, values: Vec<Sample>) -> Result<Self, CoreError> {
        if keys.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }

        for (index, pair) in keys.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(CoreError::NonMonotonicKey {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }

        Ok(Self { keys, values })
    }

    /// Builds a series from `(timestamp_ns, value)` pairs.
    ///
    /// # Errors
    /// Same as [`Series::new`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        let (keys, values): (Vec<i64>, Vec<Sample>) = pairs
            .into_iter()
            .map(|(k, v)| (k, Sample::from_f64(v)))
            .unzip();
        Self::new(keys, values)
    }

    /// Builds the close-price series of a bar sequence.
    ///
    /// # Errors
    /// Same as [`Series::new`].
    pub fn from_closes(bars: &[Bar]) -> Result<Self, CoreError> {
        Self::from_pairs(bars.iter().map(|b| (b.timestamp_ns, b.close)))
    }

    /// The zero-length series.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Key axis (epoch nanoseconds, UTC).
    #[must_use]
    pub fn keys(&self) -> &[i64] {
        &self.keys
    }

    /// Sample values, positionally aligned with [`Series::keys`].
    #[must_use]
    pub fn values(&self) -> &[Sample] {
        &self.values
    }

    /// Sample at `idx`, `Missing` when out of range.
    #[must_use]
    pub fn value_at(&self, idx: usize) -> Sample {
        self.values.get(idx).copied().unwrap_or(Sample::Missing)
    }

    /// Key and sample at `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<(i64, Sample)> {
        Some((*self.keys.get(idx)?, *self.values.get(idx)?))
    }

    /// Position of `key` on the key axis.
    #[must_use]
    pub fn position_of(&self, key: i64) -> Option<usize> {
        self.keys.binary_search(&key).ok()
    }

    /// Iterates `(key, sample)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, Sample)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of present samples.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|s| s.is_present()).count()
    }

    /// True when `other` has exactly the same key axis.
    #[must_use]
    pub fn is_aligned_with(&self, other: &Series) -> bool {
        self.keys == other.keys
    }

    /// Derives a new series on the same key axis.
    ///
    /// `fill` receives the input samples and an output buffer of equal length,
    /// pre-filled with `Missing`.
    #[must_use]
    pub fn derive(&self, fill: impl FnOnce(&[Sample], &mut [Sample])) -> Series {
        let [out] = self.derive_n::<1>(|input, [buf]| fill(input, buf));
        out
    }

    /// Derives `K` series on the same key axis in one pass.
    #[must_use]
    pub fn derive_n<const K: usize>(
        &self,
        fill: impl FnOnce(&[Sample], [&mut [Sample]; K]),
    ) -> [Series; K] {
        let mut buffers: [Vec<Sample>; K] =
            std::array::from_fn(|_| vec![Sample::Missing; self.len()]);
        fill(&self.values, buffers.each_mut().map(Vec::as_mut_slice));
        buffers.map(|values| Series {
            keys: self.keys.clone(),
            values,
        })
    }
}
