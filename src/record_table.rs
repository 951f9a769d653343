use std::fmt::Debug;

use crate::error::TableError;

// We never reserve more than this up front, however large init_size is.
const MAX_PREALLOC: usize = 4096;

/// The parameters of a RecordTable, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// The default for `max_size` and `threshold`, and the initial allocation.
    pub init_size: usize,
    /// The table never holds more values than this.
    pub max_size: usize,
    /// The deepest position at which a new value may land without
    /// evicting the table's maximum.
    pub threshold: usize,
    /// If true, `threshold` is a percentage of the current size
    /// rather than a position.
    pub relative_percentage: bool,
}

impl TableConfig {
    /// Returns a config with both `max_size` and `threshold` set to `init_size`
    /// and an absolute threshold.
    pub fn new(init_size: usize) -> Self {
        Self {
            init_size,
            max_size: init_size,
            threshold: init_size,
            relative_percentage: false,
        }
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Treats the threshold as a percentage of the table's current size.
    pub fn with_relative_percentage(mut self, relative_percentage: bool) -> Self {
        self.relative_percentage = relative_percentage;
        self
    }
}

/// The outcome of admitting a value to a RecordTable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Admission {
    /// The value that was admitted.
    pub value: u64,
    /// The position the value landed at, counting from the smallest (0).
    /// This is computed before any eviction, so it may be stale afterwards.
    pub index: usize,
    /// The maximum that was evicted to keep the table within its bounds, if any.
    pub evicted: Option<u64>,
}

impl Admission {
    /// Returns true if the admitted value is still in the table,
    /// i.e. it was not itself the value evicted.
    #[inline]
    pub fn is_retained(&self) -> bool {
        self.evicted != Some(self.value)
    }
}

/// A sorted set of the smallest values seen so far, with an adaptive size.
/// See the crate docs for the admission and eviction rules.
#[derive(Clone, PartialEq, Eq)]
pub struct RecordTable {
    // The records, strictly ascending.
    values: Vec<u64>,
    config: TableConfig,
}

impl RecordTable {
    /// Returns an empty table that holds at most `init_size` values,
    /// with an absolute threshold of `init_size`.
    pub fn new(init_size: usize) -> Self {
        Self::with_config(TableConfig::new(init_size))
    }

    /// Returns an empty table with every parameter spelled out.
    pub fn complete(
        init_size: usize,
        max_size: usize,
        threshold: usize,
        relative_percentage: bool,
    ) -> Self {
        Self::with_config(TableConfig {
            init_size,
            max_size,
            threshold,
            relative_percentage,
        })
    }

    pub fn with_config(config: TableConfig) -> Self {
        let prealloc = config.init_size.min(config.max_size).min(MAX_PREALLOC);
        Self {
            values: Vec::with_capacity(prealloc),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[inline]
    pub fn init_size(&self) -> usize {
        self.config.init_size
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        self.config.max_size
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.config.threshold
    }

    /// Returns true if the threshold is a percentage of the current size.
    #[inline]
    pub fn is_relative(&self) -> bool {
        self.config.relative_percentage
    }

    /// Returns the number of values in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the smallest value, or None if the table is empty.
    #[inline]
    pub fn min(&self) -> Option<u64> {
        self.values.first().copied()
    }

    /// Returns the largest value, or None if the table is empty.
    #[inline]
    pub fn max(&self) -> Option<u64> {
        self.values.last().copied()
    }

    /// Removes and returns the largest value, or None if the table is empty.
    pub fn pop(&mut self) -> Option<u64> {
        self.values.pop()
    }

    /// Returns true if the value is in the table.
    pub fn contains(&self, value: u64) -> bool {
        match self.values.last() {
            Some(&max) if value <= max => self.values.binary_search(&value).is_ok(),
            _ => false, // empty, or beyond the maximum
        }
    }

    /// Returns true if the value would be admitted by `insert`: it is not
    /// already in the table, and either the table has room or the value is
    /// smaller than the current maximum.
    pub fn is_new_record(&self, value: u64) -> bool {
        self.locate(value).is_ok()
    }

    // Returns the position a new record would land at, or why it is not a record.
    fn locate(&self, value: u64) -> Result<usize, TableError> {
        // Cheap rejection of values that cannot displace anything.
        if self.values.len() >= self.config.max_size {
            match self.values.last() {
                None => return Err(TableError::ZeroCapacity),
                Some(&max) if value > max => return Err(TableError::NotARecord { value, max }),
                Some(_) => {}
            }
        }
        match self.values.binary_search(&value) {
            Ok(_) => Err(TableError::Duplicate(value)),
            Err(index) => Ok(index),
        }
    }

    // The deepest position a new value may land at without forcing an eviction.
    // Relative thresholds are computed from the size after the new value is placed.
    fn current_threshold(&self) -> usize {
        if !self.config.relative_percentage {
            return self.config.threshold;
        }
        let scaled = self.values.len().saturating_mul(self.config.threshold);
        (scaled as f32 / 100.0) as usize
    }

    /// Considers a value for the table.  If it is a new record, it is added
    /// and its position is returned, 0 for the smallest value.  Otherwise the
    /// return value is None and the table is unchanged.
    ///
    /// If the value landed beyond the current threshold, or the table is now
    /// over its max size, the largest value is evicted.  The returned position
    /// is where the value landed before that eviction, and the evicted value
    /// may be the one just inserted.
    #[inline]
    pub fn insert(&mut self, value: u64) -> Option<usize> {
        self.admit(value).ok().map(|admission| admission.index)
    }

    /// Like `insert`, but reports why a value was rejected,
    /// and which value (if any) was evicted.
    pub fn admit(&mut self, value: u64) -> Result<Admission, TableError> {
        let index = self.locate(value).inspect_err(|err| {
            log::trace!("Rejected {value}: {err}.");
        })?;
        self.values.insert(index, value);

        let threshold = self.current_threshold();
        let evicted = if index > threshold || self.values.len() > self.config.max_size {
            self.pop()
        } else {
            None
        };
        match evicted {
            Some(max) => log::trace!(
                "Admitted {value} at {index} (threshold {threshold}), evicted {max}; size {}.",
                self.values.len()
            ),
            None => log::trace!("Admitted {value} at {index}; size {}.", self.values.len()),
        }

        Ok(Admission {
            value,
            index,
            evicted,
        })
    }

    /// Returns the values in ascending order.
    #[inline]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Returns a copy of the values in ascending order.
    pub fn to_vec(&self) -> Vec<u64> {
        self.values.clone()
    }

    /// Returns an Iterator over the values in ascending order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.values.iter(),
        }
    }
}

// Custom Debug implementation to show the config alongside the values.
impl Debug for RecordTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let TableConfig {
            init_size,
            max_size,
            threshold,
            relative_percentage,
        } = self.config;
        let pct = if relative_percentage { "%" } else { "" };
        write!(
            f,
            "RecordTable {{ init_size: {init_size}, max_size: {max_size}, threshold: {threshold}{pct}, values: {:?} }}",
            self.values
        )
    }
}

/// Inserts each value in turn; rejected values are dropped.
impl Extend<u64> for RecordTable {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator for a RecordTable.  It returns the values in ascending order.
/// The iterator is double-ended, so you can use .rev() to get descending order.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, u64>,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Iter<'_> {}
