//! Byte-range planning.
//!
//! A [`RangePlan`] splits `[0, total_size - 1]` into contiguous, inclusive
//! intervals, one per worker. Every range is `total_size / workers` bytes
//! long except the last one, which also absorbs the division remainder.
//!
//! When more workers are requested than there are bytes, the worker count
//! is clamped down to `total_size` so that no range is ever empty.
//!
//! ```rust
//! use splitfetch::download::range::plan;
//!
//! let plan = plan(7, 3)?;
//! let bounds: Vec<_> = plan.iter().map(|r| (r.start, r.end)).collect();
//! assert_eq!(bounds, vec![(0, 1), (2, 3), (4, 6)]);
//! # Ok::<(), splitfetch::Error>(())
//! ```

use crate::error::{Error, Result};

use std::fmt;

/// One inclusive byte interval of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// Position of the range inside its plan.
    pub index: usize,
    /// First byte offset.
    pub start: u64,
    /// Last byte offset, inclusive.
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the range.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always `false`: a planned range holds at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value for the HTTP `Range` request header.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}-{}]", self.index, self.start, self.end)
    }
}

/// An ordered partition of a resource into [`ByteRange`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePlan {
    total_size: u64,
    ranges: Vec<ByteRange>,
}

impl RangePlan {
    /// Size of the resource the plan covers.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Number of ranges, i.e. the effective worker count.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always `false` for a plan built by [`plan`].
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Ranges in ascending `start` order.
    pub fn ranges(&self) -> &[ByteRange] {
        &self.ranges
    }

    /// Iterate over the ranges in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, ByteRange> {
        self.ranges.iter()
    }
}

impl<'a> IntoIterator for &'a RangePlan {
    type Item = &'a ByteRange;
    type IntoIter = std::slice::Iter<'a, ByteRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Partition `total_size` bytes between `worker_count` workers.
///
/// # Errors
///
/// Returns [`Error::InvalidPlan`] if either argument is zero.
pub fn plan(total_size: u64, worker_count: usize) -> Result<RangePlan> {
    if total_size == 0 {
        return Err(Error::InvalidPlan("total size must be positive".into()));
    }
    if worker_count == 0 {
        return Err(Error::InvalidPlan("worker count must be positive".into()));
    }

    let workers = (worker_count as u64).min(total_size);
    let part_size = total_size / workers;

    let ranges = (0..workers)
        .map(|i| {
            let start = i * part_size;
            let end = if i == workers - 1 {
                total_size - 1
            } else {
                start + part_size - 1
            };
            ByteRange {
                index: i as usize,
                start,
                end,
            }
        })
        .collect();

    Ok(RangePlan { total_size, ranges })
}
