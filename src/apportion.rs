//! Filling strategies: how a seat count below full capacity spreads over rows.
//!
//! Every strategy is a pure function of `(capacities, nseats)` and returns
//! one count per row, inner to outer, summing exactly to `nseats` with no
//! row above its capacity.
//!
//! # Example
//!
//! ```
//! use hemicycle::{FillingStrategy, apportion};
//!
//! let capacities = [10, 14, 17, 20];
//! assert_eq!(apportion(&capacities, 20, FillingStrategy::Default).unwrap(), vec![3, 5, 6, 6]);
//! assert_eq!(apportion(&capacities, 25, FillingStrategy::EmptyInner).unwrap(), vec![0, 0, 11, 14]);
//! assert_eq!(apportion(&capacities, 25, FillingStrategy::OuterPriority).unwrap(), vec![0, 0, 5, 20]);
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::layout::LayoutError;

/// How seats are distributed among rows when the hemicycle is not full.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FillingStrategy {
    /// Seats are spread over all rows, proportionally to each row's capacity.
    #[default]
    Default,
    /// As few outermost rows as necessary are selected, then seats are
    /// spread over them proportionally to capacity. Inner rows stay empty.
    EmptyInner,
    /// Rows are filled to capacity starting from the outermost one. At most
    /// one row is partially filled; rows inside it stay empty.
    OuterPriority,
}

impl FillingStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [Self; 3] = [Self::Default, Self::EmptyInner, Self::OuterPriority];

    /// Snake-case name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::EmptyInner => "empty_inner",
            Self::OuterPriority => "outer_priority",
        }
    }
}

impl fmt::Display for FillingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillingStrategy {
    type Err = LayoutError;

    /// Case-insensitive; `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| {
                let name = strategy.as_str();
                name.len() == s.len()
                    && name
                        .bytes()
                        .zip(s.bytes())
                        .all(|(n, c)| n == c.to_ascii_lowercase() || (n == b'_' && c == b'-'))
            })
            .ok_or(LayoutError::InvalidParameter {
                name: "filling_strategy",
                reason: "expected one of default, empty_inner, outer_priority",
            })
    }
}

/// Assign a seat count to every row under `strategy`.
///
/// `capacities` lists the maximum number of seats per row, inner to outer.
/// Fails with [`LayoutError::CapacityExceeded`] when `nseats` is larger
/// than the sum of the capacities.
///
/// # Panics
///
/// If the strategy produces a distribution that does not sum to `nseats`
/// or overfills a row. That is a bug in this crate, not a caller error.
pub fn apportion(
    capacities: &[u32],
    nseats: u32,
    strategy: FillingStrategy,
) -> Result<Vec<u32>, LayoutError> {
    let capacity: u64 = capacities.iter().map(|&c| u64::from(c)).sum();
    if u64::from(nseats) > capacity {
        return Err(LayoutError::CapacityExceeded {
            requested: nseats,
            capacity,
        });
    }

    let counts = match strategy {
        FillingStrategy::Default => largest_remainder(capacities, nseats),
        FillingStrategy::EmptyInner => empty_inner(capacities, nseats),
        FillingStrategy::OuterPriority => outer_priority(capacities, nseats),
    };

    let assigned: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    assert_eq!(
        assigned,
        u64::from(nseats),
        "{strategy} assigned {assigned} seats instead of {nseats}"
    );
    for (row, (&count, &cap)) in counts.iter().zip(capacities).enumerate() {
        assert!(
            count <= cap,
            "{strategy} assigned {count} seats to row {row} of capacity {cap}"
        );
    }

    Ok(counts)
}

// ============================================================================
// Strategies
// ============================================================================

/// Hamilton apportionment proportional to capacity.
///
/// Each row's quota `nseats * capacity / total` is split into its integer
/// part and a remainder over the common denominator `total`, so quotas are
/// compared exactly. Leftover seats go to the largest remainders; ties go
/// to the outer row.
fn largest_remainder(capacities: &[u32], nseats: u32) -> Vec<u32> {
    let total: u64 = capacities.iter().map(|&c| u64::from(c)).sum();
    if nseats == 0 || total == 0 {
        return vec![0; capacities.len()];
    }

    let mut counts = Vec::with_capacity(capacities.len());
    let mut remainders = Vec::with_capacity(capacities.len());
    for &cap in capacities {
        let quota = u64::from(nseats) * u64::from(cap);
        // quota / total <= cap because nseats <= total
        counts.push((quota / total) as u32);
        remainders.push(quota % total);
    }

    let floored: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    let leftover = (u64::from(nseats) - floored) as usize;

    let mut order: Vec<usize> = (0..capacities.len()).collect();
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]).then(b.cmp(&a)));
    for &row in order.iter().take(leftover) {
        counts[row] += 1;
    }

    counts
}

/// Smallest outer suffix of rows able to hold `nseats`, apportioned alone.
fn empty_inner(capacities: &[u32], nseats: u32) -> Vec<u32> {
    let mut start = capacities.len();
    let mut suffix = 0u64;
    while start > 0 && suffix < u64::from(nseats) {
        start -= 1;
        suffix += u64::from(capacities[start]);
    }

    let mut counts = vec![0; start];
    counts.extend(largest_remainder(&capacities[start..], nseats));
    counts
}

/// Greedy fill from the outermost row inward.
fn outer_priority(capacities: &[u32], nseats: u32) -> Vec<u32> {
    let mut remaining = nseats;
    let mut counts = vec![0; capacities.len()];
    for (count, &cap) in counts.iter_mut().zip(capacities).rev() {
        *count = cap.min(remaining);
        remaining -= *count;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::get_rows_from_nrows;

    const FOUR_ROWS: [u32; 4] = [10, 14, 17, 20];

    // ── Default ─────────────────────────────────────────────────────────

    #[test]
    fn default_proportional_to_capacity() {
        // quotas 3.28, 4.59, 5.57, 6.56 → floors 3, 4, 5, 6 → +1 to rows 1 and 2
        assert_eq!(
            apportion(&FOUR_ROWS, 20, FillingStrategy::Default).unwrap(),
            vec![3, 5, 6, 6]
        );
        assert_eq!(
            apportion(&FOUR_ROWS, 10, FillingStrategy::Default).unwrap(),
            vec![2, 2, 3, 3]
        );
    }

    #[test]
    fn default_full_capacity_fills_every_row() {
        assert_eq!(
            apportion(&FOUR_ROWS, 61, FillingStrategy::Default).unwrap(),
            FOUR_ROWS.to_vec()
        );
    }

    #[test]
    fn default_ties_go_to_outer_row() {
        assert_eq!(
            apportion(&[1, 1], 1, FillingStrategy::Default).unwrap(),
            vec![0, 1]
        );
        assert_eq!(
            apportion(&[5, 5, 5], 2, FillingStrategy::Default).unwrap(),
            vec![0, 1, 1]
        );
    }

    // ── EmptyInner ──────────────────────────────────────────────────────

    #[test]
    fn empty_inner_uses_smallest_sufficient_suffix() {
        // [17, 20] = 37 holds 25 seats, [20] alone does not.
        assert_eq!(
            apportion(&FOUR_ROWS, 25, FillingStrategy::EmptyInner).unwrap(),
            vec![0, 0, 11, 14]
        );
        assert_eq!(
            apportion(&FOUR_ROWS, 20, FillingStrategy::EmptyInner).unwrap(),
            vec![0, 0, 0, 20]
        );
    }

    #[test]
    fn empty_inner_prefix_zero_suffix_nonzero() {
        let capacities = get_rows_from_nrows(8, 180.0).unwrap();
        let total: u32 = capacities.iter().sum();
        for nseats in 1..=total {
            let counts = apportion(&capacities, nseats, FillingStrategy::EmptyInner).unwrap();
            let start = counts.iter().position(|&c| c > 0).unwrap();
            assert!(counts[start..].iter().all(|&c| c > 0), "{nseats}: {counts:?}");
            let suffix: u32 = capacities[start..].iter().sum();
            assert!(suffix >= nseats);
            if start + 1 < capacities.len() {
                let smaller: u32 = capacities[start + 1..].iter().sum();
                assert!(smaller < nseats, "{nseats}: {counts:?}");
            }
        }
    }

    // ── OuterPriority ───────────────────────────────────────────────────

    #[test]
    fn outer_priority_fills_outside_in() {
        assert_eq!(
            apportion(&FOUR_ROWS, 25, FillingStrategy::OuterPriority).unwrap(),
            vec![0, 0, 5, 20]
        );
        assert_eq!(
            apportion(&FOUR_ROWS, 55, FillingStrategy::OuterPriority).unwrap(),
            vec![4, 14, 17, 20]
        );
    }

    #[test]
    fn outer_priority_one_more_seat_changes_one_row() {
        let capacities = get_rows_from_nrows(6, 180.0).unwrap();
        let total: u32 = capacities.iter().sum();
        let mut previous = apportion(&capacities, 0, FillingStrategy::OuterPriority).unwrap();
        for nseats in 1..=total {
            let counts = apportion(&capacities, nseats, FillingStrategy::OuterPriority).unwrap();
            let changed = counts.iter().zip(&previous).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 1, "{nseats}: {previous:?} → {counts:?}");
            previous = counts;
        }
    }

    #[test]
    fn default_and_outer_priority_differ_below_capacity() {
        let counts_default = apportion(&FOUR_ROWS, 30, FillingStrategy::Default).unwrap();
        let counts_outer = apportion(&FOUR_ROWS, 30, FillingStrategy::OuterPriority).unwrap();
        assert_ne!(counts_default, counts_outer);
    }

    // ── All strategies ──────────────────────────────────────────────────

    #[test]
    fn every_strategy_is_exact() {
        for span in [180.0, 100.0] {
            for nrows in 2..=10 {
                let capacities = get_rows_from_nrows(nrows, span).unwrap();
                let total: u32 = capacities.iter().sum();
                for nseats in 0..=total {
                    for strategy in FillingStrategy::ALL {
                        // apportion asserts exactness and capacity internally
                        let counts = apportion(&capacities, nseats, strategy).unwrap();
                        assert_eq!(counts.len(), capacities.len());
                    }
                }
            }
        }
    }

    #[test]
    fn zero_seats_assigns_nothing() {
        for strategy in FillingStrategy::ALL {
            assert_eq!(apportion(&FOUR_ROWS, 0, strategy).unwrap(), vec![0; 4]);
        }
    }

    #[test]
    fn over_capacity_errors() {
        assert_eq!(
            apportion(&FOUR_ROWS, 62, FillingStrategy::Default),
            Err(LayoutError::CapacityExceeded {
                requested: 62,
                capacity: 61,
            })
        );
    }

    // ── Parsing ─────────────────────────────────────────────────────────

    #[test]
    fn parse_strategy_names() {
        assert_eq!("default".parse::<FillingStrategy>(), Ok(FillingStrategy::Default));
        assert_eq!("EMPTY_INNER".parse::<FillingStrategy>(), Ok(FillingStrategy::EmptyInner));
        assert_eq!("outer-priority".parse::<FillingStrategy>(), Ok(FillingStrategy::OuterPriority));
        for strategy in FillingStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<FillingStrategy>(), Ok(strategy));
        }
    }

    #[test]
    fn parse_unknown_strategy_errors() {
        assert!(matches!(
            "inner_priority".parse::<FillingStrategy>(),
            Err(LayoutError::InvalidParameter {
                name: "filling_strategy",
                ..
            })
        ));
    }
}
