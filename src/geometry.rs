//! Row geometry: thickness, radii, per-row capacity, and minimal row count.
//!
//! The hemicycle is normalized to an outer radius of 1 and an inner radius
//! of 0.5, centered on `(1, 0)`, so every seat lands inside the 2×1
//! rectangle `[0, 2] × [0, 1]`.
//!
//! ```text
//!   nrows = 3, t = 0.5 / (nrows - 0.5) = 0.2
//!
//!          outer circle, r = 1
//!        .-----------------.
//!      /   row 2, r = 0.9    \      outermost row sits t/2 inside
//!     /  .-------------.      \
//!    |  / row 1, r = 0.7 \     |
//!    | |  .---------.     |    |
//!    | | / row 0    \     |    |    innermost row lies on r = 0.5
//!    | ||  r = 0.5   |    |    |
//!  --+-++-----+------++---+----+--  y = 0
//!    0        1 (origin)       2
//! ```
//!
//! Row capacity is a structural property of `(nrows, span_angle)`: it is
//! always computed for full-size seats (radius `t/2`), whatever radius the
//! seats are eventually rendered with.
//!
//! # Example
//!
//! ```
//! use hemicycle::geometry::{get_nrows_from_nseats, get_rows_from_nrows};
//!
//! assert_eq!(get_rows_from_nrows(4, 180.0).unwrap(), vec![10, 14, 17, 20]);
//! assert_eq!(get_nrows_from_nseats(61, 180.0).unwrap(), 4);
//! assert_eq!(get_nrows_from_nseats(62, 180.0).unwrap(), 5);
//! ```

use alloc::vec::Vec;
use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::layout::LayoutError;

/// Default span angle in degrees: a full half-circle.
pub const DEFAULT_SPAN_ANGLE: f64 = 180.0;

/// Largest row count [`get_nrows_from_nseats`] will try before giving up.
pub const MAX_ROWS: u32 = 4096;

/// Slack absorbing `asin`/division rounding when comparing angles.
pub(crate) const EPSILON: f64 = 1e-9;

/// Radial distance between the center arcs of two consecutive rows.
///
/// Equal to the diameter of a full-size seat. The innermost row's arc
/// coincides with the inner circle and the outermost row's arc sits half a
/// thickness inside the outer circle, hence `0.5 / (nrows - 0.5)`.
pub fn row_thickness(nrows: u32) -> f64 {
    0.5 / (nrows as f64 - 0.5)
}

/// Radius of the arc crossing the center of every seat in row `row`.
pub fn row_radius(row: u32, nrows: u32) -> f64 {
    0.5 + row as f64 * row_thickness(nrows)
}

/// Half of the angle a full-size seat subtends at `radius`.
pub fn seat_half_angle(radius: f64, thickness: f64) -> f64 {
    (thickness / 2.0 / radius).min(1.0).asin()
}

/// Maximum number of seats per row, from inner to outer.
///
/// `span_angle` is in degrees, in `(0, 180]`. The returned list has `nrows`
/// elements and never decreases from one row to the next.
///
/// Fails with [`LayoutError::ConfigurationError`] when the span is too
/// narrow to fit a single seat in the innermost row.
pub fn get_rows_from_nrows(nrows: u32, span_angle: f64) -> Result<Vec<u32>, LayoutError> {
    Ok(row_shapes(nrows, span_angle)?
        .into_iter()
        .map(|shape| shape.capacity)
        .collect())
}

/// Minimal number of rows whose total capacity holds `nseats` seats.
///
/// Zero seats resolve to one row. Gives up with
/// [`LayoutError::CapacityExceeded`] past [`MAX_ROWS`].
pub fn get_nrows_from_nseats(nseats: u32, span_angle: f64) -> Result<u32, LayoutError> {
    get_nrows_from_nseats_within(nseats, span_angle, MAX_ROWS)
}

/// Like [`get_nrows_from_nseats`], with an explicit row cap.
///
/// Row counts too narrow for the span angle are skipped: total capacity
/// grows with the row count, so the first count that fits is the minimal
/// one.
///
/// Fails with [`LayoutError::ConfigurationError`] when even `max_rows` rows
/// are too narrow for one seat, and with [`LayoutError::CapacityExceeded`]
/// when some count up to `max_rows` is feasible but none holds `nseats`.
pub fn get_nrows_from_nseats_within(
    nseats: u32,
    span_angle: f64,
    max_rows: u32,
) -> Result<u32, LayoutError> {
    let span = span_radians(span_angle)?;
    if max_rows == 0 {
        return Err(LayoutError::InvalidParameter {
            name: "max_rows",
            reason: "must be at least 1",
        });
    }
    if nseats == 0 {
        return Ok(1);
    }

    // Feasibility is monotonic in the row count; `None` until a count is feasible.
    let mut capacity = None;
    for nrows in 1..=max_rows {
        let Some(total) = total_capacity(nrows, span) else {
            continue;
        };
        if total >= u64::from(nseats) {
            return Ok(nrows);
        }
        capacity = Some(total);
    }

    match capacity {
        Some(capacity) => Err(LayoutError::CapacityExceeded {
            requested: nseats,
            capacity,
        }),
        None => Err(LayoutError::ConfigurationError {
            nrows: max_rows,
            span_angle,
        }),
    }
}

// ============================================================================
// Internal geometry
// ============================================================================

/// Geometry of a single row for a given `(nrows, span_angle)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct RowShape {
    pub radius: f64,
    pub half_angle: f64,
    pub capacity: u32,
}

/// Convert a span angle to radians, rejecting values outside `(0, 180]`.
pub(crate) fn span_radians(span_angle: f64) -> Result<f64, LayoutError> {
    if !span_angle.is_finite() || span_angle <= 0.0 || span_angle > 180.0 {
        return Err(LayoutError::InvalidParameter {
            name: "span_angle",
            reason: "must be in (0, 180] degrees",
        });
    }
    Ok(span_angle * PI / 180.0)
}

/// Radius, seat half-angle, and capacity of every row, inner to outer.
pub(crate) fn row_shapes(nrows: u32, span_angle: f64) -> Result<Vec<RowShape>, LayoutError> {
    if nrows == 0 {
        return Err(LayoutError::InvalidParameter {
            name: "nrows",
            reason: "must be at least 1",
        });
    }
    let span = span_radians(span_angle)?;
    let thickness = row_thickness(nrows);

    // The innermost row has the widest seat half-angle; if it fits, all fit.
    if !fits_one_seat(span, seat_half_angle(row_radius(0, nrows), thickness)) {
        return Err(LayoutError::ConfigurationError { nrows, span_angle });
    }

    Ok((0..nrows)
        .map(|row| {
            let radius = row_radius(row, nrows);
            let half_angle = seat_half_angle(radius, thickness);
            RowShape {
                radius,
                half_angle,
                capacity: row_capacity(span, half_angle),
            }
        })
        .collect())
}

/// Sum of row capacities, or `None` when the innermost row cannot hold a seat.
fn total_capacity(nrows: u32, span: f64) -> Option<u64> {
    let thickness = row_thickness(nrows);
    if !fits_one_seat(span, seat_half_angle(row_radius(0, nrows), thickness)) {
        return None;
    }
    Some(
        (0..nrows)
            .map(|row| {
                let half_angle = seat_half_angle(row_radius(row, nrows), thickness);
                u64::from(row_capacity(span, half_angle))
            })
            .sum(),
    )
}

fn fits_one_seat(span: f64, half_angle: f64) -> bool {
    span >= 2.0 * half_angle - EPSILON
}

/// One seat at each end of the span, then one more per seat width left over.
fn row_capacity(span: f64, half_angle: f64) -> u32 {
    let extra = ((span - 2.0 * half_angle) / (2.0 * half_angle) + EPSILON).floor();
    if extra < 0.0 { 1 } else { extra as u32 + 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // ── Thickness and radii ─────────────────────────────────────────────

    #[test]
    fn thickness_single_row_spans_whole_annulus() {
        assert_eq!(row_thickness(1), 1.0);
        assert_eq!(row_radius(0, 1), 0.5);
    }

    #[test]
    fn outermost_row_sits_half_thickness_inside() {
        for nrows in 1..50 {
            let t = row_thickness(nrows);
            let outer = row_radius(nrows - 1, nrows);
            assert!((outer + t / 2.0 - 1.0).abs() < 1e-12, "nrows={nrows}");
        }
    }

    #[test]
    fn radii_strictly_increase() {
        for nrows in 2..30 {
            for row in 1..nrows {
                assert!(row_radius(row, nrows) > row_radius(row - 1, nrows));
            }
        }
    }

    // ── Capacities ──────────────────────────────────────────────────────

    #[test]
    fn capacities_full_hemicycle() {
        assert_eq!(get_rows_from_nrows(1, 180.0).unwrap(), vec![1]);
        assert_eq!(get_rows_from_nrows(2, 180.0).unwrap(), vec![4, 7]);
        assert_eq!(get_rows_from_nrows(3, 180.0).unwrap(), vec![7, 10, 14]);
        assert_eq!(get_rows_from_nrows(4, 180.0).unwrap(), vec![10, 14, 17, 20]);
    }

    #[test]
    fn capacities_quarter_circle() {
        assert_eq!(get_rows_from_nrows(2, 90.0).unwrap(), vec![2, 3]);
        assert_eq!(get_rows_from_nrows(4, 90.0).unwrap(), vec![5, 7, 8, 10]);
    }

    #[test]
    fn capacities_non_decreasing_by_row() {
        for span in [180.0, 150.0, 120.0, 90.0, 45.0] {
            for nrows in 1..40 {
                let Ok(rows) = get_rows_from_nrows(nrows, span) else {
                    continue;
                };
                assert_eq!(rows.len(), nrows as usize);
                assert!(
                    rows.windows(2).all(|w| w[0] <= w[1]),
                    "span={span} nrows={nrows}: {rows:?}"
                );
            }
        }
    }

    #[test]
    fn total_capacity_non_decreasing_in_nrows() {
        for span in [180.0, 135.0, 90.0, 30.0] {
            let mut previous = 0;
            for nrows in 1..60 {
                let total = total_capacity(nrows, span * PI / 180.0).unwrap_or(0);
                assert!(total >= previous, "span={span} nrows={nrows}");
                previous = total;
            }
        }
    }

    #[test]
    fn narrower_span_strictly_reduces_every_row() {
        let full = get_rows_from_nrows(4, 180.0).unwrap();
        let quarter = get_rows_from_nrows(4, 90.0).unwrap();
        for (f, q) in full.iter().zip(&quarter) {
            assert!(q < f);
        }
    }

    #[test]
    fn four_rows_yield_four_increasing_capacities() {
        let rows = get_rows_from_nrows(4, 180.0).unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.windows(2).all(|w| w[0] <= w[1]));
    }

    // ── Row count ───────────────────────────────────────────────────────

    #[test]
    fn nrows_zero_seats_is_one_row() {
        assert_eq!(get_nrows_from_nseats(0, 180.0), Ok(1));
        assert_eq!(get_nrows_from_nseats(0, 30.0), Ok(1));
    }

    #[test]
    fn nrows_is_minimal() {
        for span in [180.0, 120.0, 90.0] {
            for nseats in 1..700 {
                let nrows = get_nrows_from_nseats(nseats, span).unwrap();
                let total: u32 = get_rows_from_nrows(nrows, span).unwrap().iter().sum();
                assert!(total >= nseats);
                if nrows > 1 {
                    let below = total_capacity(nrows - 1, span * PI / 180.0).unwrap_or(0);
                    assert!(below < u64::from(nseats), "span={span} nseats={nseats}");
                }
            }
        }
    }

    #[test]
    fn nrows_is_deterministic() {
        let first = get_nrows_from_nseats(10, 180.0).unwrap();
        for _ in 0..10 {
            assert_eq!(get_nrows_from_nseats(10, 180.0).unwrap(), first);
        }
        assert_eq!(first, 2);
    }

    #[test]
    fn nrows_skips_rows_too_narrow_for_span() {
        // A single row cannot fit a seat in anything less than 180°.
        assert!(matches!(
            get_rows_from_nrows(1, 90.0),
            Err(LayoutError::ConfigurationError { nrows: 1, .. })
        ));
        assert_eq!(get_nrows_from_nseats(1, 90.0), Ok(2));
    }

    #[test]
    fn nrows_span_too_narrow_for_any_row_count() {
        assert_eq!(
            get_nrows_from_nseats(1, 0.001),
            Err(LayoutError::ConfigurationError {
                nrows: MAX_ROWS,
                span_angle: 0.001,
            })
        );
        assert_eq!(
            get_nrows_from_nseats_within(1, 90.0, 1),
            Err(LayoutError::ConfigurationError {
                nrows: 1,
                span_angle: 90.0,
            })
        );
    }

    #[test]
    fn nrows_zero_cap_errors() {
        assert!(matches!(
            get_nrows_from_nseats_within(0, 180.0, 0),
            Err(LayoutError::InvalidParameter { name: "max_rows", .. })
        ));
    }

    #[test]
    fn nrows_respects_cap() {
        assert_eq!(
            get_nrows_from_nseats_within(100, 180.0, 4),
            Err(LayoutError::CapacityExceeded {
                requested: 100,
                capacity: 61,
            })
        );
        assert_eq!(get_nrows_from_nseats_within(100, 180.0, 5), Ok(5));
        // One row is infeasible at 90°, two are feasible but hold only 5.
        assert_eq!(
            get_nrows_from_nseats_within(6, 90.0, 2),
            Err(LayoutError::CapacityExceeded {
                requested: 6,
                capacity: 5,
            })
        );
    }

    // ── Error cases ─────────────────────────────────────────────────────

    #[test]
    fn invalid_span_errors() {
        for span in [0.0, -10.0, 180.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                get_rows_from_nrows(3, span),
                Err(LayoutError::InvalidParameter {
                    name: "span_angle",
                    ..
                })
            ));
            assert!(get_nrows_from_nseats(3, span).is_err());
        }
    }

    #[test]
    fn zero_rows_errors() {
        assert!(matches!(
            get_rows_from_nrows(0, 180.0),
            Err(LayoutError::InvalidParameter { name: "nrows", .. })
        ));
    }
}
