//! Layout configuration, seat placement, and the layout result.
//!
//! Resolves the row count, apportions seats among rows, then places every
//! seat on its row's arc. Coordinates are in the normalized 2×1 rectangle
//! with the y axis pointing up: the hemicycle's center is `(1, 0)`, angle 0
//! points right and π points left.
//!
//! # Example
//!
//! ```
//! use hemicycle::{FillingStrategy, LayoutConfig};
//!
//! let result = LayoutConfig::new(1).compute().unwrap();
//! assert_eq!(result.metadata.nrows, 1);
//! let seat = result.seats[0];
//! assert!((seat.x - 1.0).abs() < 1e-12);
//! assert!((seat.y - 0.5).abs() < 1e-12);
//!
//! let result = LayoutConfig::new(30)
//!     .span_angle(120.0)
//!     .filling_strategy(FillingStrategy::EmptyInner)
//!     .seat_radius_factor(0.8)
//!     .compute()
//!     .unwrap();
//! assert_eq!(result.len(), 30);
//! ```

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_2;
use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::apportion::{FillingStrategy, apportion};
use crate::geometry::{
    self, DEFAULT_SPAN_ANGLE, MAX_ROWS, RowShape, get_nrows_from_nseats_within, row_thickness,
};

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A parameter is outside its valid range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What the parameter must satisfy.
        reason: &'static str,
    },
    /// The span angle is too narrow to fit one seat in the innermost row.
    #[error("a span of {span_angle}° is too narrow for a seat in the innermost of {nrows} rows")]
    ConfigurationError {
        /// Row count the geometry was computed for.
        nrows: u32,
        /// Span angle in degrees.
        span_angle: f64,
    },
    /// More seats were requested than the rows can hold.
    #[error("{requested} seats requested but at most {capacity} fit")]
    CapacityExceeded {
        /// Requested seat count.
        requested: u32,
        /// Largest total capacity available.
        capacity: u64,
    },
}

/// Hemicycle layout parameters.
///
/// Defaults: no minimum or maximum row count, a 180° span, seats touching
/// their neighbors (`seat_radius_factor = 1`), and
/// [`FillingStrategy::Default`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct LayoutConfig {
    /// Number of seats to place.
    pub seat_count: u32,
    /// Lower bound on the row count, at most [`MAX_ROWS`]. Extra rows make
    /// the diagram sparser.
    pub min_rows: u32,
    /// Upper bound on the row count, in `[1, MAX_ROWS]`. `None` searches up
    /// to [`MAX_ROWS`].
    pub max_rows: Option<u32>,
    /// Angle in degrees from the rightmost seats, through the center, to
    /// the leftmost seats. In `(0, 180]`.
    pub span_angle: f64,
    /// Rendered seat radius relative to half the row thickness. In `(0, 1]`.
    pub seat_radius_factor: f64,
    /// How seats are distributed when the rows are not full.
    pub filling_strategy: FillingStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

impl LayoutConfig {
    /// Create a configuration for `seat_count` seats with default settings.
    pub fn new(seat_count: u32) -> Self {
        Self {
            seat_count,
            min_rows: 0,
            max_rows: None,
            span_angle: DEFAULT_SPAN_ANGLE,
            seat_radius_factor: 1.0,
            filling_strategy: FillingStrategy::Default,
        }
    }

    /// Set the number of seats.
    pub fn seat_count(mut self, seat_count: u32) -> Self {
        self.seat_count = seat_count;
        self
    }

    /// Force at least `min_rows` rows.
    pub fn min_rows(mut self, min_rows: u32) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// Allow at most `max_rows` rows.
    pub fn max_rows(mut self, max_rows: u32) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Set the span angle in degrees.
    pub fn span_angle(mut self, degrees: f64) -> Self {
        self.span_angle = degrees;
        self
    }

    /// Set the rendered seat radius factor.
    pub fn seat_radius_factor(mut self, factor: f64) -> Self {
        self.seat_radius_factor = factor;
        self
    }

    /// Set the filling strategy.
    pub fn filling_strategy(mut self, strategy: FillingStrategy) -> Self {
        self.filling_strategy = strategy;
        self
    }

    /// Check every parameter range independently of the geometry.
    pub fn validate(&self) -> Result<(), LayoutError> {
        geometry::span_radians(self.span_angle)?;
        if !(self.seat_radius_factor > 0.0 && self.seat_radius_factor <= 1.0) {
            return Err(LayoutError::InvalidParameter {
                name: "seat_radius_factor",
                reason: "must be in (0, 1]",
            });
        }
        if self.min_rows > MAX_ROWS {
            return Err(LayoutError::InvalidParameter {
                name: "min_rows",
                reason: "must not exceed MAX_ROWS",
            });
        }
        if let Some(max_rows) = self.max_rows {
            if max_rows == 0 || max_rows > MAX_ROWS {
                return Err(LayoutError::InvalidParameter {
                    name: "max_rows",
                    reason: "must be in [1, MAX_ROWS]",
                });
            }
            if max_rows < self.min_rows {
                return Err(LayoutError::InvalidParameter {
                    name: "max_rows",
                    reason: "must not be below min_rows",
                });
            }
        }
        Ok(())
    }

    /// Row count the layout will use: the minimal count holding all seats,
    /// raised to `min_rows`.
    pub fn resolve_nrows(&self) -> Result<u32, LayoutError> {
        let cap = self.max_rows.unwrap_or(MAX_ROWS);
        let needed = get_nrows_from_nseats_within(self.seat_count, self.span_angle, cap)?;
        Ok(needed.max(self.min_rows))
    }

    /// Compute the position of every seat.
    pub fn compute(&self) -> Result<LayoutResult, LayoutError> {
        self.validate()?;
        let nrows = self.resolve_nrows()?;
        let thickness = row_thickness(nrows);
        let metadata = LayoutMetadata {
            nrows,
            row_thickness: thickness,
            seat_radius_factor: self.seat_radius_factor,
            seat_actual_radius: self.seat_radius_factor * thickness / 2.0,
        };

        tracing::debug!(
            seats = self.seat_count,
            nrows,
            span_angle = self.span_angle,
            strategy = %self.filling_strategy,
            "resolved hemicycle rows"
        );

        // No row receives a seat, so the span needs no capacity check.
        if self.seat_count == 0 {
            return Ok(LayoutResult {
                seats: Vec::new(),
                rows: Vec::new(),
                metadata,
            });
        }

        let shapes = geometry::row_shapes(nrows, self.span_angle)?;
        let capacities: Vec<u32> = shapes.iter().map(|shape| shape.capacity).collect();
        let counts = apportion(&capacities, self.seat_count, self.filling_strategy)?;

        let span = geometry::span_radians(self.span_angle)?;
        let start = (PI - span) / 2.0;
        let mut seats = Vec::with_capacity(self.seat_count as usize);
        let mut rows = Vec::with_capacity(shapes.len());
        for (index, (shape, &count)) in shapes.iter().zip(&counts).enumerate() {
            let index = index as u32;
            place_row(&mut seats, index, shape, count, start, span);
            rows.push(Row {
                index,
                center_radius: shape.radius,
                capacity: shape.capacity,
                assigned_count: count,
            });
        }

        assert_eq!(seats.len(), self.seat_count as usize);
        tracing::debug!(?counts, "placed hemicycle seats");

        Ok(LayoutResult {
            seats,
            rows,
            metadata,
        })
    }
}

/// One concentric arc of seats.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Row {
    /// Row index, 0 being innermost.
    pub index: u32,
    /// Radius of the arc crossing the center of every seat in the row.
    pub center_radius: f64,
    /// Maximum number of seats the row holds.
    pub capacity: u32,
    /// Number of seats actually placed in the row.
    pub assigned_count: u32,
}

/// A placed seat.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Seat {
    /// Index of the row holding the seat.
    pub row_index: u32,
    /// Position within the row, 0 being the rightmost seat.
    pub position_in_row: u32,
    /// Counterclockwise angle from the hemicycle's center, in radians.
    pub angle: f64,
    /// Horizontal coordinate of the seat's center, in `[0, 2]`.
    pub x: f64,
    /// Vertical coordinate of the seat's center, in `[0, 1]`, pointing up.
    pub y: f64,
}

impl Seat {
    fn on_arc(row_index: u32, position_in_row: u32, radius: f64, angle: f64) -> Self {
        Self {
            row_index,
            position_in_row,
            angle,
            x: 1.0 + radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Center coordinates as an `(x, y)` pair.
    pub fn center(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Values shared by every seat of a layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutMetadata {
    /// Number of rows the seats were laid out on.
    pub nrows: u32,
    /// Radial distance between consecutive rows.
    pub row_thickness: f64,
    /// Seat radius factor the layout was requested with.
    pub seat_radius_factor: f64,
    /// Radius to draw every seat with, in layout units.
    pub seat_actual_radius: f64,
}

/// Computed seat positions and layout metadata.
///
/// `seats` is in placement order: rows from inner to outer, seats within a
/// row from right to left. Every `(x, y)` pair is unique.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Every seat, in placement order.
    pub seats: Vec<Seat>,
    /// Every row, inner to outer. Empty when there are no seats.
    pub rows: Vec<Row>,
    /// Values shared by all seats.
    pub metadata: LayoutMetadata,
}

impl LayoutResult {
    /// Number of seats.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether the layout has no seats.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Seats sorted from the leftmost to the rightmost, by decreasing angle.
    ///
    /// Seats sharing an angle (the single seats of several rows, all on the
    /// vertical axis) keep their placement order, inner first.
    pub fn seats_left_to_right(&self) -> Vec<Seat> {
        let mut seats = self.seats.clone();
        seats.sort_by(|a, b| b.angle.total_cmp(&a.angle));
        seats
    }

    /// `((x, y), angle)` for every seat, in placement order.
    pub fn centers(&self) -> impl Iterator<Item = ((f64, f64), f64)> + '_ {
        self.seats.iter().map(|seat| (seat.center(), seat.angle))
    }

    /// Seats placed in row `index`, right to left.
    pub fn seats_in_row(&self, index: u32) -> impl Iterator<Item = &Seat> + '_ {
        self.seats.iter().filter(move |seat| seat.row_index == index)
    }
}

/// Place `count` seats on one row's arc.
///
/// The usable interval is `[start, start + span]`, symmetric about the
/// vertical. The outermost seats are tangent to its ends; a lone seat sits
/// at its midpoint.
fn place_row(seats: &mut Vec<Seat>, row: u32, shape: &RowShape, count: u32, start: f64, span: f64) {
    match count {
        0 => {}
        1 => seats.push(Seat::on_arc(row, 0, shape.radius, FRAC_PI_2)),
        _ => {
            let step = (span - 2.0 * shape.half_angle) / (count - 1) as f64;
            for position in 0..count {
                let angle = start + shape.half_angle + position as f64 * step;
                seats.push(Seat::on_arc(row, position, shape.radius, angle));
            }
        }
    }
}
