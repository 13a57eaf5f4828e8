//! Parliament hemicycle layout: row capacities, seat apportionment, and seat placement.
//!
//! The core is pure geometry with no I/O and builds under `no_std` (with `alloc`). The optional
//! `svg` feature renders a layout to an SVG document, and the `cli` feature
//! builds the `hemicycle` command-line tool.
//!
//! # Modules
//!
//! - [`geometry`] — Row thickness, row radii, per-row capacity, minimal row count
//! - [`apportion`] — Filling strategies distributing seats among rows
//! - [`layout`] — Layout configuration, seat placement, and the layout result
//! - [`svg`] — Seat grouping and SVG rendering (feature `svg`)
//!
//! # Example
//!
//! ```
//! use hemicycle::{FillingStrategy, LayoutConfig};
//!
//! let result = LayoutConfig::new(100)
//!     .filling_strategy(FillingStrategy::OuterPriority)
//!     .compute()
//!     .unwrap();
//!
//! assert_eq!(result.len(), 100);
//! assert_eq!(result.metadata.nrows, 5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod apportion;
pub mod geometry;
pub mod layout;

#[cfg(feature = "svg")]
pub mod color;
#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports: core types
pub use apportion::{FillingStrategy, apportion};
pub use geometry::{MAX_ROWS, get_nrows_from_nseats, get_nrows_from_nseats_within, get_rows_from_nrows};
pub use layout::{LayoutConfig, LayoutError, LayoutMetadata, LayoutResult, Row, Seat};

#[cfg(feature = "svg")]
pub use color::{Color, Paint};
#[cfg(feature = "svg")]
pub use svg::{Margins, RenderError, SeatGroup, SvgOptions};
